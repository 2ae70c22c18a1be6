use std::sync::Arc;

use axum::{
    extract::{Json, Path, State},
    response::IntoResponse,
    Extension,
};
use serde::Deserialize;

use crate::middlewares::auth_middleware::CurrentUser;
use crate::service::founder_service::{
    FounderService, FounderServiceImpl, FounderTransactionInput,
};
use crate::util::error::HandlerError;

#[derive(Debug, Deserialize)]
pub struct FounderTransactionRequest {
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: f64,
    pub date: String,
    pub paid_by: Option<String>,
    pub paid_to: Option<String>,
    pub payee: Option<String>,
}

impl From<FounderTransactionRequest> for FounderTransactionInput {
    fn from(req: FounderTransactionRequest) -> Self {
        FounderTransactionInput {
            kind: req.kind,
            amount: req.amount,
            date: req.date,
            paid_by: req.paid_by,
            paid_to: req.paid_to,
            payee: req.payee,
        }
    }
}

pub async fn create_founder_transaction_handler(
    State(service): State<Arc<FounderServiceImpl>>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<FounderTransactionRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let res = service.create(&user.id, payload.into()).await?;
    Ok(Json(res))
}

/// List founder transactions; the response embeds the per-founder summary.
pub async fn founder_ledger_handler(
    State(service): State<Arc<FounderServiceImpl>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<impl IntoResponse, HandlerError> {
    let res = service.ledger(&user.id).await?;
    Ok(Json(res))
}

pub async fn update_founder_transaction_handler(
    State(service): State<Arc<FounderServiceImpl>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<FounderTransactionRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    service.update(&user.id, &id, payload.into()).await?;
    Ok(Json(serde_json::json!({ "message": "Transaction updated successfully" })))
}

pub async fn delete_founder_transaction_handler(
    State(service): State<Arc<FounderServiceImpl>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    service.delete(&user.id, &id).await?;
    Ok(Json(serde_json::json!({ "message": "Transaction deleted successfully" })))
}
