use std::sync::Arc;

use axum::{
    extract::{Json, Path, State},
    response::IntoResponse,
    Extension,
};
use serde::Deserialize;
use validator::Validate;

use crate::middlewares::auth_middleware::CurrentUser;
use crate::service::transaction_service::{
    TransactionInput, TransactionService, TransactionServiceImpl,
};
use crate::util::error::HandlerError;

#[derive(Debug, Deserialize, Validate)]
pub struct TransactionRequest {
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: f64,
    pub date: String,
    #[validate(length(min = 1, max = 100))]
    pub category: String,
    pub details: Option<String>,
    pub payee: Option<String>,
}

impl From<TransactionRequest> for TransactionInput {
    fn from(req: TransactionRequest) -> Self {
        TransactionInput {
            kind: req.kind,
            amount: req.amount,
            date: req.date,
            category: req.category,
            details: req.details,
            payee: req.payee,
        }
    }
}

pub async fn create_transaction_handler(
    State(service): State<Arc<TransactionServiceImpl>>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<TransactionRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    if let Err(e) = payload.validate() {
        return Err(HandlerError::bad_request(format!("Validation error: {}", e)));
    }
    let res = service.create(&user.id, payload.into()).await?;
    Ok(Json(res))
}

pub async fn list_transactions_handler(
    State(service): State<Arc<TransactionServiceImpl>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<impl IntoResponse, HandlerError> {
    let res = service.list(&user.id).await?;
    Ok(Json(res))
}

pub async fn update_transaction_handler(
    State(service): State<Arc<TransactionServiceImpl>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<TransactionRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    if let Err(e) = payload.validate() {
        return Err(HandlerError::bad_request(format!("Validation error: {}", e)));
    }
    service.update(&user.id, &id, payload.into()).await?;
    Ok(Json(serde_json::json!({ "message": "Transaction updated successfully" })))
}

pub async fn delete_transaction_handler(
    State(service): State<Arc<TransactionServiceImpl>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    service.delete(&user.id, &id).await?;
    Ok(Json(serde_json::json!({ "message": "Transaction deleted successfully" })))
}
