use std::sync::Arc;

use axum::{
    extract::{Json, Path, State},
    response::IntoResponse,
    Extension,
};
use serde::Deserialize;

use crate::middlewares::auth_middleware::CurrentUser;
use crate::service::profit_service::{ProfitInput, ProfitService, ProfitServiceImpl};
use crate::util::error::HandlerError;

#[derive(Debug, Deserialize)]
pub struct ProfitRequest {
    pub amount: f64,
    pub date: String,
    pub details: Option<String>,
    pub category: Option<String>,
}

impl From<ProfitRequest> for ProfitInput {
    fn from(req: ProfitRequest) -> Self {
        ProfitInput {
            amount: req.amount,
            date: req.date,
            details: req.details,
            category: req.category,
        }
    }
}

pub async fn create_profit_handler(
    State(service): State<Arc<ProfitServiceImpl>>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<ProfitRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let res = service.create(&user.id, payload.into()).await?;
    Ok(Json(res))
}

pub async fn list_profits_handler(
    State(service): State<Arc<ProfitServiceImpl>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<impl IntoResponse, HandlerError> {
    let res = service.list(&user.id).await?;
    Ok(Json(res))
}

pub async fn update_profit_handler(
    State(service): State<Arc<ProfitServiceImpl>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<ProfitRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    service.update(&user.id, &id, payload.into()).await?;
    Ok(Json(serde_json::json!({ "message": "Profit entry updated successfully" })))
}

pub async fn delete_profit_handler(
    State(service): State<Arc<ProfitServiceImpl>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    service.delete(&user.id, &id).await?;
    Ok(Json(serde_json::json!({ "message": "Profit entry deleted successfully" })))
}
