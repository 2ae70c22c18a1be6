use std::sync::Arc;

use axum::{
    extract::{Json, State},
    response::IntoResponse,
    Extension,
};

use crate::middlewares::auth_middleware::CurrentUser;
use crate::service::finance_service::{FinanceService, FinanceServiceImpl};
use crate::util::error::HandlerError;

pub async fn get_finances_handler(
    State(service): State<Arc<FinanceServiceImpl>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<impl IntoResponse, HandlerError> {
    let res = service.get(&user.id).await?;
    Ok(Json(res))
}

/// Partial merge of arbitrary settings into the caller's finance profile.
pub async fn update_finances_handler(
    State(service): State<Arc<FinanceServiceImpl>>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<serde_json::Map<String, serde_json::Value>>,
) -> Result<impl IntoResponse, HandlerError> {
    let fields = bson::to_document(&payload)
        .map_err(|e| HandlerError::bad_request(format!("Invalid payload: {}", e)))?;
    let res = service.merge(&user.id, fields).await?;
    Ok(Json(res))
}
