use std::sync::Arc;

use axum::{
    extract::{Json, State},
    response::IntoResponse,
};
use serde::Deserialize;
use validator::Validate;

use crate::service::auth_service::{AuthService, AuthServiceImpl};
use crate::util::error::HandlerError;

#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 10))]
    pub refresh_token: String,
}

pub async fn signup_handler(
    State(service): State<Arc<AuthServiceImpl>>,
    Json(payload): Json<SignupRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    if let Err(e) = payload.validate() {
        return Err(HandlerError::bad_request(format!("Validation error: {}", e)));
    }
    let res = service.register(payload.email, payload.password).await?;
    Ok(Json(res))
}

pub async fn login_handler(
    State(service): State<Arc<AuthServiceImpl>>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    if let Err(e) = payload.validate() {
        return Err(HandlerError::bad_request(format!("Validation error: {}", e)));
    }
    let res = service.login(payload.email, payload.password).await?;
    Ok(Json(res))
}

pub async fn refresh_token_handler(
    State(service): State<Arc<AuthServiceImpl>>,
    Json(payload): Json<RefreshTokenRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    if let Err(e) = payload.validate() {
        return Err(HandlerError::bad_request(format!("Validation error: {}", e)));
    }
    let res = service.refresh_token(payload.refresh_token).await?;
    Ok(Json(res))
}
