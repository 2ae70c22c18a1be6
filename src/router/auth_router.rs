use std::sync::Arc;

use axum::{routing::post, Router};

use crate::handler::auth_handler::{login_handler, refresh_token_handler, signup_handler};
use crate::service::auth_service::AuthServiceImpl;

pub fn auth_router(service: Arc<AuthServiceImpl>) -> Router {
    Router::new()
        .route("/auth/signup", post(signup_handler))
        .route("/auth/login", post(login_handler))
        .route("/auth/refresh", post(refresh_token_handler))
        .with_state(service)
}
