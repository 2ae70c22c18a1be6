use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, put},
    Router,
};

use crate::handler::finance_handler::{get_finances_handler, update_finances_handler};
use crate::middlewares::auth_middleware::{require_auth, AuthState};
use crate::service::finance_service::FinanceServiceImpl;

pub fn finance_router(service: Arc<FinanceServiceImpl>, auth_state: Arc<AuthState>) -> Router {
    Router::new()
        .route("/finances", get(get_finances_handler))
        .route("/finances", put(update_finances_handler))
        .route_layer(middleware::from_fn_with_state(auth_state, require_auth))
        .with_state(service)
}
