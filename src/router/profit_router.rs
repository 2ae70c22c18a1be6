use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::handler::profit_handler::{
    create_profit_handler, delete_profit_handler, list_profits_handler, update_profit_handler,
};
use crate::middlewares::auth_middleware::{require_auth, AuthState};
use crate::service::profit_service::ProfitServiceImpl;

pub fn profit_router(service: Arc<ProfitServiceImpl>, auth_state: Arc<AuthState>) -> Router {
    Router::new()
        .route("/business-profit", post(create_profit_handler))
        .route("/business-profit", get(list_profits_handler))
        .route("/business-profit/:id", put(update_profit_handler))
        .route("/business-profit/:id", delete(delete_profit_handler))
        .route_layer(middleware::from_fn_with_state(auth_state, require_auth))
        .with_state(service)
}
