use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::handler::founder_handler::{
    create_founder_transaction_handler, delete_founder_transaction_handler,
    founder_ledger_handler, update_founder_transaction_handler,
};
use crate::middlewares::auth_middleware::{require_auth, AuthState};
use crate::service::founder_service::FounderServiceImpl;

pub fn founder_router(service: Arc<FounderServiceImpl>, auth_state: Arc<AuthState>) -> Router {
    Router::new()
        .route(
            "/founders-transactions",
            post(create_founder_transaction_handler),
        )
        .route("/founders-transactions", get(founder_ledger_handler))
        .route(
            "/founders-transactions/:id",
            put(update_founder_transaction_handler),
        )
        .route(
            "/founders-transactions/:id",
            delete(delete_founder_transaction_handler),
        )
        .route_layer(middleware::from_fn_with_state(auth_state, require_auth))
        .with_state(service)
}
