use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::handler::transaction_handler::{
    create_transaction_handler, delete_transaction_handler, list_transactions_handler,
    update_transaction_handler,
};
use crate::middlewares::auth_middleware::{require_auth, AuthState};
use crate::service::transaction_service::TransactionServiceImpl;

pub fn transaction_router(
    service: Arc<TransactionServiceImpl>,
    auth_state: Arc<AuthState>,
) -> Router {
    Router::new()
        .route("/transactions", post(create_transaction_handler))
        .route("/transactions", get(list_transactions_handler))
        .route("/transactions/:id", put(update_transaction_handler))
        .route("/transactions/:id", delete(delete_transaction_handler))
        .route_layer(middleware::from_fn_with_state(auth_state, require_auth))
        .with_state(service)
}
