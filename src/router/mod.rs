pub mod auth_router;
pub mod finance_router;
pub mod founder_router;
pub mod profit_router;
pub mod transaction_router;
