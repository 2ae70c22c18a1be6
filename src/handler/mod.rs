pub mod auth_handler;
pub mod finance_handler;
pub mod founder_handler;
pub mod profit_handler;
pub mod transaction_handler;
