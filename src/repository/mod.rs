pub mod finance_repo;
pub mod founder_transaction_repo;
pub mod mongo;
pub mod profit_repo;
pub mod repository_error;
pub mod transaction_repo;
pub mod user_repo;
