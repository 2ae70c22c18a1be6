pub mod finance_profile;
pub mod founder_transaction;
pub mod profit;
pub mod transaction;
pub mod user;
