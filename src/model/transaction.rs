use bson::oid::ObjectId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

/// A personal income or expense record. `payee` attributes an expense to a
/// founder so the founder summary can count it as invested capital.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalTransaction {
    #[serde(rename = "_id")]
    pub id: Option<ObjectId>,
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: f64,
    pub date: NaiveDate,
    pub category: String,
    pub details: Option<String>,
    pub payee: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}
