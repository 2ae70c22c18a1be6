use bson::oid::ObjectId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Kind-dependent payload of a founder transaction. Modeled as a tagged
/// union so a salary can never carry reimbursement fields and vice versa;
/// the flat document shape (discriminator in `type`, variant fields at the
/// top level) is preserved on the wire and in storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FounderTransactionKind {
    Reimbursement { paid_by: String, paid_to: String },
    Salary { payee: String },
}

impl FounderTransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FounderTransactionKind::Reimbursement { .. } => "reimbursement",
            FounderTransactionKind::Salary { .. } => "salary",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FounderTransaction {
    #[serde(rename = "_id")]
    pub id: Option<ObjectId>,
    pub user_id: String,
    pub amount: f64,
    pub date: NaiveDate,
    #[serde(flatten)]
    pub kind: FounderTransactionKind,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}
