use bson::oid::ObjectId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfitEntry {
    #[serde(rename = "_id")]
    pub id: Option<ObjectId>,
    pub user_id: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub details: Option<String>,
    pub category: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}
