use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Baseline monthly expenditure written into every profile at signup.
pub const DEFAULT_MONTHLY_EXPENDITURE: f64 = 0.0;

/// Per-user finance settings. Created once at signup, mutated by partial
/// merge, so anything beyond the known fields is kept in `settings`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinanceProfile {
    #[serde(rename = "_id")]
    pub id: Option<ObjectId>,
    pub user_id: String,
    pub monthly_expenditure: f64,
    #[serde(flatten)]
    pub settings: bson::Document,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl FinanceProfile {
    pub fn new(user_id: String) -> Self {
        FinanceProfile {
            id: None,
            user_id,
            monthly_expenditure: DEFAULT_MONTHLY_EXPENDITURE,
            settings: bson::Document::new(),
            created_at: None,
            updated_at: None,
        }
    }
}
