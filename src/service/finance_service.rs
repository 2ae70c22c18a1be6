use std::sync::Arc;

use async_trait::async_trait;
use bson::Document;
use serde::Serialize;
use tracing::{error, info, instrument};

use crate::model::finance_profile::FinanceProfile;
use crate::repository::finance_repo::{FinanceRepository, MongoFinanceRepository};
use crate::util::error::ServiceError;

#[derive(Debug, Clone, Serialize)]
pub struct FinanceProfileResponse {
    pub id: String,
    pub user_id: String,
    pub monthly_expenditure: f64,
    #[serde(flatten)]
    pub settings: Document,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<FinanceProfile> for FinanceProfileResponse {
    fn from(profile: FinanceProfile) -> Self {
        FinanceProfileResponse {
            id: profile.id.map(|id| id.to_hex()).unwrap_or_default(),
            user_id: profile.user_id,
            monthly_expenditure: profile.monthly_expenditure,
            settings: profile.settings,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}

#[async_trait]
pub trait FinanceService: Send + Sync {
    async fn get(&self, user_id: &str) -> Result<FinanceProfileResponse, ServiceError>;
    async fn merge(
        &self,
        user_id: &str,
        fields: Document,
    ) -> Result<FinanceProfileResponse, ServiceError>;
}

pub struct FinanceServiceImpl {
    pub finance_repo: Arc<MongoFinanceRepository>,
}

impl FinanceServiceImpl {
    pub fn new(finance_repo: Arc<MongoFinanceRepository>) -> Self {
        Self { finance_repo }
    }
}

#[async_trait]
impl FinanceService for FinanceServiceImpl {
    #[instrument(skip(self), fields(user_id = %user_id))]
    async fn get(&self, user_id: &str) -> Result<FinanceProfileResponse, ServiceError> {
        info!("Fetching finance profile");
        let profile = self
            .finance_repo
            .find_by_user(user_id)
            .await
            .map_err(ServiceError::from)?
            .ok_or_else(|| {
                error!("Finance profile not found for user");
                ServiceError::NotFound("User finance data not found".to_string())
            })?;
        Ok(profile.into())
    }

    #[instrument(skip(self, fields), fields(user_id = %user_id))]
    async fn merge(
        &self,
        user_id: &str,
        fields: Document,
    ) -> Result<FinanceProfileResponse, ServiceError> {
        info!("Merging finance profile settings");
        self.finance_repo
            .merge_by_user(user_id, fields)
            .await
            .map_err(ServiceError::from)?;
        self.get(user_id).await
    }
}
