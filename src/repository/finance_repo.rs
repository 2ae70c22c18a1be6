use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Document};
use tracing::{error, info};

use crate::model::finance_profile::FinanceProfile;
use crate::repository::mongo::MongoGateway;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};

pub const COLLECTION: &str = "users_finances";

#[async_trait]
pub trait FinanceRepository: Send + Sync {
    async fn insert(&self, profile: FinanceProfile) -> RepositoryResult<FinanceProfile>;
    async fn find_by_user(&self, user_id: &str) -> RepositoryResult<Option<FinanceProfile>>;
    /// Partial merge of arbitrary settings into the owner's profile.
    async fn merge_by_user(&self, user_id: &str, fields: Document) -> RepositoryResult<()>;
}

pub struct MongoFinanceRepository {
    collection: mongodb::Collection<FinanceProfile>,
}

impl MongoFinanceRepository {
    pub fn new(gateway: &MongoGateway) -> Self {
        MongoFinanceRepository {
            collection: gateway.collection(COLLECTION),
        }
    }
}

#[async_trait]
impl FinanceRepository for MongoFinanceRepository {
    async fn insert(&self, mut profile: FinanceProfile) -> RepositoryResult<FinanceProfile> {
        profile.id = Some(ObjectId::new());
        let now = chrono::Utc::now().to_rfc3339();
        profile.created_at = Some(now.clone());
        profile.updated_at = Some(now);
        match self.collection.insert_one(profile.clone(), None).await {
            Ok(_) => {
                info!("Finance profile inserted for user: {}", profile.user_id);
                Ok(profile)
            }
            Err(e) => {
                error!("Failed to insert finance profile: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to insert finance profile: {}",
                    e
                )))
            }
        }
    }

    async fn find_by_user(&self, user_id: &str) -> RepositoryResult<Option<FinanceProfile>> {
        let filter = doc! { "user_id": user_id };
        let profile = self.collection.find_one(filter, None).await.map_err(|e| {
            RepositoryError::database(format!("Failed to find finance profile: {}", e))
        })?;
        Ok(profile)
    }

    async fn merge_by_user(&self, user_id: &str, mut fields: Document) -> RepositoryResult<()> {
        // The id and owner are never client-writable.
        fields.remove("_id");
        fields.remove("user_id");
        fields.insert("updated_at", chrono::Utc::now().to_rfc3339());

        let filter = doc! { "user_id": user_id };
        let update = doc! { "$set": fields };
        let result = self
            .collection
            .update_one(filter, update, None)
            .await
            .map_err(|e| {
                RepositoryError::database(format!("Failed to update finance profile: {}", e))
            })?;
        if result.matched_count == 0 {
            error!("No finance profile found for user: {}", user_id);
            return Err(RepositoryError::not_found(format!(
                "No finance profile found for user: {}",
                user_id
            )));
        }
        Ok(())
    }
}
