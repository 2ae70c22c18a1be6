use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use futures::stream::StreamExt;
use mongodb::options::FindOptions;
use tracing::{error, info};

use crate::model::profit::ProfitEntry;
use crate::repository::mongo::MongoGateway;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};

pub const COLLECTION: &str = "users_business_profit";

#[async_trait]
pub trait ProfitRepository: Send + Sync {
    async fn insert(&self, entry: ProfitEntry) -> RepositoryResult<ProfitEntry>;
    async fn list_by_user(&self, user_id: &str) -> RepositoryResult<Vec<ProfitEntry>>;
    async fn update(&self, user_id: &str, id: ObjectId, entry: ProfitEntry) -> RepositoryResult<()>;
    async fn delete(&self, user_id: &str, id: ObjectId) -> RepositoryResult<()>;
}

pub struct MongoProfitRepository {
    collection: mongodb::Collection<ProfitEntry>,
}

impl MongoProfitRepository {
    pub fn new(gateway: &MongoGateway) -> Self {
        MongoProfitRepository {
            collection: gateway.collection(COLLECTION),
        }
    }
}

#[async_trait]
impl ProfitRepository for MongoProfitRepository {
    async fn insert(&self, mut entry: ProfitEntry) -> RepositoryResult<ProfitEntry> {
        entry.id = Some(ObjectId::new());
        let now = chrono::Utc::now().to_rfc3339();
        entry.created_at = Some(now.clone());
        entry.updated_at = Some(now);
        match self.collection.insert_one(entry.clone(), None).await {
            Ok(_) => {
                info!("Profit entry inserted");
                Ok(entry)
            }
            Err(e) => {
                error!("Failed to insert profit entry: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to insert profit entry: {}",
                    e
                )))
            }
        }
    }

    async fn list_by_user(&self, user_id: &str) -> RepositoryResult<Vec<ProfitEntry>> {
        let filter = doc! { "user_id": user_id };
        let options = FindOptions::builder().sort(doc! { "date": -1 }).build();
        let cursor = self
            .collection
            .find(filter, options)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to list profit entries: {}", e)))?;

        let mut entries = Vec::new();
        let mut cursor = cursor;
        while let Some(entry) = cursor.next().await {
            match entry {
                Ok(e) => entries.push(e),
                Err(e) => {
                    error!("Failed to deserialize profit entry: {}", e);
                    return Err(RepositoryError::serialization(format!(
                        "Failed to deserialize profit entry: {}",
                        e
                    )));
                }
            }
        }
        info!("Fetched {} profit entries for user", entries.len());
        Ok(entries)
    }

    async fn update(&self, user_id: &str, id: ObjectId, entry: ProfitEntry) -> RepositoryResult<()> {
        let filter = doc! { "_id": id, "user_id": user_id };
        let mut fields = bson::to_document(&entry).map_err(|e| {
            RepositoryError::serialization(format!("Failed to serialize profit entry: {}", e))
        })?;
        fields.remove("_id");
        fields.remove("user_id");
        fields.remove("created_at");
        fields.insert("updated_at", chrono::Utc::now().to_rfc3339());

        let update = doc! { "$set": fields };
        let result = self
            .collection
            .update_one(filter, update, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to update profit entry: {}", e)))?;
        if result.matched_count == 0 {
            error!("No profit entry found to update for ID: {}", id);
            return Err(RepositoryError::not_found(format!(
                "No profit entry found for ID: {}",
                id
            )));
        }
        Ok(())
    }

    async fn delete(&self, user_id: &str, id: ObjectId) -> RepositoryResult<()> {
        let filter = doc! { "_id": id, "user_id": user_id };
        let result = self
            .collection
            .delete_one(filter, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to delete profit entry: {}", e)))?;
        if result.deleted_count == 0 {
            error!("No profit entry found to delete for ID: {}", id);
            return Err(RepositoryError::not_found(format!(
                "No profit entry found for ID: {}",
                id
            )));
        }
        Ok(())
    }
}
