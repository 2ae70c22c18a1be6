use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use futures::stream::StreamExt;
use mongodb::options::FindOptions;
use tracing::{error, info};

use crate::model::transaction::PersonalTransaction;
use crate::repository::mongo::MongoGateway;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};

pub const COLLECTION: &str = "users_transactions";

#[async_trait]
pub trait TransactionRepository: Send + Sync {
    async fn insert(&self, txn: PersonalTransaction) -> RepositoryResult<PersonalTransaction>;
    async fn list_by_user(&self, user_id: &str) -> RepositoryResult<Vec<PersonalTransaction>>;
    /// Expense transactions attributed to one of the given founders, used
    /// by the founder summary to compute invested capital.
    async fn list_founder_expenses(
        &self,
        user_id: &str,
        founders: &[String],
    ) -> RepositoryResult<Vec<PersonalTransaction>>;
    async fn update(
        &self,
        user_id: &str,
        id: ObjectId,
        txn: PersonalTransaction,
    ) -> RepositoryResult<()>;
    async fn delete(&self, user_id: &str, id: ObjectId) -> RepositoryResult<()>;
}

pub struct MongoTransactionRepository {
    collection: mongodb::Collection<PersonalTransaction>,
}

impl MongoTransactionRepository {
    pub fn new(gateway: &MongoGateway) -> Self {
        MongoTransactionRepository {
            collection: gateway.collection(COLLECTION),
        }
    }

    async fn drain(
        &self,
        mut cursor: mongodb::Cursor<PersonalTransaction>,
    ) -> RepositoryResult<Vec<PersonalTransaction>> {
        let mut txns = Vec::new();
        while let Some(txn) = cursor.next().await {
            match txn {
                Ok(t) => txns.push(t),
                Err(e) => {
                    error!("Failed to deserialize transaction: {}", e);
                    return Err(RepositoryError::serialization(format!(
                        "Failed to deserialize transaction: {}",
                        e
                    )));
                }
            }
        }
        Ok(txns)
    }
}

#[async_trait]
impl TransactionRepository for MongoTransactionRepository {
    async fn insert(&self, mut txn: PersonalTransaction) -> RepositoryResult<PersonalTransaction> {
        txn.id = Some(ObjectId::new());
        let now = chrono::Utc::now().to_rfc3339();
        txn.created_at = Some(now.clone());
        txn.updated_at = Some(now);
        match self.collection.insert_one(txn.clone(), None).await {
            Ok(_) => {
                info!("Transaction inserted");
                Ok(txn)
            }
            Err(e) => {
                error!("Failed to insert transaction: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to insert transaction: {}",
                    e
                )))
            }
        }
    }

    async fn list_by_user(&self, user_id: &str) -> RepositoryResult<Vec<PersonalTransaction>> {
        let filter = doc! { "user_id": user_id };
        let options = FindOptions::builder().sort(doc! { "date": -1 }).build();
        let cursor = self
            .collection
            .find(filter, options)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to list transactions: {}", e)))?;
        let txns = self.drain(cursor).await?;
        info!("Fetched {} transactions for user", txns.len());
        Ok(txns)
    }

    async fn list_founder_expenses(
        &self,
        user_id: &str,
        founders: &[String],
    ) -> RepositoryResult<Vec<PersonalTransaction>> {
        let filter = doc! {
            "user_id": user_id,
            "type": "expense",
            "payee": { "$in": founders.to_vec() },
        };
        let cursor = self.collection.find(filter, None).await.map_err(|e| {
            RepositoryError::database(format!("Failed to list founder expenses: {}", e))
        })?;
        self.drain(cursor).await
    }

    async fn update(
        &self,
        user_id: &str,
        id: ObjectId,
        txn: PersonalTransaction,
    ) -> RepositoryResult<()> {
        let filter = doc! { "_id": id, "user_id": user_id };
        let mut fields = bson::to_document(&txn)
            .map_err(|e| RepositoryError::serialization(format!("Failed to serialize transaction: {}", e)))?;
        fields.remove("_id");
        fields.remove("user_id");
        fields.remove("created_at");
        fields.insert("updated_at", chrono::Utc::now().to_rfc3339());

        let update = doc! { "$set": fields };
        let result = self
            .collection
            .update_one(filter, update, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to update transaction: {}", e)))?;
        if result.matched_count == 0 {
            error!("No transaction found to update for ID: {}", id);
            return Err(RepositoryError::not_found(format!(
                "No transaction found for ID: {}",
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
            .map_err(|e| RepositoryError::database(format!("Failed to delete transaction: {}", e)))?;
        if result.deleted_count == 0 {
            error!("No transaction found to delete for ID: {}", id);
            return Err(RepositoryError::not_found(format!(
                "No transaction found for ID: {}",
                id
            )));
        }
        Ok(())
    }
}
