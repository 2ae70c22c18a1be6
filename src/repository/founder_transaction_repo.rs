use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use futures::stream::StreamExt;
use mongodb::options::FindOptions;
use tracing::{error, info};

use crate::model::founder_transaction::{FounderTransaction, FounderTransactionKind};
use crate::repository::mongo::MongoGateway;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};

pub const COLLECTION: &str = "founders_transactions";

#[async_trait]
pub trait FounderTransactionRepository: Send + Sync {
    async fn insert(&self, txn: FounderTransaction) -> RepositoryResult<FounderTransaction>;
    async fn list_by_user(&self, user_id: &str) -> RepositoryResult<Vec<FounderTransaction>>;
    async fn update(
        &self,
        user_id: &str,
        id: ObjectId,
        txn: FounderTransaction,
    ) -> RepositoryResult<()>;
    async fn delete(&self, user_id: &str, id: ObjectId) -> RepositoryResult<()>;
}

pub struct MongoFounderTransactionRepository {
    collection: mongodb::Collection<FounderTransaction>,
}

impl MongoFounderTransactionRepository {
    pub fn new(gateway: &MongoGateway) -> Self {
        MongoFounderTransactionRepository {
            collection: gateway.collection(COLLECTION),
        }
    }
}

/// Build the `$set`/`$unset` document for an owner-scoped edit. The other
/// kind's fields are unset in the same operation, so a kind switch can never
/// leave stale fields behind.
fn build_update(
    txn: &FounderTransaction,
    updated_at: String,
) -> RepositoryResult<bson::Document> {
    let mut fields = bson::to_document(txn).map_err(|e| {
        RepositoryError::serialization(format!("Failed to serialize founder transaction: {}", e))
    })?;
    fields.remove("_id");
    fields.remove("user_id");
    fields.remove("created_at");
    fields.insert("updated_at", updated_at);

    let unset = match txn.kind {
        FounderTransactionKind::Reimbursement { .. } => doc! { "payee": "" },
        FounderTransactionKind::Salary { .. } => doc! { "paid_by": "", "paid_to": "" },
    };

    Ok(doc! { "$set": fields, "$unset": unset })
}

#[async_trait]
impl FounderTransactionRepository for MongoFounderTransactionRepository {
    async fn insert(&self, mut txn: FounderTransaction) -> RepositoryResult<FounderTransaction> {
        txn.id = Some(ObjectId::new());
        let now = chrono::Utc::now().to_rfc3339();
        txn.created_at = Some(now.clone());
        txn.updated_at = Some(now);
        match self.collection.insert_one(txn.clone(), None).await {
            Ok(_) => {
                info!("Founder transaction inserted");
                Ok(txn)
            }
            Err(e) => {
                error!("Failed to insert founder transaction: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to insert founder transaction: {}",
                    e
                )))
            }
        }
    }

    async fn list_by_user(&self, user_id: &str) -> RepositoryResult<Vec<FounderTransaction>> {
        let filter = doc! { "user_id": user_id };
        let options = FindOptions::builder().sort(doc! { "date": -1 }).build();
        let mut cursor = self.collection.find(filter, options).await.map_err(|e| {
            RepositoryError::database(format!("Failed to list founder transactions: {}", e))
        })?;

        let mut txns = Vec::new();
        while let Some(txn) = cursor.next().await {
            match txn {
                Ok(t) => txns.push(t),
                Err(e) => {
                    error!("Failed to deserialize founder transaction: {}", e);
                    return Err(RepositoryError::serialization(format!(
                        "Failed to deserialize founder transaction: {}",
                        e
                    )));
                }
            }
        }
        info!("Fetched {} founder transactions for user", txns.len());
        Ok(txns)
    }

    async fn update(
        &self,
        user_id: &str,
        id: ObjectId,
        txn: FounderTransaction,
    ) -> RepositoryResult<()> {
        let filter = doc! { "_id": id, "user_id": user_id };
        let update = build_update(&txn, chrono::Utc::now().to_rfc3339())?;
        let result = self
            .collection
            .update_one(filter, update, None)
            .await
            .map_err(|e| {
                RepositoryError::database(format!("Failed to update founder transaction: {}", e))
            })?;
        if result.matched_count == 0 {
            error!("No founder transaction found to update for ID: {}", id);
            return Err(RepositoryError::not_found(format!(
                "No founder transaction found for ID: {}",
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
            .map_err(|e| {
                RepositoryError::database(format!("Failed to delete founder transaction: {}", e))
            })?;
        if result.deleted_count == 0 {
            error!("No founder transaction found to delete for ID: {}", id);
            return Err(RepositoryError::not_found(format!(
                "No founder transaction found for ID: {}",
                id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn txn(kind: FounderTransactionKind) -> FounderTransaction {
        FounderTransaction {
            id: Some(ObjectId::new()),
            user_id: "u1".to_string(),
            amount: 75.0,
            date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            kind,
            created_at: Some("2024-01-01T00:00:00Z".to_string()),
            updated_at: None,
        }
    }

    #[test]
    fn test_build_update_reimbursement_unsets_salary_fields() {
        let update = build_update(
            &txn(FounderTransactionKind::Reimbursement {
                paid_by: "Bob".to_string(),
                paid_to: "Alice".to_string(),
            }),
            "2024-04-02T00:00:00Z".to_string(),
        )
        .unwrap();

        let set = update.get_document("$set").unwrap();
        assert_eq!(set.get_str("type").unwrap(), "reimbursement");
        assert_eq!(set.get_str("paid_by").unwrap(), "Bob");
        assert_eq!(set.get_str("paid_to").unwrap(), "Alice");
        assert_eq!(set.get_str("updated_at").unwrap(), "2024-04-02T00:00:00Z");
        // The id, owner and creation stamp are never client-writable.
        assert!(!set.contains_key("_id"));
        assert!(!set.contains_key("user_id"));
        assert!(!set.contains_key("created_at"));

        let unset = update.get_document("$unset").unwrap();
        assert!(unset.contains_key("payee"));
        assert!(!unset.contains_key("paid_by"));
        assert!(!unset.contains_key("paid_to"));
    }

    #[test]
    fn test_build_update_salary_unsets_reimbursement_fields() {
        let update = build_update(
            &txn(FounderTransactionKind::Salary {
                payee: "Alice".to_string(),
            }),
            "2024-04-02T00:00:00Z".to_string(),
        )
        .unwrap();

        let set = update.get_document("$set").unwrap();
        assert_eq!(set.get_str("type").unwrap(), "salary");
        assert_eq!(set.get_str("payee").unwrap(), "Alice");
        assert!(!set.contains_key("paid_by"));
        assert!(!set.contains_key("paid_to"));

        let unset = update.get_document("$unset").unwrap();
        assert!(unset.contains_key("paid_by"));
        assert!(unset.contains_key("paid_to"));
        assert!(!unset.contains_key("payee"));
    }
}
