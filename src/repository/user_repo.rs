use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use tracing::{error, info};

use crate::model::user::User;
use crate::repository::mongo::MongoGateway;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};

pub const COLLECTION: &str = "users";

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert(&self, user: User) -> RepositoryResult<User>;
    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<User>>;
    async fn delete(&self, id: &ObjectId) -> RepositoryResult<()>;
}

pub struct MongoUserRepository {
    collection: mongodb::Collection<User>,
}

impl MongoUserRepository {
    pub fn new(gateway: &MongoGateway) -> Self {
        MongoUserRepository {
            collection: gateway.collection(COLLECTION),
        }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn insert(&self, mut user: User) -> RepositoryResult<User> {
        user.id = Some(ObjectId::new());
        let now = chrono::Utc::now().to_rfc3339();
        user.created_at = Some(now.clone());
        user.updated_at = Some(now);
        match self.collection.insert_one(user.clone(), None).await {
            Ok(_) => {
                info!("User inserted");
                Ok(user)
            }
            Err(e) => {
                error!("Failed to insert user: {}", e);
                // Duplicate email surfaces as AlreadyExists via the unique index
                Err(RepositoryError::from(e))
            }
        }
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        let filter = doc! { "email": email };
        let user = self
            .collection
            .find_one(filter, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to find user by email: {}", e)))?;
        Ok(user)
    }

    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<User>> {
        let filter = doc! { "_id": id };
        let user = self
            .collection
            .find_one(filter, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to find user by id: {}", e)))?;
        Ok(user)
    }

    async fn delete(&self, id: &ObjectId) -> RepositoryResult<()> {
        let filter = doc! { "_id": id };
        let result = self
            .collection
            .delete_one(filter, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to delete user: {}", e)))?;
        if result.deleted_count == 0 {
            return Err(RepositoryError::not_found(format!(
                "No user found to delete for ID: {}",
                id
            )));
        }
        Ok(())
    }
}
