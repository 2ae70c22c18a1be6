use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{error, info, instrument};

use crate::model::transaction::{PersonalTransaction, TransactionKind};
use crate::repository::transaction_repo::{MongoTransactionRepository, TransactionRepository};
use crate::service::parse_date;
use crate::util::error::ServiceError;

/// Raw create/update payload; kind and date are validated here.
#[derive(Debug, Clone)]
pub struct TransactionInput {
    pub kind: String,
    pub amount: f64,
    pub date: String,
    pub category: String,
    pub details: Option<String>,
    pub payee: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionResponse {
    pub id: String,
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

impl From<PersonalTransaction> for TransactionResponse {
    fn from(txn: PersonalTransaction) -> Self {
        TransactionResponse {
            id: txn.id.map(|id| id.to_hex()).unwrap_or_default(),
            user_id: txn.user_id,
            kind: txn.kind,
            amount: txn.amount,
            date: txn.date,
            category: txn.category,
            details: txn.details,
            payee: txn.payee,
            created_at: txn.created_at,
            updated_at: txn.updated_at,
        }
    }
}

#[async_trait]
pub trait TransactionService: Send + Sync {
    async fn create(
        &self,
        user_id: &str,
        input: TransactionInput,
    ) -> Result<TransactionResponse, ServiceError>;
    async fn list(&self, user_id: &str) -> Result<Vec<TransactionResponse>, ServiceError>;
    async fn update(
        &self,
        user_id: &str,
        id: &str,
        input: TransactionInput,
    ) -> Result<(), ServiceError>;
    async fn delete(&self, user_id: &str, id: &str) -> Result<(), ServiceError>;
}

pub struct TransactionServiceImpl {
    pub transaction_repo: Arc<MongoTransactionRepository>,
}

impl TransactionServiceImpl {
    pub fn new(transaction_repo: Arc<MongoTransactionRepository>) -> Self {
        Self { transaction_repo }
    }

    fn build(&self, user_id: &str, input: TransactionInput) -> Result<PersonalTransaction, ServiceError> {
        let kind = match input.kind.as_str() {
            "income" => TransactionKind::Income,
            "expense" => TransactionKind::Expense,
            other => {
                return Err(ServiceError::InvalidInput(format!(
                    "type must be 'income' or 'expense', got '{}'",
                    other
                )))
            }
        };
        let date = parse_date(&input.date)?;
        Ok(PersonalTransaction {
            id: None,
            user_id: user_id.to_string(),
            kind,
            amount: input.amount,
            date,
            category: input.category,
            details: input.details,
            payee: input.payee,
            created_at: None,
            updated_at: None,
        })
    }
}

fn parse_id(id: &str) -> Result<ObjectId, ServiceError> {
    ObjectId::parse_str(id)
        .map_err(|_| ServiceError::InvalidInput(format!("Invalid transaction id: {}", id)))
}

#[async_trait]
impl TransactionService for TransactionServiceImpl {
    #[instrument(skip(self, input), fields(user_id = %user_id))]
    async fn create(
        &self,
        user_id: &str,
        input: TransactionInput,
    ) -> Result<TransactionResponse, ServiceError> {
        info!("Creating transaction");
        let txn = self.build(user_id, input)?;
        let inserted = self.transaction_repo.insert(txn).await;
        match &inserted {
            Ok(_) => info!("Transaction created successfully"),
            Err(e) => error!("Failed to create transaction: {e}"),
        }
        Ok(inserted.map_err(ServiceError::from)?.into())
    }

    #[instrument(skip(self), fields(user_id = %user_id))]
    async fn list(&self, user_id: &str) -> Result<Vec<TransactionResponse>, ServiceError> {
        info!("Listing transactions");
        let txns = self
            .transaction_repo
            .list_by_user(user_id)
            .await
            .map_err(ServiceError::from)?;
        Ok(txns.into_iter().map(TransactionResponse::from).collect())
    }

    #[instrument(skip(self, input), fields(user_id = %user_id, id = %id))]
    async fn update(
        &self,
        user_id: &str,
        id: &str,
        input: TransactionInput,
    ) -> Result<(), ServiceError> {
        info!("Updating transaction");
        let oid = parse_id(id)?;
        let txn = self.build(user_id, input)?;
        let res = self.transaction_repo.update(user_id, oid, txn).await;
        match &res {
            Ok(_) => info!("Transaction updated successfully"),
            Err(e) => error!("Failed to update transaction: {e}"),
        }
        res.map_err(ServiceError::from)
    }

    #[instrument(skip(self), fields(user_id = %user_id, id = %id))]
    async fn delete(&self, user_id: &str, id: &str) -> Result<(), ServiceError> {
        info!("Deleting transaction");
        let oid = parse_id(id)?;
        let res = self.transaction_repo.delete(user_id, oid).await;
        match &res {
            Ok(_) => info!("Transaction deleted successfully"),
            Err(e) => error!("Failed to delete transaction: {e}"),
        }
        res.map_err(ServiceError::from)
    }
}
