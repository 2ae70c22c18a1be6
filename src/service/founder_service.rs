use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{error, info, instrument};

use crate::config::FoundersConfig;
use crate::model::founder_transaction::{FounderTransaction, FounderTransactionKind};
use crate::model::transaction::PersonalTransaction;
use crate::repository::founder_transaction_repo::{
    FounderTransactionRepository, MongoFounderTransactionRepository,
};
use crate::repository::transaction_repo::{MongoTransactionRepository, TransactionRepository};
use crate::service::{parse_date, round2};
use crate::util::error::ServiceError;

/// Raw create/update payload; kind, founder names and date are validated here.
#[derive(Debug, Clone)]
pub struct FounderTransactionInput {
    pub kind: String,
    pub amount: f64,
    pub date: String,
    pub paid_by: Option<String>,
    pub paid_to: Option<String>,
    pub payee: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FounderTransactionResponse {
    pub id: String,
    pub user_id: String,
    pub amount: f64,
    pub date: NaiveDate,
    #[serde(flatten)]
    pub kind: FounderTransactionKind,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<FounderTransaction> for FounderTransactionResponse {
    fn from(txn: FounderTransaction) -> Self {
        FounderTransactionResponse {
            id: txn.id.map(|id| id.to_hex()).unwrap_or_default(),
            user_id: txn.user_id,
            amount: txn.amount,
            date: txn.date,
            kind: txn.kind,
            created_at: txn.created_at,
            updated_at: txn.updated_at,
        }
    }
}

/// Per-founder financial position, all amounts rounded to 2 decimal places.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FounderSummary {
    pub total_invested: f64,
    pub reimbursements_received: f64,
    pub reimbursements_made: f64,
    pub salary_taken: f64,
    pub exact_payment: f64,
    pub net_contribution: f64,
}

/// The founder-transactions list response: derived summary plus the raw
/// transactions partitioned by kind, date descending.
#[derive(Debug, Clone, Serialize)]
pub struct FounderLedger {
    pub founders_summary: BTreeMap<String, FounderSummary>,
    pub reimbursements: Vec<FounderTransactionResponse>,
    pub salaries: Vec<FounderTransactionResponse>,
}

/// Compute the per-founder summary from the two independent record sets.
/// Pure; recomputed on every request.
pub fn summarize(
    founders: &[String],
    founder_txns: &[FounderTransaction],
    invested_expenses: &[PersonalTransaction],
) -> BTreeMap<String, FounderSummary> {
    let mut summary = BTreeMap::new();
    for founder in founders {
        let total_invested: f64 = invested_expenses
            .iter()
            .filter(|t| t.payee.as_deref() == Some(founder.as_str()))
            .map(|t| t.amount)
            .sum();

        let mut reimbursements_received = 0.0;
        let mut reimbursements_made = 0.0;
        let mut salary_taken = 0.0;
        for txn in founder_txns {
            match &txn.kind {
                FounderTransactionKind::Reimbursement { paid_by, paid_to } => {
                    if paid_to == founder {
                        reimbursements_received += txn.amount;
                    }
                    if paid_by == founder {
                        reimbursements_made += txn.amount;
                    }
                }
                FounderTransactionKind::Salary { payee } => {
                    if payee == founder {
                        salary_taken += txn.amount;
                    }
                }
            }
        }

        // Out-of-pocket position after netting reimbursements.
        let exact_payment = total_invested - reimbursements_received + reimbursements_made;
        // Positive means the founder withdrew more salary than they put in.
        let net_contribution = salary_taken - exact_payment;

        summary.insert(
            founder.clone(),
            FounderSummary {
                total_invested: round2(total_invested),
                reimbursements_received: round2(reimbursements_received),
                reimbursements_made: round2(reimbursements_made),
                salary_taken: round2(salary_taken),
                exact_payment: round2(exact_payment),
                net_contribution: round2(net_contribution),
            },
        );
    }
    summary
}

#[async_trait]
pub trait FounderService: Send + Sync {
    async fn create(
        &self,
        user_id: &str,
        input: FounderTransactionInput,
    ) -> Result<FounderTransactionResponse, ServiceError>;
    async fn ledger(&self, user_id: &str) -> Result<FounderLedger, ServiceError>;
    async fn update(
        &self,
        user_id: &str,
        id: &str,
        input: FounderTransactionInput,
    ) -> Result<(), ServiceError>;
    async fn delete(&self, user_id: &str, id: &str) -> Result<(), ServiceError>;
}

pub struct FounderServiceImpl {
    pub founder_repo: Arc<MongoFounderTransactionRepository>,
    pub transaction_repo: Arc<MongoTransactionRepository>,
    pub founders: FoundersConfig,
}

impl FounderServiceImpl {
    pub fn new(
        founder_repo: Arc<MongoFounderTransactionRepository>,
        transaction_repo: Arc<MongoTransactionRepository>,
        founders: FoundersConfig,
    ) -> Self {
        Self {
            founder_repo,
            transaction_repo,
            founders,
        }
    }

    fn require_founder(&self, field: &str, value: Option<String>) -> Result<String, ServiceError> {
        let name = value.ok_or_else(|| {
            ServiceError::InvalidInput(format!("{} is required", field))
        })?;
        if !self.founders.contains(&name) {
            return Err(ServiceError::InvalidInput(format!(
                "{} must be one of {:?}",
                field, self.founders.founders
            )));
        }
        Ok(name)
    }

    fn build(
        &self,
        user_id: &str,
        input: FounderTransactionInput,
    ) -> Result<FounderTransaction, ServiceError> {
        let kind = match input.kind.as_str() {
            "reimbursement" => FounderTransactionKind::Reimbursement {
                paid_by: self.require_founder("paid_by", input.paid_by)?,
                paid_to: self.require_founder("paid_to", input.paid_to)?,
            },
            "salary" => FounderTransactionKind::Salary {
                payee: self.require_founder("payee", input.payee)?,
            },
            other => {
                return Err(ServiceError::InvalidInput(format!(
                    "type must be 'reimbursement' or 'salary', got '{}'",
                    other
                )))
            }
        };
        let date = parse_date(&input.date)?;
        Ok(FounderTransaction {
            id: None,
            user_id: user_id.to_string(),
            amount: input.amount,
            date,
            kind,
            created_at: None,
            updated_at: None,
        })
    }
}

fn parse_id(id: &str) -> Result<ObjectId, ServiceError> {
    ObjectId::parse_str(id)
        .map_err(|_| ServiceError::InvalidInput(format!("Invalid founder transaction id: {}", id)))
}

#[async_trait]
impl FounderService for FounderServiceImpl {
    #[instrument(skip(self, input), fields(user_id = %user_id))]
    async fn create(
        &self,
        user_id: &str,
        input: FounderTransactionInput,
    ) -> Result<FounderTransactionResponse, ServiceError> {
        info!("Creating founder transaction");
        let txn = self.build(user_id, input)?;
        let inserted = self.founder_repo.insert(txn).await;
        match &inserted {
            Ok(_) => info!("Founder transaction created successfully"),
            Err(e) => error!("Failed to create founder transaction: {e}"),
        }
        Ok(inserted.map_err(ServiceError::from)?.into())
    }

    #[instrument(skip(self), fields(user_id = %user_id))]
    async fn ledger(&self, user_id: &str) -> Result<FounderLedger, ServiceError> {
        info!("Building founder ledger");
        let founder_txns = self
            .founder_repo
            .list_by_user(user_id)
            .await
            .map_err(ServiceError::from)?;
        let invested = self
            .transaction_repo
            .list_founder_expenses(user_id, &self.founders.founders)
            .await
            .map_err(ServiceError::from)?;

        let founders_summary = summarize(&self.founders.founders, &founder_txns, &invested);

        // Already date-descending from the repository; keep that order.
        let mut reimbursements = Vec::new();
        let mut salaries = Vec::new();
        for txn in founder_txns {
            match txn.kind {
                FounderTransactionKind::Reimbursement { .. } => {
                    reimbursements.push(FounderTransactionResponse::from(txn))
                }
                FounderTransactionKind::Salary { .. } => {
                    salaries.push(FounderTransactionResponse::from(txn))
                }
            }
        }

        Ok(FounderLedger {
            founders_summary,
            reimbursements,
            salaries,
        })
    }

    #[instrument(skip(self, input), fields(user_id = %user_id, id = %id))]
    async fn update(
        &self,
        user_id: &str,
        id: &str,
        input: FounderTransactionInput,
    ) -> Result<(), ServiceError> {
        info!("Updating founder transaction");
        let oid = parse_id(id)?;
        let txn = self.build(user_id, input)?;
        let res = self.founder_repo.update(user_id, oid, txn).await;
        match &res {
            Ok(_) => info!("Founder transaction updated successfully"),
            Err(e) => error!("Failed to update founder transaction: {e}"),
        }
        res.map_err(ServiceError::from)
    }

    #[instrument(skip(self), fields(user_id = %user_id, id = %id))]
    async fn delete(&self, user_id: &str, id: &str) -> Result<(), ServiceError> {
        info!("Deleting founder transaction");
        let oid = parse_id(id)?;
        let res = self.founder_repo.delete(user_id, oid).await;
        match &res {
            Ok(_) => info!("Founder transaction deleted successfully"),
            Err(e) => error!("Failed to delete founder transaction: {e}"),
        }
        res.map_err(ServiceError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::transaction::TransactionKind;

    fn founders() -> Vec<String> {
        vec!["Alice".to_string(), "Bob".to_string()]
    }

    fn expense(amount: f64, payee: &str) -> PersonalTransaction {
        PersonalTransaction {
            id: Some(ObjectId::new()),
            user_id: "u1".to_string(),
            kind: TransactionKind::Expense,
            amount,
            date: "2024-01-10".parse().unwrap(),
            category: "founder".to_string(),
            details: None,
            payee: Some(payee.to_string()),
            created_at: None,
            updated_at: None,
        }
    }

    fn founder_txn(amount: f64, kind: FounderTransactionKind) -> FounderTransaction {
        FounderTransaction {
            id: Some(ObjectId::new()),
            user_id: "u1".to_string(),
            amount,
            date: "2024-01-15".parse().unwrap(),
            kind,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_summary_two_founders() {
        let founder_txns = vec![
            founder_txn(
                100.0,
                FounderTransactionKind::Reimbursement {
                    paid_by: "Bob".to_string(),
                    paid_to: "Alice".to_string(),
                },
            ),
            founder_txn(
                200.0,
                FounderTransactionKind::Salary {
                    payee: "Alice".to_string(),
                },
            ),
        ];
        let invested = vec![expense(500.0, "Alice")];

        let summary = summarize(&founders(), &founder_txns, &invested);

        let alice = &summary["Alice"];
        assert_eq!(alice.total_invested, 500.0);
        assert_eq!(alice.reimbursements_received, 100.0);
        assert_eq!(alice.reimbursements_made, 0.0);
        assert_eq!(alice.salary_taken, 200.0);
        assert_eq!(alice.exact_payment, 400.0);
        assert_eq!(alice.net_contribution, -200.0);

        let bob = &summary["Bob"];
        assert_eq!(bob.total_invested, 0.0);
        assert_eq!(bob.reimbursements_received, 0.0);
        assert_eq!(bob.reimbursements_made, 100.0);
        assert_eq!(bob.salary_taken, 0.0);
        // 0 invested - 0 received + 100 made: Bob is out of pocket by 100.
        assert_eq!(bob.exact_payment, 100.0);
        assert_eq!(bob.net_contribution, -100.0);
    }

    #[test]
    fn test_summary_ignores_unconfigured_payees() {
        let invested = vec![expense(500.0, "Mallory")];
        let summary = summarize(&founders(), &[], &invested);
        assert_eq!(summary["Alice"].total_invested, 0.0);
        assert_eq!(summary["Bob"].total_invested, 0.0);
    }

    #[test]
    fn test_summary_empty_inputs() {
        let summary = summarize(&founders(), &[], &[]);
        assert_eq!(summary.len(), 2);
        for founder_summary in summary.values() {
            assert_eq!(founder_summary.net_contribution, 0.0);
        }
    }
}
