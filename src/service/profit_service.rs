use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use chrono::{Datelike, NaiveDate, Utc};
use serde::Serialize;
use tracing::{error, info, instrument};

use crate::model::profit::ProfitEntry;
use crate::repository::profit_repo::{MongoProfitRepository, ProfitRepository};
use crate::service::{parse_date, round2};
use crate::util::error::ServiceError;

#[derive(Debug, Clone)]
pub struct ProfitInput {
    pub amount: f64,
    pub date: String,
    pub details: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfitResponse {
    pub id: String,
    pub user_id: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub details: Option<String>,
    pub category: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<ProfitEntry> for ProfitResponse {
    fn from(entry: ProfitEntry) -> Self {
        ProfitResponse {
            id: entry.id.map(|id| id.to_hex()).unwrap_or_default(),
            user_id: entry.user_id,
            amount: entry.amount,
            date: entry.date,
            details: entry.details,
            category: entry.category,
            created_at: entry.created_at,
            updated_at: entry.updated_at,
        }
    }
}

/// Profit entries plus the derived totals embedded in every list response.
#[derive(Debug, Clone, Serialize)]
pub struct ProfitReport {
    pub total_profit: f64,
    pub this_month_profit: f64,
    pub average_profit: f64,
    pub entries: Vec<ProfitResponse>,
}

#[async_trait]
pub trait ProfitService: Send + Sync {
    async fn create(&self, user_id: &str, input: ProfitInput) -> Result<ProfitResponse, ServiceError>;
    async fn list(&self, user_id: &str) -> Result<ProfitReport, ServiceError>;
    async fn update(&self, user_id: &str, id: &str, input: ProfitInput) -> Result<(), ServiceError>;
    async fn delete(&self, user_id: &str, id: &str) -> Result<(), ServiceError>;
}

pub struct ProfitServiceImpl {
    pub profit_repo: Arc<MongoProfitRepository>,
}

impl ProfitServiceImpl {
    pub fn new(profit_repo: Arc<MongoProfitRepository>) -> Self {
        Self { profit_repo }
    }

    fn build(&self, user_id: &str, input: ProfitInput) -> Result<ProfitEntry, ServiceError> {
        let date = parse_date(&input.date)?;
        Ok(ProfitEntry {
            id: None,
            user_id: user_id.to_string(),
            amount: input.amount,
            date,
            details: input.details,
            category: input.category,
            created_at: None,
            updated_at: None,
        })
    }
}

/// Derive the profit totals for a set of entries at the given "now".
pub fn profit_report(entries: Vec<ProfitEntry>, today: NaiveDate) -> ProfitReport {
    let mut total_profit = 0.0;
    let mut this_month_profit = 0.0;
    for entry in &entries {
        total_profit += entry.amount;
        if entry.date.month() == today.month() && entry.date.year() == today.year() {
            this_month_profit += entry.amount;
        }
    }
    let average_profit = if entries.is_empty() {
        0.0
    } else {
        round2(total_profit / entries.len() as f64)
    };
    ProfitReport {
        total_profit,
        this_month_profit,
        average_profit,
        entries: entries.into_iter().map(ProfitResponse::from).collect(),
    }
}

fn parse_id(id: &str) -> Result<ObjectId, ServiceError> {
    ObjectId::parse_str(id)
        .map_err(|_| ServiceError::InvalidInput(format!("Invalid profit entry id: {}", id)))
}

#[async_trait]
impl ProfitService for ProfitServiceImpl {
    #[instrument(skip(self, input), fields(user_id = %user_id))]
    async fn create(&self, user_id: &str, input: ProfitInput) -> Result<ProfitResponse, ServiceError> {
        info!("Creating profit entry");
        let entry = self.build(user_id, input)?;
        let inserted = self.profit_repo.insert(entry).await;
        match &inserted {
            Ok(_) => info!("Profit entry created successfully"),
            Err(e) => error!("Failed to create profit entry: {e}"),
        }
        Ok(inserted.map_err(ServiceError::from)?.into())
    }

    #[instrument(skip(self), fields(user_id = %user_id))]
    async fn list(&self, user_id: &str) -> Result<ProfitReport, ServiceError> {
        info!("Listing profit entries");
        let entries = self
            .profit_repo
            .list_by_user(user_id)
            .await
            .map_err(ServiceError::from)?;
        Ok(profit_report(entries, Utc::now().date_naive()))
    }

    #[instrument(skip(self, input), fields(user_id = %user_id, id = %id))]
    async fn update(&self, user_id: &str, id: &str, input: ProfitInput) -> Result<(), ServiceError> {
        info!("Updating profit entry");
        let oid = parse_id(id)?;
        let entry = self.build(user_id, input)?;
        let res = self.profit_repo.update(user_id, oid, entry).await;
        match &res {
            Ok(_) => info!("Profit entry updated successfully"),
            Err(e) => error!("Failed to update profit entry: {e}"),
        }
        res.map_err(ServiceError::from)
    }

    #[instrument(skip(self), fields(user_id = %user_id, id = %id))]
    async fn delete(&self, user_id: &str, id: &str) -> Result<(), ServiceError> {
        info!("Deleting profit entry");
        let oid = parse_id(id)?;
        let res = self.profit_repo.delete(user_id, oid).await;
        match &res {
            Ok(_) => info!("Profit entry deleted successfully"),
            Err(e) => error!("Failed to delete profit entry: {e}"),
        }
        res.map_err(ServiceError::from)
    }
}
