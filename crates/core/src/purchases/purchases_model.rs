use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use num_traits::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// Planned-purchase lifecycle status. Only `Planned` purchases generate
/// reminders; nothing leaves `Completed` or `Cancelled`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseStatus {
    Planned,
    Completed,
    Cancelled,
}

impl PurchaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PurchaseStatus::Planned => "planned",
            PurchaseStatus::Completed => "completed",
            PurchaseStatus::Cancelled => "cancelled",
        }
    }

    /// Parses a stored status; unknown values read as `Cancelled` so they
    /// can never generate reminders.
    pub fn parse(value: &str) -> Self {
        match value {
            "planned" => PurchaseStatus::Planned,
            "completed" => PurchaseStatus::Completed,
            _ => PurchaseStatus::Cancelled,
        }
    }
}

/// Domain model representing a planned purchase
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub price: Decimal,
    pub currency: String,
    pub planned_date: Option<NaiveDate>,
    pub status: PurchaseStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new planned purchase
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPurchase {
    pub user_id: String,
    pub title: String,
    pub price: Decimal,
    pub currency: String,
    pub planned_date: Option<NaiveDate>,
}

impl NewPurchase {
    /// Validates the new purchase data
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Purchase title cannot be empty".to_string(),
            )));
        }
        if self.currency.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Currency cannot be empty".to_string(),
            )));
        }
        Ok(())
    }
}

/// Database model for purchases
#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(table_name = crate::schema::purchases)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PurchaseDB {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub price: f64,
    pub currency: String,
    pub planned_date: Option<NaiveDate>,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<PurchaseDB> for Purchase {
    fn from(db: PurchaseDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            title: db.title,
            price: Decimal::from_f64(db.price).unwrap_or_default(),
            currency: db.currency,
            planned_date: db.planned_date,
            status: PurchaseStatus::parse(&db.status),
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<NewPurchase> for PurchaseDB {
    fn from(domain: NewPurchase) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: String::new(), // Filled by the repository
            user_id: domain.user_id,
            title: domain.title,
            price: domain.price.to_f64().unwrap_or_default(),
            currency: domain.currency,
            planned_date: domain.planned_date,
            status: PurchaseStatus::Planned.as_str().to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}
