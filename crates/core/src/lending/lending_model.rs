use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use num_traits::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// Which side of the loan the user is on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LoanDirection {
    Lend,
    Borrow,
}

impl LoanDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanDirection::Lend => "lend",
            LoanDirection::Borrow => "borrow",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "borrow" => LoanDirection::Borrow,
            _ => LoanDirection::Lend,
        }
    }
}

/// Loan lifecycle status.
///
/// `Active -> Overdue` is the only transition this engine performs;
/// settling and cancelling happen in the CRUD layer. Nothing leaves
/// `Settled` or `Cancelled`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LoanStatus {
    Active,
    Overdue,
    Settled,
    Cancelled,
}

impl LoanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanStatus::Active => "active",
            LoanStatus::Overdue => "overdue",
            LoanStatus::Settled => "settled",
            LoanStatus::Cancelled => "cancelled",
        }
    }

    /// Parses a stored status; unknown values read as `Cancelled` so they
    /// can never generate reminders.
    pub fn parse(value: &str) -> Self {
        match value {
            "active" => LoanStatus::Active,
            "overdue" => LoanStatus::Overdue,
            "settled" => LoanStatus::Settled,
            _ => LoanStatus::Cancelled,
        }
    }
}

/// Domain model representing a lend/borrow record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LendBorrow {
    pub id: String,
    pub user_id: String,
    pub person_name: String,
    pub direction: LoanDirection,
    pub amount: Decimal,
    pub currency: String,
    pub due_date: NaiveDate,
    pub status: LoanStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new lend/borrow record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLendBorrow {
    pub user_id: String,
    pub person_name: String,
    pub direction: LoanDirection,
    pub amount: Decimal,
    pub currency: String,
    pub due_date: NaiveDate,
}

impl NewLendBorrow {
    /// Validates the new record data
    pub fn validate(&self) -> Result<()> {
        if self.person_name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Person name cannot be empty".to_string(),
            )));
        }
        if self.currency.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Currency cannot be empty".to_string(),
            )));
        }
        if self.amount <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Amount must be positive".to_string(),
            )));
        }
        Ok(())
    }
}

/// Database model for lend/borrow records
#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(table_name = crate::schema::lend_borrow)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct LendBorrowDB {
    pub id: String,
    pub user_id: String,
    pub person_name: String,
    pub direction: String,
    pub amount: f64,
    pub currency: String,
    pub due_date: NaiveDate,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<LendBorrowDB> for LendBorrow {
    fn from(db: LendBorrowDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            person_name: db.person_name,
            direction: LoanDirection::parse(&db.direction),
            amount: Decimal::from_f64(db.amount).unwrap_or_default(),
            currency: db.currency,
            due_date: db.due_date,
            status: LoanStatus::parse(&db.status),
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<NewLendBorrow> for LendBorrowDB {
    fn from(domain: NewLendBorrow) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: String::new(), // Filled by the repository
            user_id: domain.user_id,
            person_name: domain.person_name,
            direction: domain.direction.as_str().to_string(),
            amount: domain.amount.to_f64().unwrap_or_default(),
            currency: domain.currency,
            due_date: domain.due_date,
            status: LoanStatus::Active.as_str().to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}
