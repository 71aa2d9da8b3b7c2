use chrono::NaiveDate;
use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::{get_connection, DbPool};
use crate::errors::Result;
use crate::schema::lend_borrow;

use super::lending_model::{LendBorrow, LendBorrowDB, LoanStatus, NewLendBorrow};
use super::lending_traits::LendBorrowRepositoryTrait;

/// Repository for managing lend/borrow records in the database
pub struct LendBorrowRepository {
    pool: Arc<DbPool>,
}

impl LendBorrowRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        LendBorrowRepository { pool }
    }
}

impl LendBorrowRepositoryTrait for LendBorrowRepository {
    fn create(&self, new_record: NewLendBorrow) -> Result<LendBorrow> {
        new_record.validate()?;

        let mut record_db: LendBorrowDB = new_record.into();
        record_db.id = Uuid::new_v4().to_string();

        let mut conn = get_connection(&self.pool)?;
        diesel::insert_into(lend_borrow::table)
            .values(&record_db)
            .execute(&mut conn)?;

        Ok(record_db.into())
    }

    fn get_by_id(&self, record_id: &str) -> Result<LendBorrow> {
        let mut conn = get_connection(&self.pool)?;
        let record = lend_borrow::table
            .find(record_id)
            .select(LendBorrowDB::as_select())
            .first::<LendBorrowDB>(&mut conn)?;

        Ok(record.into())
    }

    fn list_by_status(&self, user_id: &str, statuses: &[LoanStatus]) -> Result<Vec<LendBorrow>> {
        let status_values: Vec<&str> = statuses.iter().map(LoanStatus::as_str).collect();

        let mut conn = get_connection(&self.pool)?;
        let records = lend_borrow::table
            .filter(lend_borrow::user_id.eq(user_id))
            .filter(lend_borrow::status.eq_any(status_values))
            .order(lend_borrow::due_date.asc())
            .select(LendBorrowDB::as_select())
            .load::<LendBorrowDB>(&mut conn)?;

        Ok(records.into_iter().map(LendBorrow::from).collect())
    }

    fn list_inactive(&self, user_id: &str) -> Result<Vec<LendBorrow>> {
        let reminder_statuses = [
            LoanStatus::Active.as_str(),
            LoanStatus::Overdue.as_str(),
        ];

        let mut conn = get_connection(&self.pool)?;
        let records = lend_borrow::table
            .filter(lend_borrow::user_id.eq(user_id))
            .filter(lend_borrow::status.ne_all(reminder_statuses))
            .select(LendBorrowDB::as_select())
            .load::<LendBorrowDB>(&mut conn)?;

        Ok(records.into_iter().map(LendBorrow::from).collect())
    }

    fn mark_overdue_before(&self, user_id: &str, today: NaiveDate) -> Result<usize> {
        let mut conn = get_connection(&self.pool)?;
        let affected = diesel::update(
            lend_borrow::table
                .filter(lend_borrow::user_id.eq(user_id))
                .filter(lend_borrow::status.eq(LoanStatus::Active.as_str()))
                .filter(lend_borrow::due_date.lt(today)),
        )
        .set((
            lend_borrow::status.eq(LoanStatus::Overdue.as_str()),
            lend_borrow::updated_at.eq(chrono::Utc::now().naive_utc()),
        ))
        .execute(&mut conn)?;

        Ok(affected)
    }

    fn update_status(&self, record_id: &str, status: LoanStatus) -> Result<()> {
        let mut conn = get_connection(&self.pool)?;
        diesel::update(lend_borrow::table.find(record_id))
            .set((
                lend_borrow::status.eq(status.as_str()),
                lend_borrow::updated_at.eq(chrono::Utc::now().naive_utc()),
            ))
            .execute(&mut conn)?;

        Ok(())
    }
}
