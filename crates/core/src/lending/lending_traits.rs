use chrono::NaiveDate;

use crate::errors::Result;

use super::lending_model::{LendBorrow, LoanStatus, NewLendBorrow};

/// Trait defining the contract for lend/borrow record storage.
pub trait LendBorrowRepositoryTrait: Send + Sync {
    fn create(&self, new_record: NewLendBorrow) -> Result<LendBorrow>;

    fn get_by_id(&self, record_id: &str) -> Result<LendBorrow>;

    /// Lists the user's records holding one of the given statuses.
    fn list_by_status(&self, user_id: &str, statuses: &[LoanStatus]) -> Result<Vec<LendBorrow>>;

    /// Lists records that can no longer generate reminders
    /// (neither active nor overdue).
    fn list_inactive(&self, user_id: &str) -> Result<Vec<LendBorrow>>;

    /// Flips every active record due before `today` to overdue.
    /// Idempotent; returns the number of records changed.
    fn mark_overdue_before(&self, user_id: &str, today: NaiveDate) -> Result<usize>;

    /// Sets a record's status. Settling and cancelling are CRUD-layer
    /// transitions; the scanner only consumes their effect.
    fn update_status(&self, record_id: &str, status: LoanStatus) -> Result<()>;
}
