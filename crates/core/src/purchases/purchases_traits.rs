use crate::errors::Result;

use super::purchases_model::{NewPurchase, Purchase, PurchaseStatus};

/// Trait defining the contract for planned-purchase storage.
pub trait PurchaseRepositoryTrait: Send + Sync {
    fn create(&self, new_purchase: NewPurchase) -> Result<Purchase>;

    /// Lists the user's purchases still in the planned state.
    fn list_planned(&self, user_id: &str) -> Result<Vec<Purchase>>;

    /// Lists purchases that can no longer generate reminders.
    fn list_inactive(&self, user_id: &str) -> Result<Vec<Purchase>>;

    /// Sets a purchase's status. Completing and cancelling are CRUD-layer
    /// transitions; the scanner only consumes their effect.
    fn update_status(&self, purchase_id: &str, status: PurchaseStatus) -> Result<()>;
}
