use crate::errors::Result;

use super::notifications_model::{NewNotification, Notification};

/// Trait defining the contract for notification record storage.
pub trait NotificationRepositoryTrait: Send + Sync {
    /// Persists a new notification and returns the stored record.
    fn insert(&self, new_notification: NewNotification) -> Result<Notification>;

    /// Whether a non-deleted notification for the same source record and
    /// category already exists. This is the urgency dedup probe.
    fn exists_active(
        &self,
        user_id: &str,
        source_type: &str,
        source_id: &str,
        category: &str,
    ) -> Result<bool>;

    /// Lists non-deleted notifications, newest first.
    fn list_active(&self, user_id: &str) -> Result<Vec<Notification>>;

    /// Soft-deletes notifications tied to the given source records.
    fn soft_delete_by_source(
        &self,
        user_id: &str,
        source_type: &str,
        source_ids: &[String],
    ) -> Result<usize>;

    /// Soft-deletes every notification of the given categories for the user.
    fn soft_delete_by_categories(&self, user_id: &str, categories: &[&str]) -> Result<usize>;

    /// Marks a single notification as read.
    fn mark_read(&self, notification_id: &str) -> Result<()>;

    /// Marks all of a user's notifications as read; returns the count.
    fn mark_all_read(&self, user_id: &str) -> Result<usize>;
}
