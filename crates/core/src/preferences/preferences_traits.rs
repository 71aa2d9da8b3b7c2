use async_trait::async_trait;

use crate::errors::StoreError;

use super::preferences_model::{NotificationPreferences, PreferenceValue};

/// Raw storage for preference documents, keyed by `(user_id, preference_key)`.
///
/// `upsert` is the normal write path; `update` and `insert` exist separately
/// so the service can fall back to them when an upsert reports a conflict.
pub trait PreferenceStoreTrait: Send + Sync {
    /// Fetches the stored JSON document for the key.
    fn fetch(&self, user_id: &str, preference_key: &str) -> Result<String, StoreError>;

    /// Inserts or replaces the document for the key.
    fn upsert(&self, user_id: &str, preference_key: &str, document: &str)
        -> Result<(), StoreError>;

    /// Updates an existing document; returns the number of affected rows.
    fn update(
        &self,
        user_id: &str,
        preference_key: &str,
        document: &str,
    ) -> Result<usize, StoreError>;

    /// Inserts a new document; fails on an existing key.
    fn insert(&self, user_id: &str, preference_key: &str, document: &str)
        -> Result<(), StoreError>;
}

/// Trait defining the contract for notification preference operations.
#[async_trait]
pub trait NotificationPreferencesServiceTrait: Send + Sync {
    /// Returns the user's preferences, merged over defaults. Never fails;
    /// storage problems fall back to the default document.
    async fn get(&self, user_id: &str) -> NotificationPreferences;

    /// Persists the full preference document. Returns false instead of
    /// raising on any failure, including a missing or mismatched session.
    async fn save(&self, user_id: &str, preferences: &NotificationPreferences) -> bool;

    /// Reads, merges a single field, and saves. Document-level
    /// last-write-wins against concurrent editors.
    async fn update(
        &self,
        user_id: &str,
        category: &str,
        key: &str,
        value: PreferenceValue,
    ) -> bool;
}
