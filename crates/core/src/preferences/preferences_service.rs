use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, error, warn};

use crate::auth::SessionProviderTrait;
use crate::constants::NOTIFICATION_SETTINGS_KEY;
use crate::errors::StoreError;

use super::preferences_model::{NotificationPreferences, PreferenceValue};
use super::preferences_traits::{NotificationPreferencesServiceTrait, PreferenceStoreTrait};

/// Service reconciling stored preference documents with defaults and
/// persisting edits.
///
/// No method here raises: reads fall open to the default document and
/// writes resolve to a boolean, so a broken preference store can never take
/// the host application down with it.
pub struct NotificationPreferencesService {
    store: Arc<dyn PreferenceStoreTrait>,
    sessions: Arc<dyn SessionProviderTrait>,
}

impl NotificationPreferencesService {
    pub fn new(
        store: Arc<dyn PreferenceStoreTrait>,
        sessions: Arc<dyn SessionProviderTrait>,
    ) -> Self {
        NotificationPreferencesService { store, sessions }
    }

    /// Pure preference lookup; unrecognized category/key pairs read as "do
    /// not send".
    pub fn should_send(
        &self,
        preferences: &NotificationPreferences,
        category: &str,
        key: &str,
    ) -> bool {
        preferences.flag(category, key) == Some(true)
    }

    async fn upsert_with_fallbacks(&self, user_id: &str, document: &str) -> bool {
        match self.store.upsert(user_id, NOTIFICATION_SETTINGS_KEY, document) {
            Ok(()) => true,
            Err(StoreError::PermissionDenied(reason)) => {
                warn!(
                    "Preference save for {} denied ({}); refreshing session and retrying",
                    user_id, reason
                );
                if let Err(e) = self.sessions.refresh_session().await {
                    error!("Session refresh failed: {}", e);
                    return false;
                }
                match self.store.upsert(user_id, NOTIFICATION_SETTINGS_KEY, document) {
                    Ok(()) => true,
                    Err(e) => {
                        error!("Preference save retry for {} failed: {}", user_id, e);
                        false
                    }
                }
            }
            Err(StoreError::UniqueConflict(reason)) => {
                debug!(
                    "Preference upsert for {} conflicted ({}); falling back to update",
                    user_id, reason
                );
                self.update_then_insert(user_id, document)
            }
            Err(e) => {
                error!("Failed to save preferences for {}: {}", user_id, e);
                false
            }
        }
    }

    fn update_then_insert(&self, user_id: &str, document: &str) -> bool {
        match self.store.update(user_id, NOTIFICATION_SETTINGS_KEY, document) {
            Ok(affected) if affected > 0 => true,
            Ok(_) | Err(StoreError::NotFound) => {
                match self.store.insert(user_id, NOTIFICATION_SETTINGS_KEY, document) {
                    Ok(()) => true,
                    Err(e) => {
                        error!("Preference insert fallback for {} failed: {}", user_id, e);
                        false
                    }
                }
            }
            Err(e) => {
                warn!(
                    "Preference update fallback for {} failed ({}); attempting insert",
                    user_id, e
                );
                match self.store.insert(user_id, NOTIFICATION_SETTINGS_KEY, document) {
                    Ok(()) => true,
                    Err(e) => {
                        error!("Preference insert fallback for {} failed: {}", user_id, e);
                        false
                    }
                }
            }
        }
    }
}

#[async_trait]
impl NotificationPreferencesServiceTrait for NotificationPreferencesService {
    async fn get(&self, user_id: &str) -> NotificationPreferences {
        match self.store.fetch(user_id, NOTIFICATION_SETTINGS_KEY) {
            Ok(raw) => match serde_json::from_str::<NotificationPreferences>(&raw) {
                Ok(preferences) => preferences,
                Err(e) => {
                    warn!(
                        "Stored preferences for {} are unreadable ({}); using defaults",
                        user_id, e
                    );
                    NotificationPreferences::default()
                }
            },
            Err(StoreError::NotFound) => {
                // First read for this user: seed the defaults. Best-effort -
                // without a session the defaults are still returned.
                let defaults = NotificationPreferences::default();
                if !self.save(user_id, &defaults).await {
                    debug!("Could not persist default preferences for {}", user_id);
                }
                defaults
            }
            Err(StoreError::MissingTable(reason)) => {
                warn!(
                    "Preference table missing ({}); serving defaults for {}",
                    reason, user_id
                );
                NotificationPreferences::default()
            }
            Err(e) => {
                error!("Failed to read preferences for {}: {}", user_id, e);
                NotificationPreferences::default()
            }
        }
    }

    async fn save(&self, user_id: &str, preferences: &NotificationPreferences) -> bool {
        let session = match self.sessions.get_session().await {
            Some(session) => session,
            None => {
                warn!("Refusing to save preferences for {}: no active session", user_id);
                return false;
            }
        };
        if session.user_id != user_id {
            warn!(
                "Refusing to save preferences for {}: session belongs to {}",
                user_id, session.user_id
            );
            return false;
        }

        let document = match serde_json::to_string(preferences) {
            Ok(document) => document,
            Err(e) => {
                error!("Failed to serialize preferences for {}: {}", user_id, e);
                return false;
            }
        };

        self.upsert_with_fallbacks(user_id, &document).await
    }

    async fn update(
        &self,
        user_id: &str,
        category: &str,
        key: &str,
        value: PreferenceValue,
    ) -> bool {
        let mut preferences = self.get(user_id).await;
        if !preferences.set(category, key, &value) {
            warn!("Ignoring update to unknown preference field {}.{}", category, key);
            return false;
        }
        self.save(user_id, &preferences).await
    }
}
