use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

fn default_false() -> bool {
    false
}

fn default_quiet_hours_start() -> String {
    "22:00".to_string()
}

fn default_quiet_hours_end() -> String {
    "08:00".to_string()
}

/// Per-user notification preference document.
///
/// Stored as a JSON column keyed by `(user_id, "notification_settings")`.
/// Every field carries a serde default, so a partially-populated or legacy
/// document always deserializes into a fully-populated value - the stored
/// fields win, the defaults fill the rest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct NotificationPreferences {
    #[serde(default)]
    pub financial: FinancialPreferences,
    #[serde(default)]
    pub system: SystemPreferences,
    #[serde(default)]
    pub activity: ActivityPreferences,
    #[serde(default)]
    pub communication: CommunicationPreferences,
    #[serde(default)]
    pub frequency: FrequencyPreferences,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FinancialPreferences {
    #[serde(default = "default_true")]
    pub overdue_payments: bool,
    #[serde(default = "default_true")]
    pub due_soon_reminders: bool,
    #[serde(default = "default_true")]
    pub upcoming_deadlines: bool,
    #[serde(default = "default_true")]
    pub low_balance_alerts: bool,
    #[serde(default = "default_true")]
    pub budget_exceeded: bool,
    #[serde(default = "default_true")]
    pub large_transactions: bool,
}

impl Default for FinancialPreferences {
    fn default() -> Self {
        Self {
            overdue_payments: true,
            due_soon_reminders: true,
            upcoming_deadlines: true,
            low_balance_alerts: true,
            budget_exceeded: true,
            large_transactions: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SystemPreferences {
    #[serde(default = "default_true")]
    pub new_features: bool,
    #[serde(default = "default_true")]
    pub system_updates: bool,
    #[serde(default = "default_true")]
    pub tips_guidance: bool,
    #[serde(default = "default_true")]
    pub security_alerts: bool,
}

impl Default for SystemPreferences {
    fn default() -> Self {
        Self {
            new_features: true,
            system_updates: true,
            tips_guidance: true,
            security_alerts: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActivityPreferences {
    #[serde(default = "default_true")]
    pub transaction_confirmations: bool,
    #[serde(default = "default_true")]
    pub account_changes: bool,
    #[serde(default = "default_true")]
    pub category_updates: bool,
    #[serde(default = "default_true")]
    pub backup_reminders: bool,
}

impl Default for ActivityPreferences {
    fn default() -> Self {
        Self {
            transaction_confirmations: true,
            account_changes: true,
            category_updates: true,
            backup_reminders: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommunicationPreferences {
    #[serde(default = "default_true")]
    pub in_app_notifications: bool,
    #[serde(default = "default_false")]
    pub email_notifications: bool,
    #[serde(default = "default_false")]
    pub push_notifications: bool,
    #[serde(default = "default_false")]
    pub quiet_hours_enabled: bool,
    /// Window start, `HH:MM` 24-hour
    #[serde(default = "default_quiet_hours_start")]
    pub quiet_hours_start: String,
    /// Window end, `HH:MM` 24-hour
    #[serde(default = "default_quiet_hours_end")]
    pub quiet_hours_end: String,
}

impl Default for CommunicationPreferences {
    fn default() -> Self {
        Self {
            in_app_notifications: true,
            email_notifications: false,
            push_notifications: false,
            quiet_hours_enabled: false,
            quiet_hours_start: default_quiet_hours_start(),
            quiet_hours_end: default_quiet_hours_end(),
        }
    }
}

/// Delivery cadence flags. Non-exclusive; the highest-priority enabled flag
/// wins when several are set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FrequencyPreferences {
    #[serde(default = "default_true")]
    pub real_time: bool,
    #[serde(default = "default_false")]
    pub daily_digest: bool,
    #[serde(default = "default_false")]
    pub weekly_summary: bool,
}

impl Default for FrequencyPreferences {
    fn default() -> Self {
        Self {
            real_time: true,
            daily_digest: false,
            weekly_summary: false,
        }
    }
}

/// Resolved delivery cadence for queue processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryFrequency {
    RealTime,
    DailyDigest,
    WeeklySummary,
}

impl FrequencyPreferences {
    /// Resolves the effective cadence: real-time beats daily digest beats
    /// weekly summary. With nothing enabled, delivery falls back to
    /// real-time rather than silently dropping notifications.
    pub fn resolve(&self) -> DeliveryFrequency {
        if self.real_time {
            DeliveryFrequency::RealTime
        } else if self.daily_digest {
            DeliveryFrequency::DailyDigest
        } else if self.weekly_summary {
            DeliveryFrequency::WeeklySummary
        } else {
            DeliveryFrequency::RealTime
        }
    }
}

/// A single preference field value in an update request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreferenceValue {
    Flag(bool),
    Text(String),
}

/// Maps a notification category label to the preference field governing it.
pub fn preference_route(notification_category: &str) -> Option<(&'static str, &'static str)> {
    let route = match notification_category {
        // Financial notifications
        "overdue" => ("financial", "overdue_payments"),
        "due_soon" => ("financial", "due_soon_reminders"),
        "upcoming" => ("financial", "upcoming_deadlines"),
        "low_balance" => ("financial", "low_balance_alerts"),
        "budget_exceeded" => ("financial", "budget_exceeded"),
        "large_transaction" => ("financial", "large_transactions"),

        // System notifications
        "new_feature" => ("system", "new_features"),
        "system_update" => ("system", "system_updates"),
        "tips" => ("system", "tips_guidance"),
        "security" => ("system", "security_alerts"),

        // Activity notifications
        "transaction_confirmation" => ("activity", "transaction_confirmations"),
        "account_change" => ("activity", "account_changes"),
        "category_update" => ("activity", "category_updates"),
        "backup_reminder" => ("activity", "backup_reminders"),

        _ => return None,
    };
    Some(route)
}

impl NotificationPreferences {
    /// Looks up a boolean preference flag. Unrecognized category/key pairs
    /// yield `None` rather than an error.
    pub fn flag(&self, category: &str, key: &str) -> Option<bool> {
        let value = match (category, key) {
            ("financial", "overdue_payments") => self.financial.overdue_payments,
            ("financial", "due_soon_reminders") => self.financial.due_soon_reminders,
            ("financial", "upcoming_deadlines") => self.financial.upcoming_deadlines,
            ("financial", "low_balance_alerts") => self.financial.low_balance_alerts,
            ("financial", "budget_exceeded") => self.financial.budget_exceeded,
            ("financial", "large_transactions") => self.financial.large_transactions,
            ("system", "new_features") => self.system.new_features,
            ("system", "system_updates") => self.system.system_updates,
            ("system", "tips_guidance") => self.system.tips_guidance,
            ("system", "security_alerts") => self.system.security_alerts,
            ("activity", "transaction_confirmations") => self.activity.transaction_confirmations,
            ("activity", "account_changes") => self.activity.account_changes,
            ("activity", "category_updates") => self.activity.category_updates,
            ("activity", "backup_reminders") => self.activity.backup_reminders,
            ("communication", "in_app_notifications") => self.communication.in_app_notifications,
            ("communication", "email_notifications") => self.communication.email_notifications,
            ("communication", "push_notifications") => self.communication.push_notifications,
            ("communication", "quiet_hours_enabled") => self.communication.quiet_hours_enabled,
            ("frequency", "real_time") => self.frequency.real_time,
            ("frequency", "daily_digest") => self.frequency.daily_digest,
            ("frequency", "weekly_summary") => self.frequency.weekly_summary,
            _ => return None,
        };
        Some(value)
    }

    /// Whether notifications of the given category label may be sent.
    /// Categories without a preference route are not sent.
    pub fn allows_category(&self, notification_category: &str) -> bool {
        match preference_route(notification_category) {
            Some((category, key)) => self.flag(category, key) == Some(true),
            None => false,
        }
    }

    /// Sets a single preference field. Returns false when the
    /// category/key/value combination is not a known field.
    pub fn set(&mut self, category: &str, key: &str, value: &PreferenceValue) -> bool {
        match value {
            PreferenceValue::Flag(flag) => self.set_flag(category, key, *flag),
            PreferenceValue::Text(text) => self.set_text(category, key, text),
        }
    }

    fn set_flag(&mut self, category: &str, key: &str, value: bool) -> bool {
        let slot = match (category, key) {
            ("financial", "overdue_payments") => &mut self.financial.overdue_payments,
            ("financial", "due_soon_reminders") => &mut self.financial.due_soon_reminders,
            ("financial", "upcoming_deadlines") => &mut self.financial.upcoming_deadlines,
            ("financial", "low_balance_alerts") => &mut self.financial.low_balance_alerts,
            ("financial", "budget_exceeded") => &mut self.financial.budget_exceeded,
            ("financial", "large_transactions") => &mut self.financial.large_transactions,
            ("system", "new_features") => &mut self.system.new_features,
            ("system", "system_updates") => &mut self.system.system_updates,
            ("system", "tips_guidance") => &mut self.system.tips_guidance,
            ("system", "security_alerts") => &mut self.system.security_alerts,
            ("activity", "transaction_confirmations") => {
                &mut self.activity.transaction_confirmations
            }
            ("activity", "account_changes") => &mut self.activity.account_changes,
            ("activity", "category_updates") => &mut self.activity.category_updates,
            ("activity", "backup_reminders") => &mut self.activity.backup_reminders,
            ("communication", "in_app_notifications") => {
                &mut self.communication.in_app_notifications
            }
            ("communication", "email_notifications") => {
                &mut self.communication.email_notifications
            }
            ("communication", "push_notifications") => &mut self.communication.push_notifications,
            ("communication", "quiet_hours_enabled") => {
                &mut self.communication.quiet_hours_enabled
            }
            ("frequency", "real_time") => &mut self.frequency.real_time,
            ("frequency", "daily_digest") => &mut self.frequency.daily_digest,
            ("frequency", "weekly_summary") => &mut self.frequency.weekly_summary,
            _ => return false,
        };
        *slot = value;
        true
    }

    fn set_text(&mut self, category: &str, key: &str, value: &str) -> bool {
        let slot = match (category, key) {
            ("communication", "quiet_hours_start") => &mut self.communication.quiet_hours_start,
            ("communication", "quiet_hours_end") => &mut self.communication.quiet_hours_end,
            _ => return false,
        };
        *slot = value.to_string();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_deserializes_to_defaults() {
        let prefs: NotificationPreferences = serde_json::from_str("{}").unwrap();
        assert_eq!(prefs, NotificationPreferences::default());
    }

    #[test]
    fn partial_document_merges_over_defaults() {
        // A legacy document that only ever knew about two financial flags.
        let raw = r#"{
            "financial": { "overdue_payments": false },
            "frequency": { "real_time": false, "daily_digest": true }
        }"#;
        let prefs: NotificationPreferences = serde_json::from_str(raw).unwrap();

        assert!(!prefs.financial.overdue_payments);
        // Unmentioned fields in a stored category fall back to defaults.
        assert!(prefs.financial.due_soon_reminders);
        assert!(prefs.financial.large_transactions);
        // Unmentioned categories come back fully defaulted.
        assert!(prefs.system.new_features);
        assert!(prefs.communication.in_app_notifications);
        assert_eq!(prefs.communication.quiet_hours_start, "22:00");
        // Stored frequency flags win.
        assert!(!prefs.frequency.real_time);
        assert!(prefs.frequency.daily_digest);
    }

    #[test]
    fn unknown_keys_in_stored_document_are_ignored() {
        let raw = r#"{ "financial": { "retired_flag": true }, "telemetry": {} }"#;
        let prefs: NotificationPreferences = serde_json::from_str(raw).unwrap();
        assert_eq!(prefs, NotificationPreferences::default());
    }

    #[test]
    fn frequency_resolution_prefers_real_time() {
        let mut frequency = FrequencyPreferences {
            real_time: true,
            daily_digest: true,
            weekly_summary: true,
        };
        assert_eq!(frequency.resolve(), DeliveryFrequency::RealTime);

        frequency.real_time = false;
        assert_eq!(frequency.resolve(), DeliveryFrequency::DailyDigest);

        frequency.daily_digest = false;
        assert_eq!(frequency.resolve(), DeliveryFrequency::WeeklySummary);

        frequency.weekly_summary = false;
        assert_eq!(frequency.resolve(), DeliveryFrequency::RealTime);
    }

    #[test]
    fn category_routes_resolve_against_flags() {
        let mut prefs = NotificationPreferences::default();
        assert!(prefs.allows_category("overdue"));
        assert!(prefs.allows_category("account_change"));

        prefs.financial.overdue_payments = false;
        assert!(!prefs.allows_category("overdue"));

        // A category nobody routes is never sent.
        assert!(!prefs.allows_category("mystery"));
    }

    #[test]
    fn unknown_fields_are_rejected_by_set() {
        let mut prefs = NotificationPreferences::default();
        assert!(!prefs.set("financial", "no_such_flag", &PreferenceValue::Flag(true)));
        assert!(!prefs.set("communication", "quiet_hours_start", &PreferenceValue::Flag(true)));
        assert!(prefs.set(
            "communication",
            "quiet_hours_start",
            &PreferenceValue::Text("07:30".to_string())
        ));
        assert_eq!(prefs.communication.quiet_hours_start, "07:30");
    }

    #[test]
    fn flag_lookup_is_total() {
        let prefs = NotificationPreferences::default();
        assert_eq!(prefs.flag("financial", "overdue_payments"), Some(true));
        assert_eq!(prefs.flag("communication", "email_notifications"), Some(false));
        assert_eq!(prefs.flag("financial", "nope"), None);
        assert_eq!(prefs.flag("nope", "overdue_payments"), None);
    }
}
