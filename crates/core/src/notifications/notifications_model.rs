use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// Notification severity, mirrored onto the toast the UI shows.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }

    /// Parses a stored severity; unknown values read as `Info`.
    pub fn parse(value: &str) -> Self {
        match value {
            "warning" => Severity::Warning,
            "error" => Severity::Error,
            _ => Severity::Info,
        }
    }
}

/// Domain model representing a persisted notification
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub body: Option<String>,
    pub severity: Severity,
    pub category: Option<String>,
    pub source_type: Option<String>,
    pub source_id: Option<String>,
    pub is_read: bool,
    pub deleted: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new notification record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNotification {
    pub user_id: String,
    pub title: String,
    pub body: Option<String>,
    pub severity: Severity,
    pub category: Option<String>,
    pub source_type: Option<String>,
    pub source_id: Option<String>,
}

/// Database model for notifications
#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(table_name = crate::schema::notifications)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct NotificationDB {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub body: Option<String>,
    pub severity: String,
    pub category: Option<String>,
    pub is_read: bool,
    pub deleted: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub source_type: Option<String>,
    pub source_id: Option<String>,
}

impl From<NotificationDB> for Notification {
    fn from(db: NotificationDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            title: db.title,
            body: db.body,
            severity: Severity::parse(&db.severity),
            category: db.category,
            source_type: db.source_type,
            source_id: db.source_id,
            is_read: db.is_read,
            deleted: db.deleted,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<NewNotification> for NotificationDB {
    fn from(domain: NewNotification) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: String::new(), // Filled by the repository
            user_id: domain.user_id,
            title: domain.title,
            body: domain.body,
            severity: domain.severity.as_str().to_string(),
            category: domain.category,
            is_read: false,
            deleted: false,
            created_at: now,
            updated_at: now,
            source_type: domain.source_type,
            source_id: domain.source_id,
        }
    }
}
