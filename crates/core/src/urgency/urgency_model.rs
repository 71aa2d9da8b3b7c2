use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{DUE_SOON_WINDOW_DAYS, UPCOMING_WINDOW_DAYS};
use crate::lending::{LendBorrow, LoanDirection};
use crate::notifications::Severity;
use crate::purchases::Purchase;
use crate::utils::currency::format_amount;

/// Urgency classification derived from an item's due date.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyStatus {
    Overdue,
    DueSoon,
    Upcoming,
}

impl UrgencyStatus {
    /// Sort rank; lower sorts first.
    pub fn rank(&self) -> u8 {
        match self {
            UrgencyStatus::Overdue => 0,
            UrgencyStatus::DueSoon => 1,
            UrgencyStatus::Upcoming => 2,
        }
    }

    /// Notification category label routed through user preferences.
    pub fn category(&self) -> &'static str {
        match self {
            UrgencyStatus::Overdue => "overdue",
            UrgencyStatus::DueSoon => "due_soon",
            UrgencyStatus::Upcoming => "upcoming",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            UrgencyStatus::Overdue => Severity::Error,
            UrgencyStatus::DueSoon => Severity::Warning,
            UrgencyStatus::Upcoming => Severity::Info,
        }
    }

    pub fn title_prefix(&self) -> &'static str {
        match self {
            UrgencyStatus::Overdue => "🚨 URGENT: ",
            UrgencyStatus::DueSoon => "⚠️ DUE SOON: ",
            UrgencyStatus::Upcoming => "📅 UPCOMING: ",
        }
    }

    pub fn priority(&self) -> UrgencyPriority {
        match self {
            UrgencyStatus::Overdue => UrgencyPriority::High,
            UrgencyStatus::DueSoon => UrgencyPriority::Medium,
            UrgencyStatus::Upcoming => UrgencyPriority::Low,
        }
    }
}

/// Informational priority; not consulted for suppression decisions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyPriority {
    Low,
    Medium,
    High,
}

/// Which domain record an urgent item was derived from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UrgentSource {
    LendBorrow,
    Purchase,
}

impl UrgentSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            UrgentSource::LendBorrow => "lend_borrow",
            UrgentSource::Purchase => "purchase",
        }
    }
}

/// An item needing the user's attention, recomputed on every scan cycle and
/// never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrgentItem {
    pub source: UrgentSource,
    pub source_id: String,
    pub title: String,
    pub message: String,
    pub due_date: NaiveDate,
    pub days_until: i64,
    pub amount: Decimal,
    pub currency: String,
    pub priority: UrgencyPriority,
    pub status: UrgencyStatus,
}

impl UrgentItem {
    pub fn from_loan(loan: &LendBorrow, days_until: i64, status: UrgencyStatus) -> Self {
        let amount = format_amount(loan.amount, &loan.currency);
        let (title, message) = match loan.direction {
            LoanDirection::Lend => (
                format!("{} owes you {}", loan.person_name, amount),
                format!("You lent {} to {}", amount, loan.person_name),
            ),
            LoanDirection::Borrow => (
                format!("You owe {} {}", loan.person_name, amount),
                format!("You borrowed {} from {}", amount, loan.person_name),
            ),
        };
        Self {
            source: UrgentSource::LendBorrow,
            source_id: loan.id.clone(),
            title,
            message,
            due_date: loan.due_date,
            days_until,
            amount: loan.amount,
            currency: loan.currency.clone(),
            priority: status.priority(),
            status,
        }
    }

    /// Builds an item from a planned purchase. The caller has already
    /// checked that a planned date exists.
    pub fn from_purchase(
        purchase: &Purchase,
        planned_date: NaiveDate,
        days_until: i64,
        status: UrgencyStatus,
    ) -> Self {
        let amount = format_amount(purchase.price, &purchase.currency);
        Self {
            source: UrgentSource::Purchase,
            source_id: purchase.id.clone(),
            title: format!("Planned purchase: {} ({})", purchase.title, amount),
            message: format!("Planned to buy {} for {}", purchase.title, amount),
            due_date: planned_date,
            days_until,
            amount: purchase.price,
            currency: purchase.currency.clone(),
            priority: status.priority(),
            status,
        }
    }

    /// Canonical notification title: urgency marker plus the item title.
    pub fn notification_title(&self) -> String {
        format!("{}{}", self.status.title_prefix(), self.title)
    }

    /// Canonical notification body: item message plus the time-remaining
    /// phrase.
    pub fn notification_body(&self) -> String {
        format!("{} - {}", self.message, time_description(self.days_until))
    }
}

/// Classifies a due date against today. Returns the signed day distance and
/// the urgency bucket, or `None` for items outside the reminder horizon.
pub fn classify(due_date: NaiveDate, today: NaiveDate) -> Option<(i64, UrgencyStatus)> {
    let days_until = (due_date - today).num_days();
    let status = if days_until < 0 {
        UrgencyStatus::Overdue
    } else if days_until <= DUE_SOON_WINDOW_DAYS {
        UrgencyStatus::DueSoon
    } else if days_until <= UPCOMING_WINDOW_DAYS {
        UrgencyStatus::Upcoming
    } else {
        return None;
    };
    Some((days_until, status))
}

/// Human phrase for how far an item is from its due date.
pub fn time_description(days_until: i64) -> String {
    if days_until < 0 {
        let days = days_until.abs();
        format!("{} day{} overdue", days, if days == 1 { "" } else { "s" })
    } else if days_until == 0 {
        "Due today".to_string()
    } else if days_until == 1 {
        "Due tomorrow".to_string()
    } else {
        format!("Due in {} days", days_until)
    }
}
