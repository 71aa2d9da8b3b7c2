use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Local, NaiveDate, Utc};
use log::{debug, error};

use crate::constants::SCAN_INTERVAL_SECS;
use crate::errors::Result;
use crate::lending::{LendBorrowRepositoryTrait, LoanStatus};
use crate::notifications::{
    NotificationDispatcher, NotificationRepositoryTrait, NotificationRequest,
};
use crate::purchases::PurchaseRepositoryTrait;

use super::urgency_model::{classify, UrgentItem, UrgentSource};

const URGENCY_CATEGORIES: [&str; 3] = ["overdue", "due_soon", "upcoming"];

/// Rate-limited background scan that refreshes overdue statuses, retires
/// stale reminders, and emits deduplicated notifications for urgent items.
///
/// The rate limiter lives on the instance, so independent scanners (one per
/// test, one per hosting session) never share state. Dedup keys on the
/// source record rather than notification text, so a rescan never produces
/// a second reminder for an unchanged item even from another process.
pub struct UrgentItemScanner {
    lend_borrow: Arc<dyn LendBorrowRepositoryTrait>,
    purchases: Arc<dyn PurchaseRepositoryTrait>,
    notifications: Arc<dyn NotificationRepositoryTrait>,
    dispatcher: Arc<NotificationDispatcher>,
    last_check: Mutex<DateTime<Utc>>,
}

impl UrgentItemScanner {
    pub fn new(
        lend_borrow: Arc<dyn LendBorrowRepositoryTrait>,
        purchases: Arc<dyn PurchaseRepositoryTrait>,
        notifications: Arc<dyn NotificationRepositoryTrait>,
        dispatcher: Arc<NotificationDispatcher>,
    ) -> Self {
        UrgentItemScanner {
            lend_borrow,
            purchases,
            notifications,
            dispatcher,
            last_check: Mutex::new(DateTime::UNIX_EPOCH),
        }
    }

    /// Runs a scan unless one ran within the last hour. Intended to be
    /// invoked on every app-foreground event; failures are logged, never
    /// propagated.
    pub async fn scan(&self, user_id: &str) {
        {
            let mut last_check = self.last_check.lock().unwrap();
            let now = Utc::now();
            if now.signed_duration_since(*last_check) < Duration::seconds(SCAN_INTERVAL_SECS) {
                debug!("Urgency scan for {} skipped; within the rate-limit window", user_id);
                return;
            }
            *last_check = now;
        }

        let today = Local::now().date_naive();

        // Step 1: flip active loans past their due date to overdue.
        match self.lend_borrow.mark_overdue_before(user_id, today) {
            Ok(0) => {}
            Ok(changed) => debug!("Marked {} loan record(s) overdue for {}", changed, user_id),
            Err(e) => error!("Failed to refresh overdue statuses for {}: {}", user_id, e),
        }

        // Step 2: retire reminders whose source is settled, cancelled, or
        // bought. Best-effort.
        self.clear_stale_notifications(user_id);

        // Step 3: derive the urgent item list.
        let items = match self.collect_urgent_items(user_id, today) {
            Ok(items) => items,
            Err(e) => {
                error!("Failed to derive urgent items for {}: {}", user_id, e);
                return;
            }
        };

        // Step 4: emit one notification per item not already covered.
        for item in items {
            self.notify_item(user_id, &item).await;
        }
    }

    /// Resets the rate limiter and scans immediately. Manual and test
    /// trigger.
    pub async fn force_scan(&self, user_id: &str) {
        *self.last_check.lock().unwrap() = DateTime::UNIX_EPOCH;
        self.scan(user_id).await;
    }

    /// Soft-deletes every urgency notification for the user, read or not.
    pub fn clear_urgency_notifications(&self, user_id: &str) {
        if let Err(e) = self
            .notifications
            .soft_delete_by_categories(user_id, &URGENCY_CATEGORIES)
        {
            error!("Failed to clear urgency notifications for {}: {}", user_id, e);
        }
    }

    fn clear_stale_notifications(&self, user_id: &str) {
        match self.lend_borrow.list_inactive(user_id) {
            Ok(records) => {
                let ids: Vec<String> = records.into_iter().map(|record| record.id).collect();
                match self.notifications.soft_delete_by_source(
                    user_id,
                    UrgentSource::LendBorrow.as_str(),
                    &ids,
                ) {
                    Ok(0) => {}
                    Ok(cleared) => {
                        debug!("Cleared {} stale loan reminder(s) for {}", cleared, user_id)
                    }
                    Err(e) => {
                        error!("Failed to clear stale loan reminders for {}: {}", user_id, e)
                    }
                }
            }
            Err(e) => error!("Failed to list inactive loan records for {}: {}", user_id, e),
        }

        match self.purchases.list_inactive(user_id) {
            Ok(records) => {
                let ids: Vec<String> = records.into_iter().map(|record| record.id).collect();
                match self.notifications.soft_delete_by_source(
                    user_id,
                    UrgentSource::Purchase.as_str(),
                    &ids,
                ) {
                    Ok(0) => {}
                    Ok(cleared) => {
                        debug!("Cleared {} stale purchase reminder(s) for {}", cleared, user_id)
                    }
                    Err(e) => {
                        error!("Failed to clear stale purchase reminders for {}: {}", user_id, e)
                    }
                }
            }
            Err(e) => error!("Failed to list inactive purchases for {}: {}", user_id, e),
        }
    }

    fn collect_urgent_items(&self, user_id: &str, today: NaiveDate) -> Result<Vec<UrgentItem>> {
        let mut items = Vec::new();

        let loans = self
            .lend_borrow
            .list_by_status(user_id, &[LoanStatus::Active, LoanStatus::Overdue])?;
        for loan in &loans {
            if let Some((days_until, status)) = classify(loan.due_date, today) {
                items.push(UrgentItem::from_loan(loan, days_until, status));
            }
        }

        // Purchase failures only cost purchase reminders; loans still
        // surface.
        match self.purchases.list_planned(user_id) {
            Ok(planned) => {
                for purchase in &planned {
                    if let Some(planned_date) = purchase.planned_date {
                        if let Some((days_until, status)) = classify(planned_date, today) {
                            items.push(UrgentItem::from_purchase(
                                purchase,
                                planned_date,
                                days_until,
                                status,
                            ));
                        }
                    }
                }
            }
            Err(e) => error!("Failed to list planned purchases for {}: {}", user_id, e),
        }

        // Deterministic order: most urgent first, then soonest due, so any
        // top-N surfacing is reproducible.
        items.sort_by_key(|item| (item.status.rank(), item.days_until));

        Ok(items)
    }

    async fn notify_item(&self, user_id: &str, item: &UrgentItem) {
        let already_notified = match self.notifications.exists_active(
            user_id,
            item.source.as_str(),
            &item.source_id,
            item.status.category(),
        ) {
            Ok(exists) => exists,
            Err(e) => {
                error!(
                    "Dedup check failed for {} {}: {}; skipping emission",
                    item.source.as_str(),
                    item.source_id,
                    e
                );
                return;
            }
        };
        if already_notified {
            return;
        }

        let request =
            NotificationRequest::new(user_id, item.notification_title(), item.status.severity())
                .with_body(item.notification_body())
                .with_category(item.status.category())
                .with_source(item.source.as_str(), item.source_id.clone());
        self.dispatcher.queue(request).await;
    }
}
