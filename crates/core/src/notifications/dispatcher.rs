use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Local, Utc};
use log::{debug, error, warn};
use uuid::Uuid;

use crate::constants::NOTIFICATION_QUEUE_CAPACITY;
use crate::events::{ToastEvent, ToastSink};
use crate::preferences::quiet_hours;
use crate::preferences::{
    DeliveryFrequency, NotificationPreferences, NotificationPreferencesServiceTrait,
};

use super::notifications_model::{NewNotification, Severity};
use super::notifications_traits::NotificationRepositoryTrait;

/// A request to deliver one notification to one user.
#[derive(Debug, Clone)]
pub struct NotificationRequest {
    pub user_id: String,
    pub title: String,
    pub severity: Severity,
    pub body: Option<String>,
    pub category: Option<String>,
    pub source_type: Option<String>,
    pub source_id: Option<String>,
}

impl NotificationRequest {
    pub fn new(user_id: impl Into<String>, title: impl Into<String>, severity: Severity) -> Self {
        Self {
            user_id: user_id.into(),
            title: title.into(),
            severity,
            body: None,
            category: None,
            source_type: None,
            source_id: None,
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Tags the request with the domain record it was derived from, making
    /// it addressable by the stale-notification cleanup and dedup probes.
    pub fn with_source(mut self, source_type: impl Into<String>, source_id: impl Into<String>) -> Self {
        self.source_type = Some(source_type.into());
        self.source_id = Some(source_id.into());
        self
    }
}

struct QueuedNotification {
    request_id: String,
    queued_at: DateTime<Utc>,
    request: NotificationRequest,
}

/// Queues notification requests and delivers them according to the user's
/// preferences.
///
/// Real-time cadence drains the queue immediately; digest cadences leave
/// requests queued for the host's digest scheduler. Delivery is
/// at-most-once: a request whose record fails to persist is dropped, never
/// retried, because a duplicate financial alert is worse than a missed one.
pub struct NotificationDispatcher {
    queue: Mutex<VecDeque<QueuedNotification>>,
    preferences: Arc<dyn NotificationPreferencesServiceTrait>,
    repository: Arc<dyn NotificationRepositoryTrait>,
    toasts: Arc<dyn ToastSink>,
}

impl NotificationDispatcher {
    pub fn new(
        preferences: Arc<dyn NotificationPreferencesServiceTrait>,
        repository: Arc<dyn NotificationRepositoryTrait>,
        toasts: Arc<dyn ToastSink>,
    ) -> Self {
        NotificationDispatcher {
            queue: Mutex::new(VecDeque::new()),
            preferences,
            repository,
            toasts,
        }
    }

    /// Appends a request and immediately triggers queue processing.
    /// Fire-and-forget: all failures are logged, none propagate.
    pub async fn queue(&self, request: NotificationRequest) {
        {
            let mut queue = self.queue.lock().unwrap();
            if queue.len() >= NOTIFICATION_QUEUE_CAPACITY {
                if let Some(dropped) = queue.pop_front() {
                    warn!(
                        "Notification queue full; dropping oldest request {} for {}",
                        dropped.request_id, dropped.request.user_id
                    );
                }
            }
            queue.push_back(QueuedNotification {
                request_id: Uuid::new_v4().to_string(),
                queued_at: Utc::now(),
                request,
            });
        }

        self.process_queue().await;
    }

    /// Queues a financial notification, defaulting the category to overdue
    /// payments when the caller does not pick one.
    pub async fn queue_financial(
        &self,
        user_id: &str,
        title: &str,
        severity: Severity,
        body: Option<&str>,
    ) {
        self.queue_with_default_category(user_id, title, severity, body, "overdue")
            .await;
    }

    /// Queues a system notification under the new-feature category.
    pub async fn queue_system(
        &self,
        user_id: &str,
        title: &str,
        severity: Severity,
        body: Option<&str>,
    ) {
        self.queue_with_default_category(user_id, title, severity, body, "new_feature")
            .await;
    }

    /// Queues an activity notification under the account-change category.
    pub async fn queue_activity(
        &self,
        user_id: &str,
        title: &str,
        severity: Severity,
        body: Option<&str>,
    ) {
        self.queue_with_default_category(user_id, title, severity, body, "account_change")
            .await;
    }

    async fn queue_with_default_category(
        &self,
        user_id: &str,
        title: &str,
        severity: Severity,
        body: Option<&str>,
        category: &str,
    ) {
        let mut request = NotificationRequest::new(user_id, title, severity).with_category(category);
        if let Some(body) = body {
            request = request.with_body(body);
        }
        self.queue(request).await;
    }

    /// Number of requests currently awaiting delivery.
    pub fn pending(&self) -> usize {
        self.queue.lock().unwrap().len()
    }

    async fn process_queue(&self) {
        let first_user = match self.queue.lock().unwrap().front() {
            Some(item) => item.request.user_id.clone(),
            None => return,
        };

        let preferences = self.preferences.get(&first_user).await;
        match preferences.frequency.resolve() {
            DeliveryFrequency::RealTime => self.deliver_queued().await,
            DeliveryFrequency::DailyDigest | DeliveryFrequency::WeeklySummary => {
                // Digest assembly is the host scheduler's job; the contract
                // here is only to not deliver immediately.
                debug!(
                    "Deferring {} queued notification(s) for batched delivery",
                    self.pending()
                );
            }
        }
    }

    async fn deliver_queued(&self) {
        let batch: Vec<QueuedNotification> = {
            let mut queue = self.queue.lock().unwrap();
            queue.drain(..).collect()
        };

        let mut preferences_by_user: HashMap<String, NotificationPreferences> = HashMap::new();

        for item in batch {
            let request = item.request;

            if !preferences_by_user.contains_key(&request.user_id) {
                let preferences = self.preferences.get(&request.user_id).await;
                preferences_by_user.insert(request.user_id.clone(), preferences);
            }
            let preferences = &preferences_by_user[&request.user_id];

            // A request without a category is system-initiated and not
            // subject to opt-out.
            if let Some(category) = request.category.as_deref() {
                if !preferences.allows_category(category) {
                    debug!(
                        "Notification {} blocked by preferences (category {})",
                        item.request_id, category
                    );
                    continue;
                }
            }

            let record = NewNotification {
                user_id: request.user_id.clone(),
                title: request.title.clone(),
                body: request.body.clone(),
                severity: request.severity,
                category: request.category.clone(),
                source_type: request.source_type.clone(),
                source_id: request.source_id.clone(),
            };
            if let Err(e) = self.repository.insert(record) {
                error!(
                    "Failed to persist notification {} (queued {}): {}; dropping",
                    item.request_id, item.queued_at, e
                );
                continue;
            }

            if quiet_hours::is_suppressed(&preferences.communication, Local::now().time()) {
                debug!("Quiet hours active; toast withheld for {}", item.request_id);
                continue;
            }

            self.toasts.emit(ToastEvent {
                title: request.title,
                body: request.body,
                severity: request.severity,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::errors::{Error, Result, StoreError};
    use crate::events::MockToastSink;
    use crate::notifications::notifications_model::Notification;
    use crate::preferences::PreferenceValue;

    /// Preference service handing out one fixed document.
    struct FixedPreferencesService {
        preferences: NotificationPreferences,
    }

    impl FixedPreferencesService {
        fn new(preferences: NotificationPreferences) -> Self {
            Self { preferences }
        }
    }

    #[async_trait]
    impl NotificationPreferencesServiceTrait for FixedPreferencesService {
        async fn get(&self, _user_id: &str) -> NotificationPreferences {
            self.preferences.clone()
        }

        async fn save(&self, _user_id: &str, _preferences: &NotificationPreferences) -> bool {
            true
        }

        async fn update(
            &self,
            _user_id: &str,
            _category: &str,
            _key: &str,
            _value: PreferenceValue,
        ) -> bool {
            true
        }
    }

    #[derive(Default)]
    struct RecordingRepository {
        records: Mutex<Vec<Notification>>,
        fail_inserts: AtomicBool,
    }

    impl RecordingRepository {
        fn record_count(&self) -> usize {
            self.records.lock().unwrap().len()
        }
    }

    impl NotificationRepositoryTrait for RecordingRepository {
        fn insert(&self, new_notification: NewNotification) -> Result<Notification> {
            if self.fail_inserts.load(Ordering::SeqCst) {
                return Err(Error::Store(StoreError::Other("disk full".to_string())));
            }
            let now = chrono::Utc::now().naive_utc();
            let notification = Notification {
                id: Uuid::new_v4().to_string(),
                user_id: new_notification.user_id,
                title: new_notification.title,
                body: new_notification.body,
                severity: new_notification.severity,
                category: new_notification.category,
                source_type: new_notification.source_type,
                source_id: new_notification.source_id,
                is_read: false,
                deleted: false,
                created_at: now,
                updated_at: now,
            };
            self.records.lock().unwrap().push(notification.clone());
            Ok(notification)
        }

        fn exists_active(
            &self,
            user_id: &str,
            source_type: &str,
            source_id: &str,
            category: &str,
        ) -> Result<bool> {
            Ok(self.records.lock().unwrap().iter().any(|n| {
                !n.deleted
                    && n.user_id == user_id
                    && n.source_type.as_deref() == Some(source_type)
                    && n.source_id.as_deref() == Some(source_id)
                    && n.category.as_deref() == Some(category)
            }))
        }

        fn list_active(&self, user_id: &str) -> Result<Vec<Notification>> {
            Ok(self
                .records
                .lock()
                .unwrap()
                .iter()
                .filter(|n| n.user_id == user_id && !n.deleted)
                .cloned()
                .collect())
        }

        fn soft_delete_by_source(
            &self,
            user_id: &str,
            source_type: &str,
            source_ids: &[String],
        ) -> Result<usize> {
            let mut affected = 0;
            for n in self.records.lock().unwrap().iter_mut() {
                if !n.deleted
                    && n.user_id == user_id
                    && n.source_type.as_deref() == Some(source_type)
                    && n.source_id.as_ref().is_some_and(|id| source_ids.contains(id))
                {
                    n.deleted = true;
                    affected += 1;
                }
            }
            Ok(affected)
        }

        fn soft_delete_by_categories(&self, user_id: &str, categories: &[&str]) -> Result<usize> {
            let mut affected = 0;
            for n in self.records.lock().unwrap().iter_mut() {
                if !n.deleted
                    && n.user_id == user_id
                    && n.category.as_deref().is_some_and(|c| categories.contains(&c))
                {
                    n.deleted = true;
                    affected += 1;
                }
            }
            Ok(affected)
        }

        fn mark_read(&self, notification_id: &str) -> Result<()> {
            for n in self.records.lock().unwrap().iter_mut() {
                if n.id == notification_id {
                    n.is_read = true;
                }
            }
            Ok(())
        }

        fn mark_all_read(&self, user_id: &str) -> Result<usize> {
            let mut affected = 0;
            for n in self.records.lock().unwrap().iter_mut() {
                if n.user_id == user_id && !n.is_read {
                    n.is_read = true;
                    affected += 1;
                }
            }
            Ok(affected)
        }
    }

    fn dispatcher_with(
        preferences: NotificationPreferences,
    ) -> (NotificationDispatcher, Arc<RecordingRepository>, Arc<MockToastSink>) {
        let repository = Arc::new(RecordingRepository::default());
        let toasts = Arc::new(MockToastSink::new());
        let dispatcher = NotificationDispatcher::new(
            Arc::new(FixedPreferencesService::new(preferences)),
            repository.clone(),
            toasts.clone(),
        );
        (dispatcher, repository, toasts)
    }

    #[tokio::test]
    async fn real_time_delivery_persists_and_toasts() {
        let (dispatcher, repository, toasts) = dispatcher_with(NotificationPreferences::default());

        dispatcher
            .queue(
                NotificationRequest::new("u1", "Budget exceeded", Severity::Warning)
                    .with_category("budget_exceeded")
                    .with_body("Groceries is 12% over budget"),
            )
            .await;

        assert_eq!(repository.record_count(), 1);
        assert_eq!(dispatcher.pending(), 0);
        let events = toasts.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Budget exceeded");
        assert_eq!(events[0].severity, Severity::Warning);
    }

    #[tokio::test]
    async fn opted_out_category_is_dropped_silently() {
        let mut preferences = NotificationPreferences::default();
        preferences.financial.budget_exceeded = false;
        let (dispatcher, repository, toasts) = dispatcher_with(preferences);

        dispatcher
            .queue(
                NotificationRequest::new("u1", "Budget exceeded", Severity::Warning)
                    .with_category("budget_exceeded"),
            )
            .await;

        assert_eq!(repository.record_count(), 0);
        assert_eq!(dispatcher.pending(), 0);
        assert!(toasts.is_empty());
    }

    #[tokio::test]
    async fn missing_category_skips_the_preference_check() {
        let mut preferences = NotificationPreferences::default();
        preferences.financial = financial_all_off();
        preferences.system.new_features = false;
        let (dispatcher, repository, _toasts) = dispatcher_with(preferences);

        dispatcher
            .queue(NotificationRequest::new("u1", "Scheduled maintenance tonight", Severity::Info))
            .await;

        assert_eq!(repository.record_count(), 1);
    }

    #[tokio::test]
    async fn digest_cadence_defers_delivery() {
        let mut preferences = NotificationPreferences::default();
        preferences.frequency.real_time = false;
        preferences.frequency.daily_digest = true;
        let (dispatcher, repository, toasts) = dispatcher_with(preferences);

        dispatcher
            .queue(
                NotificationRequest::new("u1", "Loan due soon", Severity::Warning)
                    .with_category("due_soon"),
            )
            .await;

        assert_eq!(repository.record_count(), 0);
        assert_eq!(dispatcher.pending(), 1);
        assert!(toasts.is_empty());
    }

    #[tokio::test]
    async fn quiet_hours_withhold_the_toast_but_keep_the_record() {
        let mut preferences = NotificationPreferences::default();
        preferences.communication.quiet_hours_enabled = true;
        preferences.communication.quiet_hours_start = "00:00".to_string();
        preferences.communication.quiet_hours_end = "23:59".to_string();
        let (dispatcher, repository, toasts) = dispatcher_with(preferences);

        dispatcher
            .queue(
                NotificationRequest::new("u1", "Loan overdue", Severity::Error)
                    .with_category("overdue"),
            )
            .await;

        assert_eq!(repository.record_count(), 1);
        assert!(toasts.is_empty());
    }

    #[tokio::test]
    async fn persistence_failure_drops_the_request() {
        let (dispatcher, repository, toasts) = dispatcher_with(NotificationPreferences::default());
        repository.fail_inserts.store(true, Ordering::SeqCst);

        dispatcher
            .queue(
                NotificationRequest::new("u1", "Loan overdue", Severity::Error)
                    .with_category("overdue"),
            )
            .await;

        // At-most-once: nothing persisted, nothing queued for retry, no toast.
        assert_eq!(repository.record_count(), 0);
        assert_eq!(dispatcher.pending(), 0);
        assert!(toasts.is_empty());
    }

    #[tokio::test]
    async fn overflowing_queue_drops_the_oldest_request() {
        let mut preferences = NotificationPreferences::default();
        preferences.frequency.real_time = false;
        preferences.frequency.daily_digest = true;
        let (dispatcher, _repository, _toasts) = dispatcher_with(preferences);

        for i in 0..NOTIFICATION_QUEUE_CAPACITY + 10 {
            dispatcher
                .queue(NotificationRequest::new(
                    "u1",
                    format!("Notification {}", i),
                    Severity::Info,
                ))
                .await;
        }

        assert_eq!(dispatcher.pending(), NOTIFICATION_QUEUE_CAPACITY);
    }

    fn financial_all_off() -> crate::preferences::FinancialPreferences {
        crate::preferences::FinancialPreferences {
            overdue_payments: false,
            due_soon_reminders: false,
            upcoming_deadlines: false,
            low_balance_alerts: false,
            budget_exceeded: false,
            large_transactions: false,
        }
    }
}
