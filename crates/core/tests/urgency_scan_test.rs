mod common;

use std::sync::Arc;

use chrono::{Duration, Local, NaiveDate};
use rust_decimal_macros::dec;

use moneta_core::auth::StaticSessionProvider;
use moneta_core::events::MockToastSink;
use moneta_core::lending::{
    LendBorrowRepository, LendBorrowRepositoryTrait, LoanDirection, LoanStatus, NewLendBorrow,
};
use moneta_core::notifications::{
    NotificationDispatcher, NotificationRepository, NotificationRepositoryTrait, Severity,
};
use moneta_core::preferences::{NotificationPreferencesService, PreferenceRepository};
use moneta_core::purchases::{NewPurchase, PurchaseRepository, PurchaseRepositoryTrait};
use moneta_core::urgency::UrgentItemScanner;

const USER: &str = "user-1";

struct Engine {
    lend_borrow: Arc<LendBorrowRepository>,
    purchases: Arc<PurchaseRepository>,
    notifications: Arc<NotificationRepository>,
    toasts: Arc<MockToastSink>,
    scanner: UrgentItemScanner,
}

fn engine() -> Engine {
    let pool = common::setup_pool();

    let preference_store = Arc::new(PreferenceRepository::new(pool.clone()));
    let sessions = Arc::new(StaticSessionProvider::new(USER));
    let preferences = Arc::new(NotificationPreferencesService::new(preference_store, sessions));

    let notifications = Arc::new(NotificationRepository::new(pool.clone()));
    let toasts = Arc::new(MockToastSink::new());
    let dispatcher = Arc::new(NotificationDispatcher::new(
        preferences,
        notifications.clone(),
        toasts.clone(),
    ));

    let lend_borrow = Arc::new(LendBorrowRepository::new(pool.clone()));
    let purchases = Arc::new(PurchaseRepository::new(pool));
    let scanner = UrgentItemScanner::new(
        lend_borrow.clone(),
        purchases.clone(),
        notifications.clone(),
        dispatcher,
    );

    Engine {
        lend_borrow,
        purchases,
        notifications,
        toasts,
        scanner,
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn loan_due(engine: &Engine, due_date: NaiveDate) -> String {
    engine
        .lend_borrow
        .create(NewLendBorrow {
            user_id: USER.to_string(),
            person_name: "Alice".to_string(),
            direction: LoanDirection::Lend,
            amount: dec!(500),
            currency: "USD".to_string(),
            due_date,
        })
        .expect("Failed to create loan record")
        .id
}

#[tokio::test]
async fn overdue_loan_end_to_end() {
    let engine = engine();
    let loan_id = loan_due(&engine, today() - Duration::days(1));

    engine.scanner.scan(USER).await;

    // The loan flipped to overdue.
    let loan = engine.lend_borrow.get_by_id(&loan_id).unwrap();
    assert_eq!(loan.status, LoanStatus::Overdue);

    // Exactly one notification, categorized and titled for urgency.
    let records = engine.notifications.list_active(USER).unwrap();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.category.as_deref(), Some("overdue"));
    assert_eq!(record.severity, Severity::Error);
    assert!(record.title.contains("🚨 URGENT"));
    assert!(record.title.contains("$500.00"));
    assert_eq!(record.body.as_deref(), Some("You lent $500.00 to Alice - 1 day overdue"));
    assert_eq!(engine.toasts.len(), 1);

    // A second scan against unchanged data emits nothing new.
    engine.scanner.force_scan(USER).await;
    assert_eq!(engine.notifications.list_active(USER).unwrap().len(), 1);
    assert_eq!(engine.toasts.len(), 1);
}

#[tokio::test]
async fn scans_inside_the_rate_limit_window_are_noops() {
    let engine = engine();

    // First scan consumes the rate-limit budget.
    engine.scanner.scan(USER).await;

    loan_due(&engine, today() + Duration::days(1));
    engine.scanner.scan(USER).await;
    assert!(engine.notifications.list_active(USER).unwrap().is_empty());

    // The forced entry point bypasses the limiter.
    engine.scanner.force_scan(USER).await;
    assert_eq!(engine.notifications.list_active(USER).unwrap().len(), 1);
}

#[tokio::test]
async fn settled_loans_stop_reminding() {
    let engine = engine();
    let loan_id = loan_due(&engine, today() - Duration::days(2));

    engine.scanner.force_scan(USER).await;
    assert_eq!(engine.notifications.list_active(USER).unwrap().len(), 1);

    engine
        .lend_borrow
        .update_status(&loan_id, LoanStatus::Settled)
        .unwrap();

    engine.scanner.force_scan(USER).await;
    assert!(engine.notifications.list_active(USER).unwrap().is_empty());
}

#[tokio::test]
async fn planned_purchases_surface_within_the_reminder_horizon() {
    let engine = engine();

    engine
        .purchases
        .create(NewPurchase {
            user_id: USER.to_string(),
            title: "Espresso machine".to_string(),
            price: dec!(1250),
            currency: "CHF".to_string(),
            planned_date: Some(today() + Duration::days(7)),
        })
        .unwrap();
    engine
        .purchases
        .create(NewPurchase {
            user_id: USER.to_string(),
            title: "New laptop".to_string(),
            price: dec!(2400),
            currency: "USD".to_string(),
            planned_date: Some(today() + Duration::days(8)),
        })
        .unwrap();

    engine.scanner.force_scan(USER).await;

    // Only the purchase inside the seven-day horizon is surfaced.
    let records = engine.notifications.list_active(USER).unwrap();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.category.as_deref(), Some("upcoming"));
    assert_eq!(record.severity, Severity::Info);
    assert_eq!(
        record.title,
        "📅 UPCOMING: Planned purchase: Espresso machine (CHF 1250.00)"
    );
}

#[tokio::test]
async fn overdue_items_sort_ahead_of_upcoming_ones() {
    let engine = engine();
    loan_due(&engine, today() + Duration::days(6));
    loan_due(&engine, today() - Duration::days(3));

    engine.scanner.force_scan(USER).await;

    let toasts = engine.toasts.events();
    assert_eq!(toasts.len(), 2);
    // Emission order follows the deterministic (status, days-until) sort.
    assert!(toasts[0].title.contains("🚨 URGENT"));
    assert!(toasts[1].title.contains("📅 UPCOMING"));
}

#[tokio::test]
async fn clear_urgency_notifications_wipes_reminders() {
    let engine = engine();
    loan_due(&engine, today() - Duration::days(1));

    engine.scanner.force_scan(USER).await;
    assert_eq!(engine.notifications.list_active(USER).unwrap().len(), 1);

    engine.scanner.clear_urgency_notifications(USER);
    assert!(engine.notifications.list_active(USER).unwrap().is_empty());
}
