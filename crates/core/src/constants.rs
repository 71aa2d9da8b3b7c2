/// Preference document key for notification settings
pub const NOTIFICATION_SETTINGS_KEY: &str = "notification_settings";

/// Minimum interval between urgency scans, in seconds
pub const SCAN_INTERVAL_SECS: i64 = 60 * 60;

/// Maximum number of queued notifications awaiting dispatch
pub const NOTIFICATION_QUEUE_CAPACITY: usize = 256;

/// Items due within this many days classify as due soon
pub const DUE_SOON_WINDOW_DAYS: i64 = 3;

/// Items due within this many days (but past the due-soon window) classify as upcoming
pub const UPCOMING_WINDOW_DAYS: i64 = 7;
