//! Quiet-hours suppression window evaluation.

use chrono::{NaiveTime, Timelike};

use super::preferences_model::CommunicationPreferences;

/// Whether toast delivery is currently suppressed by the user's quiet-hours
/// window. Pure; the caller supplies the current time of day.
///
/// Windows are inclusive on both boundaries. A window whose start is later
/// than its end crosses midnight. A window with equal endpoints covers
/// exactly that minute. Endpoints that fail to parse disable suppression.
pub fn is_suppressed(communication: &CommunicationPreferences, now: NaiveTime) -> bool {
    if !communication.quiet_hours_enabled {
        return false;
    }

    let (start, end) = match (
        minutes_since_midnight(&communication.quiet_hours_start),
        minutes_since_midnight(&communication.quiet_hours_end),
    ) {
        (Some(start), Some(end)) => (start, end),
        _ => return false,
    };

    let current = now.hour() * 60 + now.minute();

    if start <= end {
        start <= current && current <= end
    } else {
        current >= start || current <= end
    }
}

/// Parses a `HH:MM` 24-hour string into minutes since midnight.
fn minutes_since_midnight(value: &str) -> Option<u32> {
    let (hours, minutes) = value.split_once(':')?;
    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some(hours * 60 + minutes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn window(enabled: bool, start: &str, end: &str) -> CommunicationPreferences {
        CommunicationPreferences {
            quiet_hours_enabled: enabled,
            quiet_hours_start: start.to_string(),
            quiet_hours_end: end.to_string(),
            ..Default::default()
        }
    }

    fn at(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn disabled_window_never_suppresses() {
        let communication = window(false, "00:00", "23:59");
        assert!(!is_suppressed(&communication, at(12, 0)));
    }

    #[test]
    fn same_day_window_boundaries_are_inclusive() {
        let communication = window(true, "08:00", "22:00");
        assert!(is_suppressed(&communication, at(8, 0)));
        assert!(is_suppressed(&communication, at(22, 0)));
        assert!(!is_suppressed(&communication, at(7, 59)));
        assert!(!is_suppressed(&communication, at(22, 1)));
    }

    #[test]
    fn overnight_window_wraps_midnight() {
        let communication = window(true, "22:00", "08:00");
        assert!(is_suppressed(&communication, at(23, 0)));
        assert!(is_suppressed(&communication, at(1, 0)));
        assert!(!is_suppressed(&communication, at(12, 0)));
    }

    #[test]
    fn equal_endpoints_cover_one_minute() {
        let communication = window(true, "13:30", "13:30");
        assert!(is_suppressed(&communication, at(13, 30)));
        assert!(!is_suppressed(&communication, at(13, 29)));
        assert!(!is_suppressed(&communication, at(13, 31)));
    }

    #[test]
    fn unparseable_endpoints_disable_suppression() {
        assert!(!is_suppressed(&window(true, "late", "08:00"), at(23, 0)));
        assert!(!is_suppressed(&window(true, "22:00", "8am"), at(23, 0)));
        assert!(!is_suppressed(&window(true, "25:00", "08:00"), at(23, 0)));
        assert!(!is_suppressed(&window(true, "22:60", "08:00"), at(23, 0)));
    }

    proptest! {
        // The evaluator agrees with a brute-force minute-membership model
        // for every well-formed window.
        #[test]
        fn matches_minute_membership_model(
            start in 0u32..1440,
            end in 0u32..1440,
            current in 0u32..1440,
        ) {
            let communication = window(
                true,
                &format!("{:02}:{:02}", start / 60, start % 60),
                &format!("{:02}:{:02}", end / 60, end % 60),
            );
            let expected = if start <= end {
                (start..=end).contains(&current)
            } else {
                current >= start || current <= end
            };
            let actual = is_suppressed(&communication, at(current / 60, current % 60));
            prop_assert_eq!(actual, expected);
        }
    }
}
