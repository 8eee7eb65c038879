//! Relative age labels for recent items.
//!
//! # Invariants
//! - Labels are a pure function of `(timestamp, now, time zone)`.
//! - Ages use truncating integer division, never calendar month arithmetic.
//! - Timestamps in the future render as `just now`.
//!
//! | age            | label                    |
//! |----------------|--------------------------|
//! | < 60s          | `just now`               |
//! | < 60min        | `{m}m ago`               |
//! | < 24h          | `{h}h ago`               |
//! | < 7d           | `{d}d ago`               |
//! | < 30d          | `{d / 7}w ago`           |
//! | otherwise      | `Mar 4` / `Mar 4, 2023`  |

use crate::model::EpochMs;
use chrono::{Datelike, TimeZone, Utc};
use std::fmt::Display;

/// Label used for ages under one minute and for future timestamps.
pub const JUST_NOW: &str = "just now";

const MS_PER_SECOND: i64 = 1_000;
const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;
const DAYS_PER_WEEK: i64 = 7;
const WEEK_BAND_DAYS: i64 = 30;

/// Formats the age of `timestamp` relative to `now`, with calendar dates in UTC.
pub fn relative_label(timestamp: EpochMs, now: EpochMs) -> String {
    relative_label_in(timestamp, now, &Utc)
}

/// Formats the age of `timestamp` relative to `now`.
///
/// Calendar-date labels (ages of 30 days and more) read month, day and year
/// in `tz`. The year is shown only when it differs from `now`'s year.
pub fn relative_label_in<Tz>(timestamp: EpochMs, now: EpochMs, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let age_seconds = now.saturating_sub(timestamp) / MS_PER_SECOND;

    if age_seconds < SECONDS_PER_MINUTE {
        return JUST_NOW.to_string();
    }
    if age_seconds < SECONDS_PER_HOUR {
        return format!("{}m ago", age_seconds / SECONDS_PER_MINUTE);
    }
    if age_seconds < SECONDS_PER_DAY {
        return format!("{}h ago", age_seconds / SECONDS_PER_HOUR);
    }

    let age_days = age_seconds / SECONDS_PER_DAY;
    if age_days < DAYS_PER_WEEK {
        return format!("{age_days}d ago");
    }
    let weeks_label = format!("{}w ago", age_days / DAYS_PER_WEEK);
    if age_days < WEEK_BAND_DAYS {
        return weeks_label;
    }

    // Instants outside chrono's calendar range keep the week form.
    calendar_label(timestamp, now, tz).unwrap_or(weeks_label)
}

/// Current instant in epoch milliseconds.
pub fn now_epoch_ms() -> EpochMs {
    Utc::now().timestamp_millis()
}

fn calendar_label<Tz>(timestamp: EpochMs, now: EpochMs, tz: &Tz) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let modified = tz.timestamp_millis_opt(timestamp).single()?;
    let current = tz.timestamp_millis_opt(now).single()?;
    let pattern = if modified.year() == current.year() {
        "%b %-d"
    } else {
        "%b %-d, %Y"
    };
    Some(modified.format(pattern).to_string())
}

#[cfg(test)]
mod tests {
    use super::{relative_label, relative_label_in, JUST_NOW};
    use chrono::{FixedOffset, TimeZone, Utc};

    const SECOND: i64 = 1_000;
    const MINUTE: i64 = 60 * SECOND;
    const HOUR: i64 = 60 * MINUTE;
    const DAY: i64 = 24 * HOUR;

    fn now() -> i64 {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0)
            .single()
            .expect("valid fixed instant")
            .timestamp_millis()
    }

    fn label_for_age(age_ms: i64) -> String {
        relative_label(now() - age_ms, now())
    }

    #[test]
    fn seconds_band_boundaries() {
        assert_eq!(label_for_age(0), JUST_NOW);
        assert_eq!(label_for_age(59 * SECOND), "just now");
        assert_eq!(label_for_age(60 * SECOND - 1), "just now");
        assert_eq!(label_for_age(60 * SECOND), "1m ago");
    }

    #[test]
    fn minutes_and_hours_band_boundaries() {
        assert_eq!(label_for_age(2 * MINUTE), "2m ago");
        assert_eq!(label_for_age(3599 * SECOND), "59m ago");
        assert_eq!(label_for_age(3600 * SECOND), "1h ago");
        assert_eq!(label_for_age(24 * HOUR - SECOND), "23h ago");
        assert_eq!(label_for_age(24 * HOUR), "1d ago");
    }

    #[test]
    fn days_and_weeks_band_boundaries() {
        assert_eq!(label_for_age(3 * DAY), "3d ago");
        assert_eq!(label_for_age(6 * DAY + 23 * HOUR), "6d ago");
        assert_eq!(label_for_age(7 * DAY), "1w ago");
        assert_eq!(label_for_age(13 * DAY), "1w ago");
        assert_eq!(label_for_age(14 * DAY), "2w ago");
        assert_eq!(label_for_age(29 * DAY), "4w ago");
        assert_eq!(label_for_age(30 * DAY - SECOND), "4w ago");
    }

    #[test]
    fn thirty_days_and_older_render_calendar_date() {
        // 2024-06-15 minus 31 days is 2024-05-15.
        assert_eq!(label_for_age(31 * DAY), "May 15");
        assert_eq!(label_for_age(30 * DAY), "May 16");
    }

    #[test]
    fn calendar_date_includes_year_only_when_it_differs() {
        let last_year = Utc
            .with_ymd_and_hms(2023, 12, 3, 8, 0, 0)
            .single()
            .expect("valid instant")
            .timestamp_millis();
        assert_eq!(relative_label(last_year, now()), "Dec 3, 2023");

        let same_year = Utc
            .with_ymd_and_hms(2024, 1, 9, 8, 0, 0)
            .single()
            .expect("valid instant")
            .timestamp_millis();
        assert_eq!(relative_label(same_year, now()), "Jan 9");
    }

    #[test]
    fn future_timestamps_render_just_now() {
        assert_eq!(relative_label(now() + 5 * DAY, now()), "just now");
        assert_eq!(relative_label(i64::MAX, i64::MIN), "just now");
    }

    #[test]
    fn calendar_fields_follow_requested_time_zone() {
        // 2024-03-01T02:00Z is still Feb 29 at UTC-05:00.
        let timestamp = Utc
            .with_ymd_and_hms(2024, 3, 1, 2, 0, 0)
            .single()
            .expect("valid instant")
            .timestamp_millis();
        let now = timestamp + 40 * DAY;
        let new_york = FixedOffset::west_opt(5 * 3600).expect("valid offset");

        assert_eq!(relative_label(timestamp, now), "Mar 1");
        assert_eq!(relative_label_in(timestamp, now, &new_york), "Feb 29");
    }

    #[test]
    fn out_of_range_instants_keep_week_form() {
        let label = relative_label(i64::MIN, 0);
        assert!(label.ends_with("w ago"), "unexpected label {label}");
    }
}
