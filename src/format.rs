//! Date formatting helpers for server-rendered timestamps

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::config::DateConfig;

/// Digits in a Unix-millisecond timestamp from September 2001 on
const MIN_MILLIS_DIGITS: usize = 13;

/// How much of a timestamp to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    Short,
    Long,
    DateTime,
}

/// Format a timestamp using the configured pattern for `style`
pub fn format_date<Tz: TimeZone>(ts: &DateTime<Tz>, style: DateStyle, config: &DateConfig) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let pattern = match style {
        DateStyle::Short => &config.short_format,
        DateStyle::Long => &config.long_format,
        DateStyle::DateTime => &config.datetime_format,
    };
    ts.format(pattern).to_string()
}

/// Parse the date strings the server writes into `data-date` attributes.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DD` and Unix
/// milliseconds written with at least 13 digits. Returns `None` for anything else so the original text
/// stays on the page.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    // Short integers are years or counts, not epoch milliseconds
    if raw.len() < MIN_MILLIS_DIGITS || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse::<i64>()
        .ok()
        .and_then(DateTime::from_timestamp_millis)
}

/// Reformat a raw attribute value, or `None` if it does not parse
pub fn reformat(raw: &str, style: DateStyle, config: &DateConfig) -> Option<String> {
    parse_date(raw).map(|dt| format_date(&dt, style, config))
}

/// Footer line for print documents
pub fn format_timestamp_footer(ts: &DateTime<Utc>, pattern: &str) -> String {
    format!("Printed on {}", ts.format(pattern))
}

/// "3 minutes ago" style text relative to `now`
pub fn relative_time(ts: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - ts).num_seconds();
    if secs < 0 {
        return "in the future".to_string();
    }

    if secs < 45 {
        return "just now".to_string();
    }

    // Round within a unit, then carry into the next one at its limit
    let minutes = ((secs + 30) / 60).max(1);
    let hours = (secs + 1800) / 3600;
    let days = (secs + 43_200) / 86_400;
    let (value, unit) = if minutes < 60 {
        (minutes, "minute")
    } else if hours < 24 {
        (hours, "hour")
    } else if days < 30 {
        (days, "day")
    } else {
        return format!("on {}", ts.format("%Y-%m-%d"));
    };
    if value == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", value, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 0).unwrap()
    }

    #[test]
    fn test_styles() {
        let config = DateConfig::default();
        assert_eq!(format_date(&ts(), DateStyle::Short, &config), "05/03/2024");
        assert_eq!(format_date(&ts(), DateStyle::Long, &config), "March 5, 2024");
        assert_eq!(format_date(&ts(), DateStyle::DateTime, &config), "05/03/2024 14:07");
    }

    #[test]
    fn test_footer() {
        assert_eq!(
            format_timestamp_footer(&ts(), "%Y-%m-%d %H:%M"),
            "Printed on 2024-03-05 14:07"
        );
    }

    #[test]
    fn test_parse_variants() {
        assert_eq!(parse_date("2024-03-05T14:07:00Z"), Some(ts()));
        assert_eq!(parse_date("2024-03-05 14:07:00"), Some(ts()));
        assert_eq!(parse_date(&ts().timestamp_millis().to_string()), Some(ts()));
        assert_eq!(
            parse_date("2024-03-05").unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap()
        );
        assert!(parse_date("yesterday").is_none());
        assert!(parse_date("2024").is_none());
        assert!(parse_date("1700000000").is_none());
        assert!(parse_date("-1700000000000").is_none());
        assert!(parse_date("  ").is_none());
    }

    #[test]
    fn test_reformat_leaves_garbage_alone() {
        let config = DateConfig::default();
        assert_eq!(reformat("n/a", DateStyle::Short, &config), None);
        assert_eq!(
            reformat("2024-03-05", DateStyle::Short, &config).as_deref(),
            Some("05/03/2024")
        );
    }

    #[test]
    fn test_relative_time() {
        let now = ts();
        assert_eq!(relative_time(now - Duration::seconds(10), now), "just now");
        assert_eq!(relative_time(now - Duration::seconds(60), now), "1 minute ago");
        assert_eq!(relative_time(now - Duration::minutes(5), now), "5 minutes ago");
        assert_eq!(relative_time(now - Duration::hours(3), now), "3 hours ago");
        assert_eq!(relative_time(now - Duration::days(2), now), "2 days ago");
        assert_eq!(relative_time(now + Duration::hours(1), now), "in the future");
        assert_eq!(relative_time(now - Duration::days(90), now), "on 2023-12-06");
    }

    #[test]
    fn test_relative_time_carries_at_unit_limits() {
        let now = ts();
        assert_eq!(relative_time(now - Duration::seconds(3590), now), "1 hour ago");
        assert_eq!(relative_time(now - Duration::seconds(86_399), now), "1 day ago");
        assert_eq!(relative_time(now - Duration::seconds(2_591_999), now), "on 2024-02-04");
        assert_eq!(relative_time(now - Duration::seconds(3540), now), "59 minutes ago");
    }
}
