// src/utils/time.rs

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

/// Parses the timestamp formats seen in upstream feeds: RFC 3339 with an offset, or a
/// bare ISO date-time ("2024-01-15T10:00:00") which is taken as UTC.
pub fn parse_feed_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Human friendly age of a posting relative to `now` ("3 days ago").
pub fn format_relative_time(published_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = now.signed_duration_since(published_at);
    let hours = diff.num_hours();
    let days = hours / 24;
    let weeks = days / 7;
    let months = days / 30;

    if hours < 1 {
        "Posted recently".to_string()
    } else if hours < 24 {
        plural(hours, "hour")
    } else if days < 7 {
        plural(days, "day")
    } else if weeks < 4 {
        plural(weeks, "week")
    } else if months < 12 {
        plural(months.max(1), "month")
    } else {
        "Over a year ago".to_string()
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", n, unit)
    }
}
