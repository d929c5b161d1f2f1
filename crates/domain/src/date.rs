use chrono::prelude::*;

/// Human readable start date used in notification emails,
/// e.g. `Jan 10, 2024, 10:00 AM`. Times are rendered in UTC.
pub fn format_event_date(timestamp_millis: i64) -> String {
    Utc.timestamp_millis_opt(timestamp_millis)
        .single()
        .map(|date| date.format("%b %d, %Y, %I:%M %p").to_string())
        .unwrap_or_else(|| "-".into())
}
