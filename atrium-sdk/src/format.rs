#![forbid(unsafe_code)]

use chrono::{DateTime, TimeZone};

/// Render a timestamp as `YYYY-MM-DD HH:mm:ss`, or `"N/A"` when absent.
pub fn format_date_time<Tz: TimeZone>(time: Option<DateTime<Tz>>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match time {
        Some(t) => t.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => "N/A".to_string(),
    }
}

/// Normalize the stringly-null values the backend occasionally emits.
pub fn parse_str_empty(value: Option<&str>) -> String {
    match value {
        None | Some("") | Some("undefined") | Some("null") => String::new(),
        Some(other) => other.to_string(),
    }
}
