/// Utility functions for formatting readings and timestamps
use time::{format_description, OffsetDateTime};

/// Format a timestamp for the status page and logs
///
/// Converts an OffsetDateTime to DD.MM.YYYY - HH:MM:SS format
/// Falls back to default string representation if formatting fails.
pub fn format_datetime(dt: &OffsetDateTime) -> String {
    match format_description::parse("[day].[month].[year] - [hour]:[minute]:[second]") {
        Ok(format) => dt.format(&format).unwrap_or_else(|_| dt.to_string()),
        Err(_) => dt.to_string(),
    }
}

/// Render an optional reading with one decimal, or "N/A" when unavailable
pub fn format_reading(value: Option<f32>) -> String {
    match value {
        Some(v) => format!("{:.1}", v),
        None => "N/A".to_string(),
    }
}

/// Render an optional whole percentage, or "N/A" when unavailable
pub fn format_percent(value: Option<u8>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "N/A".to_string(),
    }
}
