//! Timestamp formatting.

use chrono::{Local, NaiveDateTime, SecondsFormat, Utc};

/// Display format used across the UI-facing payloads.
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a timestamp as `YYYY-MM-DD HH:MM:SS`, defaulting to local now.
pub fn format_timestamp(dt: Option<NaiveDateTime>) -> String {
    let dt = dt.unwrap_or_else(|| Local::now().naive_local());
    dt.format(DISPLAY_FORMAT).to_string()
}

/// Current UTC time as an RFC 3339 / ISO-8601 string.
pub fn iso_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, NaiveDate};

    #[test]
    fn test_format_given_timestamp() {
        let dt = NaiveDate::from_ymd_opt(2023, 12, 25)
            .and_then(|d| d.and_hms_opt(15, 30, 45))
            .unwrap();
        assert_eq!(format_timestamp(Some(dt)), "2023-12-25 15:30:45");
    }

    #[test]
    fn test_format_now() {
        let result = format_timestamp(None);
        assert_eq!(result.len(), 19);
        assert!(result.contains('-'));
        assert!(result.contains(':'));
    }

    #[test]
    fn test_iso_timestamp_parses() {
        let ts = iso_timestamp();
        assert!(DateTime::parse_from_rfc3339(&ts).is_ok());
        assert!(ts.ends_with('Z'));
    }
}
