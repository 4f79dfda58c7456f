//! Date and instant parsing/formatting with configurable chrono patterns

use crate::value::CANONICAL_DATE_FORMAT;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};
use std::fmt::{Display, Write};

/// Patterns used when text is converted to a DATE or INSTANT
///
/// Patterns use chrono's strftime syntax. An instant pattern of `None` means RFC 3339.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemporalFormats {
    pub date: String,
    pub instant: Option<String>,
    /// Offset assumed when an instant pattern carries no zone
    pub default_offset: FixedOffset,
}

impl Default for TemporalFormats {
    fn default() -> Self {
        Self {
            date: CANONICAL_DATE_FORMAT.to_owned(),
            instant: None,
            default_offset: Utc.fix(),
        }
    }
}

impl TemporalFormats {
    pub fn parse_date(&self, text: &str, pattern: Option<&str>) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(text, pattern.unwrap_or(&self.date)).ok()
    }

    /// Parse an instant, falling back to the default offset for zoneless patterns
    /// and to midnight for date-only patterns.
    pub fn parse_instant(&self, text: &str, pattern: Option<&str>) -> Option<DateTime<FixedOffset>> {
        let Some(pattern) = pattern.or(self.instant.as_deref()) else {
            return DateTime::parse_from_rfc3339(text).ok();
        };

        if let Ok(instant) = DateTime::parse_from_str(text, pattern) {
            return Some(instant);
        }
        let naive = NaiveDateTime::parse_from_str(text, pattern)
            .ok()
            .or_else(|| NaiveDate::parse_from_str(text, pattern).ok()?.and_hms_opt(0, 0, 0))?;
        self.default_offset.from_local_datetime(&naive).single()
    }

    /// The pattern an instant conversion will use, for messages
    pub fn instant_pattern<'a>(&'a self, pattern: Option<&'a str>) -> &'a str {
        pattern.or(self.instant.as_deref()).unwrap_or("RFC 3339")
    }
}

/// Render with a strftime pattern; `None` when the pattern is invalid or asks
/// for fields the value does not have.
pub fn format_with<T: Display>(formatted: T) -> Option<String> {
    let mut out = String::new();
    write!(out, "{formatted}").ok()?;
    Some(out)
}
