//! Engine configuration
//!
//! The only cross-cutting knobs are the temporal patterns used when text is
//! converted to a DATE or INSTANT. They are fixed when an expression is compiled.

use crate::error::{CompileError, CompileResult};
use ael_types::TemporalFormats;
use chrono::format::{Item, StrftimeItems};
use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

pub const DATE_FORMAT_VAR: &str = "AEL_DATE_FORMAT";
pub const INSTANT_FORMAT_VAR: &str = "AEL_INSTANT_FORMAT";
pub const DEFAULT_OFFSET_VAR: &str = "AEL_DEFAULT_OFFSET";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// chrono pattern for `toDate()` and STRING to DATE coercion
    pub date_format: String,
    /// chrono pattern for `toInstant()` and STRING to INSTANT coercion; RFC 3339 when absent
    pub instant_format: Option<String>,
    /// Offset such as `+02:00` assumed when an instant pattern has no zone
    pub default_offset: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            date_format: "%Y-%m-%d".to_owned(),
            instant_format: None,
            default_offset: "+00:00".to_owned(),
        }
    }
}

impl EngineConfig {
    /// Defaults overridden by `AEL_DATE_FORMAT`, `AEL_INSTANT_FORMAT` and `AEL_DEFAULT_OFFSET`
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for the variable names
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(date) = lookup(DATE_FORMAT_VAR) {
            config.date_format = date;
        }
        if let Some(instant) = lookup(INSTANT_FORMAT_VAR) {
            config.instant_format = Some(instant).filter(|s| !s.is_empty());
        }
        if let Some(offset) = lookup(DEFAULT_OFFSET_VAR) {
            config.default_offset = offset;
        }
        config
    }

    /// Validate the patterns and resolve the offset
    pub fn temporal_formats(&self) -> CompileResult<TemporalFormats> {
        validate_pattern(&self.date_format)?;
        if let Some(instant) = &self.instant_format {
            validate_pattern(instant)?;
        }
        Ok(TemporalFormats {
            date: self.date_format.clone(),
            instant: self.instant_format.clone(),
            default_offset: parse_offset(&self.default_offset)?,
        })
    }
}

fn validate_pattern(pattern: &str) -> CompileResult<()> {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(CompileError::configuration(format!("invalid date/time pattern '{pattern}'")));
    }
    Ok(())
}

fn parse_offset(offset: &str) -> CompileResult<FixedOffset> {
    match offset.trim() {
        "Z" | "z" | "UTC" => Ok(Utc.fix()),
        other => other
            .parse::<FixedOffset>()
            .map_err(|_| CompileError::configuration(format!("invalid offset '{offset}', expected e.g. +02:00"))),
    }
}
