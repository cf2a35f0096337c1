//! Date/time stamping for history entries.
//!
//! Patterns are chrono strftime strings. They are checked once in
//! [`StampFormat::new`]; chrono panics when an invalid pattern is rendered.

use std::fmt;

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDateTime;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StampFormatError {
    Empty { which: &'static str },
    Invalid { which: &'static str, pattern: String },
}

impl fmt::Display for StampFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StampFormatError::Empty { which } => write!(f, "{which} format is empty"),
            StampFormatError::Invalid { which, pattern } => {
                write!(f, "{which} format '{pattern}' is not a valid strftime pattern")
            }
        }
    }
}

impl std::error::Error for StampFormatError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StampFormat {
    date_format: String,
    time_format: String,
}

impl StampFormat {
    pub fn new(
        date_format: impl Into<String>,
        time_format: impl Into<String>,
    ) -> Result<Self, StampFormatError> {
        let date_format = date_format.into();
        let time_format = time_format.into();
        check_pattern("date", &date_format)?;
        check_pattern("time", &time_format)?;
        Ok(Self {
            date_format,
            time_format,
        })
    }

    /// `(date, time)` strings for `at`.
    pub fn stamp(&self, at: &NaiveDateTime) -> (String, String) {
        (
            at.format(&self.date_format).to_string(),
            at.format(&self.time_format).to_string(),
        )
    }
}

impl Default for StampFormat {
    /// `1/2/2026` and `3:04:05 PM`.
    fn default() -> Self {
        Self {
            date_format: "%-m/%-d/%Y".to_string(),
            time_format: "%-I:%M:%S %p".to_string(),
        }
    }
}

fn check_pattern(which: &'static str, pattern: &str) -> Result<(), StampFormatError> {
    if pattern.trim().is_empty() {
        return Err(StampFormatError::Empty { which });
    }
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(StampFormatError::Invalid {
            which,
            pattern: pattern.to_string(),
        });
    }
    Ok(())
}
