use std::fmt::Write;

use chrono::NaiveDateTime;
use clockface_proto::{
    config::ClockConfig,
    ports::{DateTimeFormatter, FormatError},
};

/// Formats timestamps with a strftime pattern resolved once from the config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChronoFormatter {
    pattern: String,
}

impl ChronoFormatter {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }

    pub fn from_config(config: &ClockConfig) -> Self {
        Self::new(config.pattern().into_owned())
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl Default for ChronoFormatter {
    /// The `en-US` long style: `Wednesday, March 5, 2025, 2:07 PM`.
    fn default() -> Self {
        Self::from_config(&ClockConfig::default())
    }
}

impl DateTimeFormatter for ChronoFormatter {
    fn format(&self, at: &NaiveDateTime) -> Result<String, FormatError> {
        let mut text = String::new();

        // chrono reports bad specifiers through fmt::Error instead of at parse time
        write!(text, "{}", at.format(&self.pattern)).map_err(|_| {
            FormatError::Unrenderable {
                pattern: self.pattern.clone(),
                at:      *at,
            }
        })?;

        Ok(text)
    }
}
