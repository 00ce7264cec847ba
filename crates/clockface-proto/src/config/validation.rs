use std::fmt::Write;

use chrono::NaiveDateTime;

use super::{ClockConfig, Config, DEFAULT_LOCALE};

/// Errors returned when validating a [`Config`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    /// The display target identifier is empty or whitespace.
    EmptyTarget,

    /// The locale tag is not one the formatter can render.
    UnsupportedLocale { locale: String },

    /// An explicit refresh interval of zero was configured.
    ZeroInterval,

    /// The strftime override contains an unknown or incomplete specifier, or
    /// one that needs a UTC offset the local wall clock does not carry.
    InvalidFormat { format: String }
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTarget => write!(f, "clock target identifier must not be empty"),
            Self::UnsupportedLocale {
                locale
            } => {
                write!(
                    f,
                    "unsupported locale '{}', only '{}' is available",
                    locale, DEFAULT_LOCALE
                )
            }
            Self::ZeroInterval => write!(f, "refresh interval must be greater than zero"),
            Self::InvalidFormat {
                format
            } => {
                write!(f, "invalid clock format '{}'", format)
            }
        }
    }
}

impl std::error::Error for ConfigValidationError {}

impl Config {
    /// Validates the configuration before an updater is built from it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigValidationError`] for an empty target, a locale other
    /// than `en-US`, a zero refresh interval or a malformed format override.
    ///
    /// # Examples
    ///
    /// ```
    /// use clockface_proto::config::Config;
    ///
    /// let config = Config::default();
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.clock.validate()
    }
}

impl ClockConfig {
    /// See [`Config::validate`].
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.target.trim().is_empty() {
            return Err(ConfigValidationError::EmptyTarget);
        }

        if !is_supported_locale(&self.locale) {
            return Err(ConfigValidationError::UnsupportedLocale {
                locale: self.locale.clone()
            });
        }

        if self.refresh_interval.is_some_and(|interval| interval.is_zero()) {
            return Err(ConfigValidationError::ZeroInterval);
        }

        if let Some(format) = &self.format
            && !is_valid_format(format)
        {
            return Err(ConfigValidationError::InvalidFormat {
                format: format.clone()
            });
        }

        Ok(())
    }
}

fn is_supported_locale(locale: &str) -> bool {
    locale.replace('_', "-").eq_ignore_ascii_case(DEFAULT_LOCALE)
}

fn is_valid_format(format: &str) -> bool {
    if format.trim().is_empty() {
        return false;
    }

    // offset specifiers parse fine and only fail once a naive timestamp is rendered
    let mut sample = String::new();
    write!(sample, "{}", NaiveDateTime::default().format(format)).is_ok()
}
