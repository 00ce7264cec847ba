use std::borrow::Cow;
use std::time::Duration;

use serde::Deserialize;
use serde_with::{DurationMilliSeconds, serde_as};

mod validation;

pub use validation::ConfigValidationError;

pub const DEFAULT_CONFIG_FILE_PATH: &str = "~/.config/clockface/config.toml";

/// Identifier of the display element updated when none is configured.
pub const DEFAULT_TARGET: &str = "current-time";

/// The only locale tag the formatter knows how to render.
pub const DEFAULT_LOCALE: &str = "en-US";

pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(60);
pub const SECONDS_REFRESH_INTERVAL: Duration = Duration::from_secs(1);

const SECOND_SPECIFIERS: [&str; 5] = ["%S", "%T", "%X", "%r", "%s"];

#[derive(Deserialize, Clone, Copy, Default, Debug, PartialEq, Eq)]
pub enum WeekdayStyle {
    /// `Wednesday`
    #[default]
    Long,
    /// `Wed`
    Short,
    Hidden,
}

#[derive(Deserialize, Clone, Copy, Default, Debug, PartialEq, Eq)]
pub enum MonthStyle {
    /// `March 5, 2025`
    #[default]
    Long,
    /// `Mar 5, 2025`
    Short,
    /// `3/5/2025`
    Numeric,
}

#[derive(Deserialize, Clone, Copy, Default, Debug, PartialEq, Eq)]
pub enum HourCycle {
    /// `2:07 PM`
    #[default]
    H12,
    /// `14:07`
    H23,
}

/// What the updater does when the display element is absent at write time.
#[derive(Deserialize, Clone, Copy, Default, Debug, PartialEq, Eq)]
pub enum MissingTargetPolicy {
    /// Drop the write without a trace.
    #[default]
    Ignore,
    /// Log a warning whenever the element goes missing.
    Warn,
}

/// Settings of the clock display updater.
#[serde_as]
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ClockConfig {
    #[serde(default = "default_target")]
    pub target:            String,
    /// Locale tag of the rendered text. Only [`DEFAULT_LOCALE`] passes
    /// validation; the weekday and month names always come out in English.
    #[serde(default = "default_locale")]
    pub locale:            String,
    #[serde(default)]
    pub weekday:           WeekdayStyle,
    #[serde(default)]
    pub month:             MonthStyle,
    #[serde(default)]
    pub hour_cycle:        HourCycle,
    /// strftime pattern replacing the weekday/month/hour styles.
    #[serde(default)]
    pub format:            Option<String>,
    /// Missing in the file means derived from the pattern.
    #[serde_as(as = "Option<DurationMilliSeconds<u64>>")]
    #[serde(rename = "refresh_interval_ms")]
    pub refresh_interval:  Option<Duration>,
    #[serde(default)]
    pub on_missing_target: MissingTargetPolicy,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            target:            default_target(),
            locale:            default_locale(),
            weekday:           WeekdayStyle::default(),
            month:             MonthStyle::default(),
            hour_cycle:        HourCycle::default(),
            format:            None,
            refresh_interval:  None,
            on_missing_target: MissingTargetPolicy::default(),
        }
    }
}

impl ClockConfig {
    /// strftime pattern used to render the display text.
    ///
    /// # Examples
    ///
    /// ```
    /// use clockface_proto::config::ClockConfig;
    ///
    /// let config = ClockConfig::default();
    /// assert_eq!(config.pattern(), "%A, %B %-d, %Y, %-I:%M %p");
    /// ```
    pub fn pattern(&self) -> Cow<'_, str> {
        if let Some(format) = &self.format {
            return Cow::Borrowed(format.as_str());
        }

        let weekday = match self.weekday {
            WeekdayStyle::Long => "%A, ",
            WeekdayStyle::Short => "%a, ",
            WeekdayStyle::Hidden => "",
        };
        let date = match self.month {
            MonthStyle::Long => "%B %-d, %Y",
            MonthStyle::Short => "%b %-d, %Y",
            MonthStyle::Numeric => "%-m/%-d/%Y",
        };
        let time = match self.hour_cycle {
            HourCycle::H12 => "%-I:%M %p",
            HourCycle::H23 => "%H:%M",
        };

        Cow::Owned(format!("{weekday}{date}, {time}"))
    }

    /// Interval between scheduled refreshes.
    ///
    /// An explicit `refresh_interval_ms` wins. Otherwise patterns that show
    /// seconds refresh every second and everything else once a minute.
    pub fn refresh_interval(&self) -> Duration {
        if let Some(interval) = self.refresh_interval {
            return interval;
        }

        let pattern = self.pattern();

        if SECOND_SPECIFIERS
            .iter()
            .any(|specifier| pattern.contains(specifier))
        {
            SECONDS_REFRESH_INTERVAL
        } else {
            DEFAULT_REFRESH_INTERVAL
        }
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub clock:     ClockConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            clock:     ClockConfig::default(),
        }
    }
}

fn default_target() -> String {
    DEFAULT_TARGET.to_owned()
}

fn default_locale() -> String {
    DEFAULT_LOCALE.to_owned()
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config: Config = toml::from_str("").expect("parse empty config");
        assert_eq!(config, Config::default());
        assert_eq!(config.clock.target, "current-time");
        assert_eq!(config.clock.locale, "en-US");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn clock_section_overrides_defaults() {
        let config: Config = toml::from_str(
            r#"
            log_level = "debug"

            [clock]
            target = "header-clock"
            weekday = "Short"
            month = "Numeric"
            hour_cycle = "H23"
            refresh_interval_ms = 15000
            on_missing_target = "Warn"
            "#,
        )
        .expect("parse config");

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.clock.target, "header-clock");
        assert_eq!(config.clock.weekday, WeekdayStyle::Short);
        assert_eq!(config.clock.month, MonthStyle::Numeric);
        assert_eq!(config.clock.hour_cycle, HourCycle::H23);
        assert_eq!(config.clock.refresh_interval, Some(Duration::from_secs(15)));
        assert_eq!(config.clock.on_missing_target, MissingTargetPolicy::Warn);
        assert_eq!(config.clock.pattern(), "%a, %-m/%-d/%Y, %H:%M");
    }

    #[test]
    fn default_pattern_is_long_twelve_hour() {
        assert_eq!(
            ClockConfig::default().pattern(),
            "%A, %B %-d, %Y, %-I:%M %p"
        );
    }

    #[test]
    fn hidden_weekday_drops_leading_name() {
        let config = ClockConfig {
            weekday: WeekdayStyle::Hidden,
            month: MonthStyle::Short,
            ..Default::default()
        };

        assert_eq!(config.pattern(), "%b %-d, %Y, %-I:%M %p");
    }

    #[test]
    fn format_override_replaces_styles() {
        let config = ClockConfig {
            format: Some("%H:%M:%S".to_owned()),
            weekday: WeekdayStyle::Short,
            ..Default::default()
        };

        assert_eq!(config.pattern(), "%H:%M:%S");
    }

    #[test]
    fn default_interval_is_one_minute() {
        assert_eq!(
            ClockConfig::default().refresh_interval(),
            Duration::from_secs(60)
        );
    }

    #[test]
    fn interval_with_seconds_in_format() {
        let config = ClockConfig {
            format: Some("%H:%M:%S".to_owned()),
            ..Default::default()
        };

        assert_eq!(config.refresh_interval(), Duration::from_secs(1));
    }

    #[test]
    fn explicit_interval_wins_over_format() {
        let config = ClockConfig {
            format: Some("%T".to_owned()),
            refresh_interval: Some(Duration::from_millis(250)),
            ..Default::default()
        };

        assert_eq!(config.refresh_interval(), Duration::from_millis(250));
    }
}
