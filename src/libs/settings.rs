//! Persistent user settings for the work clock.
//!
//! Settings live in a flat JSON file inside the application data directory:
//!
//! ```json
//! {
//!   "work_duration": 45,
//!   "repeat_interval": 30,
//!   "idle_time": 180,
//!   "start_time": "09:00",
//!   "end_time": "17:30",
//!   "autostart": false
//! }
//! ```
//!
//! Every key has a default, so a partial file is completed field by field.
//! A missing or unreadable file yields [`Settings::default`]; the watcher never
//! stops because of a bad settings file.
//!
//! Values are range-checked only when edited through the CLI (`init` wizard or
//! `config set`). A hand-edited file is trusted as-is.

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::{msg_debug, msg_print, msg_warning};
use anyhow::Result;
use chrono::{NaiveTime, Timelike};
use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use serde::{Deserialize, Serialize};
use std::fs;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use thiserror::Error;

/// Settings file name inside the data directory.
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Format used for the work window boundaries.
pub const TIME_FORMAT: &str = "%H:%M";

/// Accepted continuous work duration in minutes.
pub const WORK_DURATION_RANGE: RangeInclusive<u64> = 1..=180;
/// Accepted repeat reminder interval in minutes.
pub const REPEAT_INTERVAL_RANGE: RangeInclusive<u64> = 1..=120;
/// Accepted idle threshold in seconds.
pub const IDLE_THRESHOLD_RANGE: RangeInclusive<u64> = 10..=300;

/// Validation failures for user edits.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange { field: &'static str, value: u64, min: u64, max: u64 },
    #[error("invalid time '{0}', expected HH:MM")]
    InvalidTime(String),
}

/// User settings controlling the work clock.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Minutes of continuous activity before the first reminder.
    #[serde(rename = "work_duration")]
    pub work_duration_minutes: u64,

    /// Minutes between repeat reminders once the first one has fired.
    #[serde(rename = "repeat_interval")]
    pub repeat_interval_minutes: u64,

    /// Seconds without input after which the user counts as away.
    #[serde(rename = "idle_time")]
    pub idle_threshold_seconds: u64,

    /// Start of the daily work window.
    #[serde(rename = "start_time", serialize_with = "hh_mm::serialize", deserialize_with = "hh_mm::start_or_default")]
    pub work_start: NaiveTime,

    /// End of the daily work window (inclusive).
    #[serde(rename = "end_time", serialize_with = "hh_mm::serialize", deserialize_with = "hh_mm::end_or_default")]
    pub work_end: NaiveTime,

    /// Whether the user asked for the watcher to start with the session.
    #[serde(rename = "autostart")]
    pub autostart_enabled: bool,
}

impl Default for Settings {
    /// 45 minutes of work, a repeat every 30 minutes, 3 minutes idle
    /// threshold, working hours 09:00-17:30.
    fn default() -> Self {
        Settings {
            work_duration_minutes: 45,
            repeat_interval_minutes: 30,
            idle_threshold_seconds: 180,
            work_start: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default(),
            work_end: NaiveTime::from_hms_opt(17, 30, 0).unwrap_or_default(),
            autostart_enabled: false,
        }
    }
}

impl Settings {
    /// Location of the settings file.
    pub fn path() -> Result<PathBuf> {
        DataStorage::new().get_path(SETTINGS_FILE_NAME)
    }

    /// Loads settings, falling back to defaults on any failure.
    ///
    /// A missing file is the normal first-run case and is silent. A file that
    /// exists but cannot be read or parsed is reported as a warning.
    pub fn read() -> Settings {
        let path = match Self::path() {
            Ok(path) => path,
            Err(e) => {
                msg_warning!(Message::SettingsLoadFailed(e.to_string()));
                return Settings::default();
            }
        };

        if !path.exists() {
            msg_debug!(Message::SettingsUsingDefaults);
            return Settings::default();
        }

        match Self::read_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                msg_warning!(Message::SettingsLoadFailed(e.to_string()));
                Settings::default()
            }
        }
    }

    /// Parses a settings file without any fallback.
    pub fn read_from(path: &Path) -> Result<Settings> {
        let content = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&content)?;
        Ok(settings)
    }

    /// Overwrites the settings file with the current values.
    pub fn save(&self) -> Result<()> {
        DataStorage::new().replace(SETTINGS_FILE_NAME, &serde_json::to_string_pretty(self)?)
    }

    /// Removes the settings file. Returns whether a file was present.
    pub fn delete() -> Result<bool> {
        let path = Self::path()?;
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(path)?;
        Ok(true)
    }

    /// Modification time of the settings file, if it exists.
    pub fn modified_at() -> Option<SystemTime> {
        Self::path().ok().and_then(|path| fs::metadata(path).ok()).and_then(|meta| meta.modified().ok())
    }

    /// Continuous work required before the first reminder, in seconds.
    pub fn work_duration_secs(&self) -> u64 {
        self.work_duration_minutes.saturating_mul(60)
    }

    /// Interval between repeat reminders, in seconds.
    pub fn repeat_interval_secs(&self) -> u64 {
        self.repeat_interval_minutes.saturating_mul(60)
    }

    /// Start and end of the work window.
    pub fn work_window(&self) -> (NaiveTime, NaiveTime) {
        (self.work_start, self.work_end)
    }

    /// Checks whether `time` falls inside the work window.
    ///
    /// Both ends are inclusive. A window whose end is before its start never
    /// matches, so monitoring stays off all day.
    pub fn in_work_window(&self, time: NaiveTime) -> bool {
        self.work_start <= time && time <= self.work_end
    }

    /// Verifies every numeric field against its editing range.
    pub fn validate(&self) -> Result<(), SettingsError> {
        check_range("work_duration", self.work_duration_minutes, &WORK_DURATION_RANGE)?;
        check_range("repeat_interval", self.repeat_interval_minutes, &REPEAT_INTERVAL_RANGE)?;
        check_range("idle_time", self.idle_threshold_seconds, &IDLE_THRESHOLD_RANGE)?;
        Ok(())
    }

    /// Parses an `HH:MM` string into a time of day.
    pub fn parse_time(value: &str) -> Result<NaiveTime, SettingsError> {
        NaiveTime::parse_from_str(value.trim(), TIME_FORMAT).map_err(|_| SettingsError::InvalidTime(value.to_string()))
    }

    /// Formats a time of day as `HH:MM`.
    pub fn format_time(time: NaiveTime) -> String {
        format!("{:02}:{:02}", time.hour(), time.minute())
    }

    /// Runs the interactive settings wizard.
    ///
    /// Current values are offered as defaults, and each prompt rejects input
    /// outside the accepted range.
    pub fn init() -> Result<Self> {
        let current = Self::read();
        let theme = ColorfulTheme::default();

        msg_print!(Message::SettingsWizardHeader);

        let work_duration_minutes = Input::with_theme(&theme)
            .with_prompt(Message::PromptWorkDuration.to_string())
            .default(current.work_duration_minutes)
            .validate_with(|value: &u64| check_range("work_duration", *value, &WORK_DURATION_RANGE).map(|_| ()).map_err(|e| e.to_string()))
            .interact_text()?;

        let repeat_interval_minutes = Input::with_theme(&theme)
            .with_prompt(Message::PromptRepeatInterval.to_string())
            .default(current.repeat_interval_minutes)
            .validate_with(|value: &u64| check_range("repeat_interval", *value, &REPEAT_INTERVAL_RANGE).map(|_| ()).map_err(|e| e.to_string()))
            .interact_text()?;

        let idle_threshold_seconds = Input::with_theme(&theme)
            .with_prompt(Message::PromptIdleThreshold.to_string())
            .default(current.idle_threshold_seconds)
            .validate_with(|value: &u64| check_range("idle_time", *value, &IDLE_THRESHOLD_RANGE).map(|_| ()).map_err(|e| e.to_string()))
            .interact_text()?;

        let work_start: String = Input::with_theme(&theme)
            .with_prompt(Message::PromptWorkStart.to_string())
            .default(Self::format_time(current.work_start))
            .validate_with(|value: &String| Self::parse_time(value).map(|_| ()).map_err(|e| e.to_string()))
            .interact_text()?;

        let work_end: String = Input::with_theme(&theme)
            .with_prompt(Message::PromptWorkEnd.to_string())
            .default(Self::format_time(current.work_end))
            .validate_with(|value: &String| Self::parse_time(value).map(|_| ()).map_err(|e| e.to_string()))
            .interact_text()?;

        let autostart_enabled = Confirm::with_theme(&theme)
            .with_prompt(Message::PromptAutostart.to_string())
            .default(current.autostart_enabled)
            .interact()?;

        Ok(Settings {
            work_duration_minutes,
            repeat_interval_minutes,
            idle_threshold_seconds,
            work_start: Self::parse_time(&work_start)?,
            work_end: Self::parse_time(&work_end)?,
            autostart_enabled,
        })
    }
}

fn check_range(field: &'static str, value: u64, range: &RangeInclusive<u64>) -> Result<u64, SettingsError> {
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(SettingsError::OutOfRange {
            field,
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}

/// Serde adapter storing a `NaiveTime` as `"HH:MM"`.
///
/// A malformed time falls back to the default for that boundary only; the
/// rest of the file is kept.
mod hh_mm {
    use super::Settings;
    use crate::libs::messages::Message;
    use crate::msg_warning;
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&Settings::format_time(*time))
    }

    pub fn start_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        parse_or(deserializer, Settings::default().work_start)
    }

    pub fn end_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        parse_or(deserializer, Settings::default().work_end)
    }

    fn parse_or<'de, D: Deserializer<'de>>(deserializer: D, fallback: NaiveTime) -> Result<NaiveTime, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(Settings::parse_time(&value).unwrap_or_else(|e| {
            msg_warning!(Message::SettingsLoadFailed(e.to_string()));
            fallback
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_window_is_inclusive() {
        let settings = Settings::default();
        assert!(settings.in_work_window(at(9, 0)));
        assert!(settings.in_work_window(at(17, 30)));
        assert!(!settings.in_work_window(at(8, 59)));
        assert!(!settings.in_work_window(NaiveTime::from_hms_opt(17, 30, 1).unwrap()));
    }

    #[test]
    fn test_inverted_window_never_matches() {
        let settings = Settings {
            work_start: at(22, 0),
            work_end: at(6, 0),
            ..Default::default()
        };
        assert!(!settings.in_work_window(at(23, 15)));
        assert!(!settings.in_work_window(at(3, 0)));
        assert!(!settings.in_work_window(at(12, 0)));
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let settings = Settings {
            idle_threshold_seconds: 5,
            ..Default::default()
        };
        assert_eq!(
            settings.validate(),
            Err(SettingsError::OutOfRange {
                field: "idle_time",
                value: 5,
                min: 10,
                max: 300
            })
        );
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_malformed_time_falls_back_per_field() {
        let settings: Settings = serde_json::from_str(r#"{"work_duration": 50, "start_time": "nine", "end_time": "16:00"}"#).unwrap();
        assert_eq!(settings.work_duration_minutes, 50);
        assert_eq!(settings.work_window(), (at(9, 0), at(16, 0)));
    }

    #[test]
    fn test_huge_durations_saturate() {
        let settings = Settings {
            work_duration_minutes: u64::MAX,
            repeat_interval_minutes: u64::MAX / 60 + 1,
            ..Default::default()
        };
        assert_eq!(settings.work_duration_secs(), u64::MAX);
        assert_eq!(settings.repeat_interval_secs(), u64::MAX);
    }

    #[test]
    fn test_parse_time() {
        assert_eq!(Settings::parse_time("07:45"), Ok(at(7, 45)));
        assert_eq!(Settings::parse_time(" 18:00 "), Ok(at(18, 0)));
        assert!(matches!(Settings::parse_time("25:00"), Err(SettingsError::InvalidTime(_))));
        assert!(matches!(Settings::parse_time("noon"), Err(SettingsError::InvalidTime(_))));
    }
}
