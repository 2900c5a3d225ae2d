use std::collections::HashSet;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

fn default_days_max() -> u32 {
    30000
}

fn default_days_interval() -> u32 {
    1000
}

fn default_event_time() -> NaiveTime {
    // 10:00:00 local time, matching the historical default.
    NaiveTime::from_hms_opt(10, 0, 0).unwrap()
}

fn default_event_hours() -> u32 {
    2
}

fn default_reminders() -> Vec<u32> {
    vec![1, 3]
}

fn default_calendar_name() -> String {
    "Lunical Calendar".to_string()
}

/// Calendar-wide defaults. Per-entry overrides are resolved against these by
/// [`GlobalConfig::merge_event`] and [`GlobalConfig::merge_observance`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// IANA zone name, e.g. "Asia/Shanghai". An unresolvable zone does not
    /// fail validation; expansion falls back to the ambient zone with a
    /// warning.
    pub timezone: String,
    /// Inclusive Gregorian year window for birthday and observance
    /// occurrences.
    pub year_start: i32,
    pub year_end: i32,
    /// Day milestones are enumerated as multiples of `days_interval` up to
    /// `days_max`.
    #[serde(default = "default_days_max")]
    pub days_max: u32,
    #[serde(default = "default_days_interval")]
    pub days_interval: u32,
    /// Local wall-clock time of day each event starts at.
    #[serde(default = "default_event_time")]
    pub event_time: NaiveTime,
    /// Event duration in hours.
    #[serde(default = "default_event_hours")]
    pub event_hours: u32,
    /// Alarm offsets in days before the event start.
    #[serde(default = "default_reminders")]
    pub reminders: Vec<u32>,
    /// Attendee email addresses.
    #[serde(default)]
    pub attendees: Vec<String>,
    /// Built-in fixed-holiday identifiers. Deprecated: use `observances`.
    #[serde(default)]
    pub holiday_keys: Vec<String>,
    #[serde(default = "default_calendar_name")]
    pub calendar_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    LunarBirthday,
    SolarBirthday,
    IntegerDays,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::LunarBirthday => "lunar_birthday",
            EventKind::SolarBirthday => "solar_birthday",
            EventKind::IntegerDays => "integer_days",
        }
    }
}

/// A person (or other anchored entry) whose birthdays and day milestones are
/// expanded into calendar events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventConfig {
    /// Unique, stable, opaque identifier. Used to derive deterministic
    /// per-occurrence event identities.
    pub id: String,
    pub name: String,
    /// Gregorian anchor date, typically the birth date.
    pub start_date: NaiveDate,
    /// Which expansions to run for this entry. Must be non-empty.
    pub event_keys: Vec<EventKind>,
    /// Title template. `{name}`, `{year}` or `{days}`, `{age}` and
    /// `{birthday}` placeholders are substituted; a per-kind default is used
    /// when absent.
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub reminders: Option<Vec<u32>>,
    #[serde(default)]
    pub attendees: Option<Vec<String>>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub event_time: Option<NaiveTime>,
    #[serde(default)]
    pub event_hours: Option<u32>,
}

/// A civil event defined by an "Nth weekday of month" rule rather than a
/// fixed date, e.g. the 2nd Sunday of May.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservanceConfig {
    pub id: String,
    pub name: String,
    /// 1-12.
    pub month: u32,
    /// Nth occurrence of the weekday, 1-4.
    pub week: u32,
    /// 0 = Sunday .. 6 = Saturday.
    pub weekday: u32,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub reminders: Option<Vec<u32>>,
    #[serde(default)]
    pub attendees: Option<Vec<String>>,
}

/// The full configuration snapshot handed to the expansion engine. Treated
/// as immutable input; expansion only reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub global: GlobalConfig,
    #[serde(default)]
    pub events: Vec<EventConfig>,
    #[serde(default)]
    pub observances: Vec<ObservanceConfig>,
}

/// Per-entry settings after resolving overrides against the global defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveConfig {
    pub timezone: String,
    pub event_time: NaiveTime,
    pub event_hours: u32,
    pub reminders: Vec<u32>,
    pub attendees: Vec<String>,
}

/// An absent or empty override collection inherits the global collection.
/// An entry therefore cannot opt out of all global reminders; "empty" and
/// "unset" are indistinguishable here, matching the legacy behavior.
fn merge_collection<T: Clone>(entry: Option<&[T]>, global: &[T]) -> Vec<T> {
    match entry {
        Some(values) if !values.is_empty() => values.to_vec(),
        _ => global.to_vec(),
    }
}

impl GlobalConfig {
    /// The global defaults as an effective configuration, with no overrides
    /// applied.
    pub fn effective(&self) -> EffectiveConfig {
        EffectiveConfig {
            timezone: self.timezone.clone(),
            event_time: self.event_time,
            event_hours: self.event_hours,
            reminders: self.reminders.clone(),
            attendees: self.attendees.clone(),
        }
    }

    /// Resolves an event entry's overrides against the global defaults.
    pub fn merge_event(&self, event: &EventConfig) -> EffectiveConfig {
        EffectiveConfig {
            timezone: event
                .timezone
                .clone()
                .filter(|tz| !tz.is_empty())
                .unwrap_or_else(|| self.timezone.clone()),
            event_time: event.event_time.unwrap_or(self.event_time),
            event_hours: event.event_hours.unwrap_or(self.event_hours),
            reminders: merge_collection(event.reminders.as_deref(), &self.reminders),
            attendees: merge_collection(event.attendees.as_deref(), &self.attendees),
        }
    }

    /// Resolves an observance's overrides against the global defaults.
    /// Observances carry no timezone/time/duration overrides of their own.
    pub fn merge_observance(&self, observance: &ObservanceConfig) -> EffectiveConfig {
        EffectiveConfig {
            reminders: merge_collection(observance.reminders.as_deref(), &self.reminders),
            attendees: merge_collection(observance.attendees.as_deref(), &self.attendees),
            ..self.effective()
        }
    }
}

impl AppConfig {
    /// Validates the snapshot's invariants. Expansion calls this first and
    /// aborts the whole run on failure, before producing any output.
    pub fn validate(&self) -> Result<(), CoreError> {
        let global = &self.global;
        if global.year_start > global.year_end {
            return Err(CoreError::ConfigValidation(format!(
                "year_start ({}) must not be after year_end ({})",
                global.year_start, global.year_end
            )));
        }
        if global.days_max > 0 && global.days_interval == 0 {
            return Err(CoreError::ConfigValidation(
                "days_interval must be positive when days_max is set".to_string(),
            ));
        }

        let mut event_ids = HashSet::new();
        for event in &self.events {
            if event.id.is_empty() {
                return Err(CoreError::ConfigValidation(format!(
                    "event '{}' has an empty id",
                    event.name
                )));
            }
            if !event_ids.insert(event.id.as_str()) {
                return Err(CoreError::ConfigValidation(format!(
                    "duplicate event id '{}'",
                    event.id
                )));
            }
            if event.event_keys.is_empty() {
                return Err(CoreError::ConfigValidation(format!(
                    "event '{}' has no event_keys",
                    event.name
                )));
            }
        }

        let mut observance_ids = HashSet::new();
        for observance in &self.observances {
            if observance.id.is_empty() {
                return Err(CoreError::ConfigValidation(format!(
                    "observance '{}' has an empty id",
                    observance.name
                )));
            }
            if !observance_ids.insert(observance.id.as_str()) {
                return Err(CoreError::ConfigValidation(format!(
                    "duplicate observance id '{}'",
                    observance.id
                )));
            }
            if !(1..=12).contains(&observance.month) {
                return Err(CoreError::ConfigValidation(format!(
                    "observance '{}' has month {} outside 1-12",
                    observance.name, observance.month
                )));
            }
            if !(1..=4).contains(&observance.week) {
                return Err(CoreError::ConfigValidation(format!(
                    "observance '{}' has week {} outside 1-4",
                    observance.name, observance.week
                )));
            }
            if observance.weekday > 6 {
                return Err(CoreError::ConfigValidation(format!(
                    "observance '{}' has weekday {} outside 0-6",
                    observance.name, observance.weekday
                )));
            }
        }

        Ok(())
    }
}
