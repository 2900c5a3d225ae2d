//! # Lunical Core Library
//!
//! Expands a configuration of people, recurring observances and date
//! windows into a deterministic, ordered sequence of calendar event
//! records, ready for iCalendar serialization.
//!
//! ## Features
//!
//! - **Lunisolar Birthdays**: Chinese lunisolar calendar conversion with
//!   leap-month disambiguation and day clamping
//! - **Solar Birthdays & Day Milestones**: year-window birthday expansion
//!   and "integer days alive" milestone enumeration
//! - **Civil Observances**: "Nth weekday of month" rules such as the 2nd
//!   Sunday of May
//! - **Timezone Awareness**: IANA zone resolution with ambient-zone
//!   fallback and DST-gap handling
//! - **Two-Level Configuration**: per-entry overrides resolved against
//!   global defaults, with template-driven titles and descriptions
//!
//! ## Core Modules
//!
//! - [`config`]: configuration model, validation and override merging
//! - [`lunisolar`]: lunisolar calendar conversion and year projection
//! - [`civil`]: fixed-rule civil dates and built-in holidays
//! - [`template`]: placeholder substitution for titles and descriptions
//! - [`timezone`]: zone resolution and wall-clock to UTC materialization
//! - [`expand`]: the recurrence expansion engine
//! - [`event`]: expansion output structures
//! - [`error`]: error types
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use chrono::{NaiveDate, NaiveTime};
//! use lunical_core::config::{AppConfig, EventConfig, EventKind, GlobalConfig};
//! use lunical_core::expand::expand_calendar;
//!
//! fn main() -> Result<(), lunical_core::error::CoreError> {
//!     let config = AppConfig {
//!         global: GlobalConfig {
//!             timezone: "Asia/Shanghai".to_string(),
//!             year_start: 2025,
//!             year_end: 2030,
//!             days_max: 30000,
//!             days_interval: 1000,
//!             event_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
//!             event_hours: 2,
//!             reminders: vec![1, 3],
//!             attendees: vec![],
//!             holiday_keys: vec![],
//!             calendar_name: "Family Calendar".to_string(),
//!         },
//!         events: vec![EventConfig {
//!             id: "alice".to_string(),
//!             name: "Alice".to_string(),
//!             start_date: NaiveDate::from_ymd_opt(1990, 6, 3).unwrap(),
//!             event_keys: vec![EventKind::LunarBirthday, EventKind::IntegerDays],
//!             summary: None,
//!             description: None,
//!             reminders: None,
//!             attendees: None,
//!             timezone: None,
//!             event_time: None,
//!             event_hours: None,
//!         }],
//!         observances: vec![],
//!     };
//!
//!     let expansion = expand_calendar(&config)?;
//!     println!("{} events expanded", expansion.events.len());
//!     Ok(())
//! }
//! ```

pub mod civil;
pub mod config;
pub mod error;
pub mod event;
pub mod expand;
pub mod lunisolar;
pub mod template;
pub mod timezone;
