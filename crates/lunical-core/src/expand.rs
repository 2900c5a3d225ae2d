//! Recurrence expansion engine.
//!
//! Turns one immutable [`AppConfig`] snapshot into an ordered sequence of
//! [`EventRecord`]s: event entries in input order with each entry's
//! occurrences ascending by start, then observances in input order, then
//! deprecated `holiday_keys` expansions. Per-occurrence conversion problems
//! (unresolvable lunisolar projection, unknown timezone) are surfaced as
//! warnings and never abort the run; only configuration validation fails
//! fast.

use chrono::{Datelike, Days, NaiveDate};
use chrono_tz::Tz;
use tracing::warn;

use crate::civil;
use crate::config::{AppConfig, EffectiveConfig, EventConfig, EventKind, ObservanceConfig};
use crate::error::CoreError;
use crate::event::{Alarm, Attendee, EventRecord};
use crate::lunisolar;
use crate::template;
use crate::timezone;

const INTEGER_DAYS_SUMMARY: &str = "{name} has been alive for {days} days! (age: {age})";
const INTEGER_DAYS_DESCRIPTION: &str = "{name} was born on {birthday}: day {days} milestone.";
const SOLAR_BIRTHDAY_SUMMARY: &str = "Happy birthday {name} ({year})! (age: {age})";
const SOLAR_BIRTHDAY_DESCRIPTION: &str = "{name}'s birthday. Born on {birthday}.";
const LUNAR_BIRTHDAY_SUMMARY: &str = "Happy lunar birthday {name} ({year})! (age: {age})";
const LUNAR_BIRTHDAY_DESCRIPTION: &str = "{name}'s lunar birthday. Born on {birthday}.";
const OBSERVANCE_SUMMARY: &str = "{name}";
const OBSERVANCE_DESCRIPTION: &str = "{name}";

/// Result of expanding one configuration snapshot. Warnings carry the
/// per-occurrence diagnostics for anything that was skipped or substituted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    pub events: Vec<EventRecord>,
    pub warnings: Vec<String>,
}

/// Expands a configuration snapshot into the full ordered event sequence.
///
/// # Arguments
/// * `config` - The immutable configuration snapshot to expand
///
/// # Returns
/// * `Result<Expansion, CoreError>` - Ordered event records plus warnings,
///   or a validation error
///
/// # Behavior
/// - Validate the snapshot first; a [`CoreError::ConfigValidation`] aborts
///   the whole run before any output is produced
/// - Expand each event entry's configured kinds, sort the entry's
///   occurrences ascending by start, and append them in entry input order
/// - Append observances in input order, then deprecated `holiday_keys`
///   expansions
/// - Skip problematic occurrences with a warning and keep going; one bad
///   year never voids the rest of the calendar
/// - Re-running on the same snapshot produces identical output
pub fn expand_calendar(config: &AppConfig) -> Result<Expansion, CoreError> {
    config.validate()?;

    let mut events = Vec::new();
    let mut warnings = Vec::new();

    for entry in &config.events {
        let effective = config.global.merge_event(entry);
        let tz = resolve_entry_timezone(&effective, &entry.name, &mut warnings);

        let mut occurrences = Vec::new();
        for kind in &entry.event_keys {
            expand_entry_kind(config, entry, &effective, tz, *kind, &mut occurrences, &mut warnings);
        }
        // Ascending within the entry; enumeration order breaks ties.
        occurrences.sort_by_key(|record| record.start);
        events.extend(occurrences);
    }

    for observance in &config.observances {
        let effective = config.global.merge_observance(observance);
        let tz = resolve_entry_timezone(&effective, &observance.name, &mut warnings);
        expand_observance(config, observance, &effective, tz, &mut events, &mut warnings);
    }

    expand_holiday_keys(config, &mut events, &mut warnings);

    Ok(Expansion { events, warnings })
}

fn push_warning(warnings: &mut Vec<String>, message: String) {
    warn!("{message}");
    warnings.push(message);
}

fn resolve_entry_timezone(
    effective: &EffectiveConfig,
    entry_name: &str,
    warnings: &mut Vec<String>,
) -> Tz {
    match timezone::resolve_timezone(&effective.timezone) {
        Ok(tz) => tz,
        Err(err) => {
            let tz = timezone::ambient_timezone();
            push_warning(
                warnings,
                format!("{err} for '{entry_name}': falling back to ambient zone {tz}"),
            );
            tz
        }
    }
}

fn expand_entry_kind(
    config: &AppConfig,
    entry: &EventConfig,
    effective: &EffectiveConfig,
    tz: Tz,
    kind: EventKind,
    out: &mut Vec<EventRecord>,
    warnings: &mut Vec<String>,
) {
    match kind {
        EventKind::IntegerDays => expand_integer_days(config, entry, effective, tz, out),
        EventKind::SolarBirthday => expand_solar_birthdays(config, entry, effective, tz, out),
        EventKind::LunarBirthday => {
            expand_lunar_birthdays(config, entry, effective, tz, out, warnings);
        }
    }
}

fn expand_integer_days(
    config: &AppConfig,
    entry: &EventConfig,
    effective: &EffectiveConfig,
    tz: Tz,
    out: &mut Vec<EventRecord>,
) {
    let global = &config.global;
    if global.days_max == 0 || global.days_interval == 0 {
        return;
    }

    let mut days = global.days_interval;
    while days <= global.days_max {
        if let Some(date) = entry.start_date.checked_add_days(Days::new(u64::from(days))) {
            if (global.year_start..=global.year_end).contains(&date.year()) {
                let fields = [
                    ("name", entry.name.clone()),
                    ("days", days.to_string()),
                    ("age", format!("{:.2}", f64::from(days) / 365.25)),
                    ("birthday", entry.start_date.to_string()),
                ];
                out.push(assemble(
                    effective,
                    tz,
                    date,
                    entry.summary.as_deref().unwrap_or(INTEGER_DAYS_SUMMARY),
                    entry.description.as_deref().unwrap_or(INTEGER_DAYS_DESCRIPTION),
                    &fields,
                    format!("{}:{}:{days}", entry.id, EventKind::IntegerDays.as_str()),
                    &global.calendar_name,
                ));
            }
        }
        match days.checked_add(global.days_interval) {
            Some(next) => days = next,
            None => break,
        }
    }
}

fn expand_solar_birthdays(
    config: &AppConfig,
    entry: &EventConfig,
    effective: &EffectiveConfig,
    tz: Tz,
    out: &mut Vec<EventRecord>,
) {
    let global = &config.global;
    for year in global.year_start..=global.year_end {
        let date = solar_anchor_in_year(entry.start_date, year);
        let fields = birthday_fields(entry, year);
        out.push(assemble(
            effective,
            tz,
            date,
            entry.summary.as_deref().unwrap_or(SOLAR_BIRTHDAY_SUMMARY),
            entry.description.as_deref().unwrap_or(SOLAR_BIRTHDAY_DESCRIPTION),
            &fields,
            format!("{}:{}:{year}", entry.id, EventKind::SolarBirthday.as_str()),
            &global.calendar_name,
        ));
    }
}

fn expand_lunar_birthdays(
    config: &AppConfig,
    entry: &EventConfig,
    effective: &EffectiveConfig,
    tz: Tz,
    out: &mut Vec<EventRecord>,
    warnings: &mut Vec<String>,
) {
    let global = &config.global;
    for year in global.year_start..=global.year_end {
        match lunisolar::project_to_gregorian_year(entry.start_date, year) {
            Ok(date) => {
                let fields = birthday_fields(entry, year);
                out.push(assemble(
                    effective,
                    tz,
                    date,
                    entry.summary.as_deref().unwrap_or(LUNAR_BIRTHDAY_SUMMARY),
                    entry.description.as_deref().unwrap_or(LUNAR_BIRTHDAY_DESCRIPTION),
                    &fields,
                    format!("{}:{}:{year}", entry.id, EventKind::LunarBirthday.as_str()),
                    &global.calendar_name,
                ));
            }
            Err(err) => push_warning(
                warnings,
                format!("skipping lunar birthday of '{}' in {year}: {err}", entry.name),
            ),
        }
    }
}

fn expand_observance(
    config: &AppConfig,
    observance: &ObservanceConfig,
    effective: &EffectiveConfig,
    tz: Tz,
    out: &mut Vec<EventRecord>,
    warnings: &mut Vec<String>,
) {
    let global = &config.global;
    for year in global.year_start..=global.year_end {
        match civil::nth_weekday_of_month(year, observance.month, observance.week, observance.weekday)
        {
            Ok(date) => {
                let fields = [
                    ("name", observance.name.clone()),
                    ("year", year.to_string()),
                ];
                out.push(assemble(
                    effective,
                    tz,
                    date,
                    observance.summary.as_deref().unwrap_or(OBSERVANCE_SUMMARY),
                    observance.description.as_deref().unwrap_or(OBSERVANCE_DESCRIPTION),
                    &fields,
                    format!("{}:observance:{year}", observance.id),
                    &global.calendar_name,
                ));
            }
            Err(err) => push_warning(
                warnings,
                format!("skipping observance '{}' in {year}: {err}", observance.name),
            ),
        }
    }
}

/// Expands the deprecated `holiday_keys` through the built-in table.
fn expand_holiday_keys(
    config: &AppConfig,
    out: &mut Vec<EventRecord>,
    warnings: &mut Vec<String>,
) {
    let global = &config.global;
    if global.holiday_keys.is_empty() {
        return;
    }

    let effective = global.effective();
    let tz = resolve_entry_timezone(&effective, "holiday_keys", warnings);
    for key in &global.holiday_keys {
        let Some(holiday) = civil::builtin_holiday(key) else {
            push_warning(warnings, format!("unknown holiday key '{key}' skipped"));
            continue;
        };
        push_warning(
            warnings,
            format!("holiday_keys is deprecated; replace '{key}' with an observance entry"),
        );
        for year in global.year_start..=global.year_end {
            match civil::nth_weekday_of_month(year, holiday.month, holiday.week, holiday.weekday) {
                Ok(date) => out.push(assemble(
                    &effective,
                    tz,
                    date,
                    holiday.summary,
                    holiday.description,
                    &[],
                    format!("holiday:{key}:{year}"),
                    &global.calendar_name,
                )),
                Err(err) => push_warning(
                    warnings,
                    format!("skipping holiday '{key}' in {year}: {err}"),
                ),
            }
        }
    }
}

fn birthday_fields(entry: &EventConfig, year: i32) -> [(&'static str, String); 4] {
    [
        ("name", entry.name.clone()),
        ("year", year.to_string()),
        ("age", (year - entry.start_date.year()).to_string()),
        ("birthday", entry.start_date.to_string()),
    ]
}

/// A Feb-29 anchor lands on Feb 28 in non-leap target years.
fn solar_anchor_in_year(anchor: NaiveDate, year: i32) -> NaiveDate {
    anchor
        .with_year(year)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, 2, 28).unwrap())
}

#[allow(clippy::too_many_arguments)]
fn assemble(
    effective: &EffectiveConfig,
    tz: Tz,
    date: NaiveDate,
    summary_template: &str,
    description_template: &str,
    fields: &[(&str, String)],
    uid_seed: String,
    calendar_name: &str,
) -> EventRecord {
    let title = template::render(summary_template, fields);
    let description = template::render(description_template, fields);
    let start = timezone::localize(date, effective.event_time, tz);
    let alarms = effective
        .reminders
        .iter()
        .map(|days| Alarm {
            days_before: *days,
            description: format!("Reminder: {title}"),
        })
        .collect();
    let attendees = effective
        .attendees
        .iter()
        .map(|email| Attendee::from_email(email))
        .collect();

    EventRecord {
        start,
        duration_hours: effective.event_hours,
        title,
        description,
        alarms,
        attendees,
        calendar_name: calendar_name.to_string(),
        uid_seed,
    }
}
