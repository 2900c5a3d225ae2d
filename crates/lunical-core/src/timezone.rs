//! Timezone resolution and local wall-clock to UTC materialization.

use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::CoreError;

/// Resolves an IANA timezone name.
pub fn resolve_timezone(timezone: &str) -> Result<Tz, CoreError> {
    Tz::from_str(timezone).map_err(|_| CoreError::InvalidTimezone(timezone.to_string()))
}

/// The ambient zone used when a configured zone cannot be resolved: the
/// `TZ` environment variable, then the platform zone database, then UTC.
pub fn ambient_timezone() -> Tz {
    if let Ok(name) = std::env::var("TZ") {
        if let Ok(tz) = Tz::from_str(&name) {
            return tz;
        }
    }
    if let Ok(name) = iana_time_zone::get_timezone() {
        if let Ok(tz) = Tz::from_str(&name) {
            return tz;
        }
    }
    Tz::UTC
}

/// Interprets a local wall-clock date and time in `tz` and normalizes to
/// UTC. A nonexistent local time (DST spring-forward gap) rolls forward one
/// hour, keeping the occurrence instead of dropping it.
pub fn localize(date: NaiveDate, time: NaiveTime, tz: Tz) -> DateTime<Utc> {
    let naive = date.and_time(time);
    match tz.from_local_datetime(&naive).earliest() {
        Some(local) => local.with_timezone(&Utc),
        None => {
            let shifted = naive + Duration::hours(1);
            match tz.from_local_datetime(&shifted).earliest() {
                Some(local) => local.with_timezone(&Utc),
                // Unreachable with real zone data.
                None => Utc.from_utc_datetime(&naive),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn time(hour: u32, minute: u32, second: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, second).unwrap()
    }

    #[test]
    fn test_resolve_timezone() {
        assert!(resolve_timezone("UTC").is_ok());
        assert!(resolve_timezone("Asia/Shanghai").is_ok());
        assert!(matches!(
            resolve_timezone("Mars/Olympus_Mons"),
            Err(CoreError::InvalidTimezone(_))
        ));
    }

    #[test]
    fn test_localize_fixed_offset_zone() {
        let tz = resolve_timezone("Asia/Shanghai").unwrap();
        let utc = localize(date(2027, 5, 19), time(10, 0, 0), tz);
        assert_eq!(utc.to_rfc3339(), "2027-05-19T02:00:00+00:00");
    }

    #[test]
    fn test_localize_rolls_forward_through_dst_gap() {
        // US DST started 2024-03-10 at 02:00; 02:30 local never existed.
        let tz = resolve_timezone("America/New_York").unwrap();
        let utc = localize(date(2024, 3, 10), time(2, 30, 0), tz);
        assert_eq!(utc.hour(), 7);
        assert_eq!(utc.minute(), 30);
    }

    #[test]
    fn test_ambient_timezone_is_always_resolvable() {
        // Whatever the host is set to, the fallback chain ends in a usable
        // zone.
        let tz = ambient_timezone();
        assert!(!tz.name().is_empty());
    }
}
