//! Fixed-rule civil dates: "Nth weekday of month" computation and the
//! built-in holiday table behind the deprecated `holiday_keys` config field.

use chrono::{Datelike, Duration, NaiveDate};

use crate::error::CoreError;

/// Gregorian date of the `n`th occurrence of `weekday` (0 = Sunday ..
/// 6 = Saturday) in `month` of `year`.
///
/// Finds the weekday of the 1st, offsets forward 0-6 days to the first
/// occurrence, then adds `(n - 1)` weeks. `n` is not bounds-checked here;
/// config validation restricts it to 1-4, for which the result always stays
/// inside the month. Larger `n` rolls into the following month and is
/// returned as-is.
pub fn nth_weekday_of_month(
    year: i32,
    month: u32,
    n: u32,
    weekday: u32,
) -> Result<NaiveDate, CoreError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        CoreError::ConfigValidation(format!("invalid month {month} in year {year}"))
    })?;
    let offset = (7 + weekday - first.weekday().num_days_from_sunday()) % 7;
    let days = i64::from(offset) + (i64::from(n) - 1) * 7;
    Ok(first + Duration::days(days))
}

/// A holiday reachable through the deprecated `holiday_keys` mechanism.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinHoliday {
    pub key: &'static str,
    pub summary: &'static str,
    pub description: &'static str,
    pub month: u32,
    pub week: u32,
    pub weekday: u32,
}

pub const BUILTIN_HOLIDAYS: [BuiltinHoliday; 3] = [
    BuiltinHoliday {
        key: "mothers_day",
        summary: "Mother's Day",
        description: "Not a public holiday, but a legal national holiday observed on the second Sunday in May in the United States.",
        month: 5,
        week: 2,
        weekday: 0,
    },
    BuiltinHoliday {
        key: "fathers_day",
        summary: "Father's Day",
        description: "Father's Day is a celebration that honours the role of fathers and forefathers.",
        month: 6,
        week: 3,
        weekday: 0,
    },
    BuiltinHoliday {
        key: "thanksgiving_day",
        summary: "Thanksgiving Day",
        description: "Traditionally, this holiday celebrates the giving of thanks for the autumn harvest.",
        month: 11,
        week: 4,
        weekday: 4,
    },
];

/// Looks up a built-in holiday by its config key.
pub fn builtin_holiday(key: &str) -> Option<&'static BuiltinHoliday> {
    BUILTIN_HOLIDAYS.iter().find(|holiday| holiday.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[rstest]
    // 2nd Sunday of May 2024 (Mother's Day).
    #[case(2024, 5, 2, 0, date(2024, 5, 12))]
    // 4th Thursday of November 2024 (Thanksgiving).
    #[case(2024, 11, 4, 4, date(2024, 11, 28))]
    // 3rd Sunday of June 2025 (Father's Day).
    #[case(2025, 6, 3, 0, date(2025, 6, 15))]
    // 2nd Monday of October 2024.
    #[case(2024, 10, 2, 1, date(2024, 10, 14))]
    // The 1st falls on the requested weekday itself.
    #[case(2023, 10, 1, 0, date(2023, 10, 1))]
    fn test_nth_weekday_of_month(
        #[case] year: i32,
        #[case] month: u32,
        #[case] n: u32,
        #[case] weekday: u32,
        #[case] expected: NaiveDate,
    ) {
        assert_eq!(nth_weekday_of_month(year, month, n, weekday).unwrap(), expected);
    }

    #[test]
    fn test_nth_weekday_rolls_past_month_end_for_large_n() {
        // February 2023 has no 5th Wednesday; the rule lands in March.
        let result = nth_weekday_of_month(2023, 2, 5, 3).unwrap();
        assert_eq!(result, date(2023, 3, 1));
    }

    #[test]
    fn test_nth_weekday_rejects_invalid_month() {
        assert!(nth_weekday_of_month(2024, 13, 1, 0).is_err());
    }

    #[test]
    fn test_builtin_holiday_lookup() {
        let holiday = builtin_holiday("thanksgiving_day").unwrap();
        assert_eq!((holiday.month, holiday.week, holiday.weekday), (11, 4, 4));
        assert!(builtin_holiday("arbor_day").is_none());
    }
}
