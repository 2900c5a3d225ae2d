//! Chinese lunisolar calendar conversion.
//!
//! Table-driven over 1900-2100: each entry packs a year's twelve month
//! lengths, its leap month number (0 when none) and the leap month's length
//! into one integer. The epoch 1900-01-31 is the first day of the first
//! lunisolar month of 1900. Conversions outside the table range fail with
//! [`CoreError::DateResolution`]; the expansion engine treats that as a
//! per-occurrence skip, never an abort.

use std::fmt;

use chrono::{Duration, NaiveDate};

use crate::error::CoreError;

/// First lunisolar year covered by the month table.
pub const MIN_YEAR: i32 = 1900;
/// Last lunisolar year covered by the month table.
pub const MAX_YEAR: i32 = 2100;

/// Per-year packed month data for 1900-2100.
///
/// Bit layout: bits 15..4 flag 30-day ordinary months (bit 15 = month 1),
/// bits 3..0 hold the leap month number (0 = no leap month), and bit 16
/// flags a 30-day leap month.
const YEAR_TABLE: [u32; 201] = [
    0x04bd8, 0x04ae0, 0x0a570, 0x054d5, 0x0d260, 0x0d950, 0x16554, 0x056a0, 0x09ad0, 0x055d2, // 1900
    0x04ae0, 0x0a5b6, 0x0a4d0, 0x0d250, 0x1d255, 0x0b540, 0x0d6a0, 0x0ada2, 0x095b0, 0x14977, // 1910
    0x04970, 0x0a4b0, 0x0b4b5, 0x06a50, 0x06d40, 0x1ab54, 0x02b60, 0x09570, 0x052f2, 0x04970, // 1920
    0x06566, 0x0d4a0, 0x0ea50, 0x06e95, 0x05ad0, 0x02b60, 0x186e3, 0x092e0, 0x1c8d7, 0x0c950, // 1930
    0x0d4a0, 0x1d8a6, 0x0b550, 0x056a0, 0x1a5b4, 0x025d0, 0x092d0, 0x0d2b2, 0x0a950, 0x0b557, // 1940
    0x06ca0, 0x0b550, 0x15355, 0x04da0, 0x0a5b0, 0x14573, 0x052b0, 0x0a9a8, 0x0e950, 0x06aa0, // 1950
    0x0aea6, 0x0ab50, 0x04b60, 0x0aae4, 0x0a570, 0x05260, 0x0f263, 0x0d950, 0x05b57, 0x056a0, // 1960
    0x096d0, 0x04dd5, 0x04ad0, 0x0a4d0, 0x0d4d4, 0x0d250, 0x0d558, 0x0b540, 0x0b5a0, 0x195a6, // 1970
    0x095b0, 0x049b0, 0x0a974, 0x0a4b0, 0x0b27a, 0x06a50, 0x06d40, 0x0af46, 0x0ab60, 0x09570, // 1980
    0x04af5, 0x04970, 0x064b0, 0x074a3, 0x0ea50, 0x06b58, 0x055c0, 0x0ab60, 0x096d5, 0x092e0, // 1990
    0x0c960, 0x0d954, 0x0d4a0, 0x0da50, 0x07552, 0x056a0, 0x0abb7, 0x025d0, 0x092d0, 0x0cab5, // 2000
    0x0a950, 0x0b4a0, 0x0baa4, 0x0ad50, 0x055d9, 0x04ba0, 0x0a5b0, 0x15176, 0x052b0, 0x0a930, // 2010
    0x07954, 0x06aa0, 0x0ad50, 0x05b52, 0x04b60, 0x0a6e6, 0x0a4e0, 0x0d260, 0x0ea65, 0x0d530, // 2020
    0x05aa0, 0x076a3, 0x096d0, 0x04afb, 0x04ad0, 0x0a4d0, 0x1d0b6, 0x0d250, 0x0d520, 0x0dd45, // 2030
    0x0b5a0, 0x056d0, 0x055b2, 0x049b0, 0x0a577, 0x0a4b0, 0x0aa50, 0x1b255, 0x06d20, 0x0ada0, // 2040
    0x14b63, 0x09370, 0x049f8, 0x04970, 0x064b0, 0x168a6, 0x0ea50, 0x06b20, 0x1a6c4, 0x0aae0, // 2050
    0x0a2e0, 0x0d2e3, 0x0c960, 0x0d557, 0x0d4a0, 0x0da50, 0x05d55, 0x056a0, 0x0a6d0, 0x055d4, // 2060
    0x052d0, 0x0a9b8, 0x0a950, 0x0b4a0, 0x0b6a6, 0x0ad50, 0x055a0, 0x0aba4, 0x0a5b0, 0x052b0, // 2070
    0x0b273, 0x06930, 0x07337, 0x06aa0, 0x0ad50, 0x14b55, 0x04b60, 0x0a570, 0x054e4, 0x0d160, // 2080
    0x0e968, 0x0d520, 0x0daa0, 0x16aa6, 0x056d0, 0x04ae0, 0x0a9d4, 0x0a2d0, 0x0d150, 0x0f252, // 2090
    0x0d520, // 2100
];

/// A date in the Chinese lunisolar calendar. Leap months carry the same
/// month number as the ordinary month they follow, distinguished by
/// `is_leap` rather than a sign convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LunisolarDate {
    pub year: i32,
    /// 1-12.
    pub month: u32,
    /// 1-30; lunisolar months have 29 or 30 days.
    pub day: u32,
    pub is_leap: bool,
}

impl fmt::Display for LunisolarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)?;
        if self.is_leap {
            write!(f, " (leap month)")?;
        }
        Ok(())
    }
}

fn epoch() -> NaiveDate {
    // 1900-01-31, lunisolar 1900-01-01.
    NaiveDate::from_ymd_opt(1900, 1, 31).unwrap()
}

fn year_info(year: i32) -> Result<u32, CoreError> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(CoreError::DateResolution(format!(
            "lunisolar year {year} is outside the supported range {MIN_YEAR}-{MAX_YEAR}"
        )));
    }
    Ok(YEAR_TABLE[(year - MIN_YEAR) as usize])
}

/// The leap month number of a lunisolar year, or `None` when the year has
/// no leap month.
pub fn leap_month(year: i32) -> Result<Option<u32>, CoreError> {
    let info = year_info(year)?;
    let month = info & 0xf;
    Ok((month != 0).then_some(month))
}

fn leap_month_days(year: i32) -> Result<u32, CoreError> {
    let info = year_info(year)?;
    if info & 0xf == 0 {
        Ok(0)
    } else if info & 0x10000 != 0 {
        Ok(30)
    } else {
        Ok(29)
    }
}

/// Day count (29 or 30) of an ordinary month.
fn month_days(year: i32, month: u32) -> Result<u32, CoreError> {
    let info = year_info(year)?;
    Ok(if info & (0x10000 >> month) != 0 { 30 } else { 29 })
}

/// Total day count of a lunisolar year, leap month included.
fn year_days(year: i32) -> Result<u32, CoreError> {
    let info = year_info(year)?;
    let mut days = 348;
    let mut mask = 0x8000;
    while mask > 0x8 {
        if info & mask != 0 {
            days += 1;
        }
        mask >>= 1;
    }
    Ok(days + leap_month_days(year)?)
}

/// Day count of the month a [`LunisolarDate`] addresses, leap or ordinary.
fn resolved_month_days(year: i32, month: u32, is_leap: bool) -> Result<u32, CoreError> {
    if is_leap {
        leap_month_days(year)
    } else {
        month_days(year, month)
    }
}

/// Converts a Gregorian date to its lunisolar representation.
pub fn to_lunisolar(date: NaiveDate) -> Result<LunisolarDate, CoreError> {
    let mut offset = date.signed_duration_since(epoch()).num_days();
    if offset < 0 {
        return Err(CoreError::DateResolution(format!(
            "{date} predates the supported lunisolar range"
        )));
    }

    let mut year = MIN_YEAR;
    loop {
        let days = i64::from(year_days(year)?);
        if offset < days {
            break;
        }
        offset -= days;
        year += 1;
    }

    let leap = leap_month(year)?;
    let mut month = 1;
    while month <= 12 {
        let days = i64::from(month_days(year, month)?);
        if offset < days {
            return Ok(LunisolarDate {
                year,
                month,
                day: offset as u32 + 1,
                is_leap: false,
            });
        }
        offset -= days;

        if leap == Some(month) {
            let days = i64::from(leap_month_days(year)?);
            if offset < days {
                return Ok(LunisolarDate {
                    year,
                    month,
                    day: offset as u32 + 1,
                    is_leap: true,
                });
            }
            offset -= days;
        }
        month += 1;
    }

    Err(CoreError::DateResolution(format!(
        "day offset overflows lunisolar year {year}"
    )))
}

/// Converts a lunisolar date back to the Gregorian calendar. The month, day
/// and leap flag are validated against the target lunisolar year.
pub fn from_lunisolar(lunar: LunisolarDate) -> Result<NaiveDate, CoreError> {
    let LunisolarDate {
        year,
        month,
        day,
        is_leap,
    } = lunar;

    if !(1..=12).contains(&month) {
        return Err(CoreError::DateResolution(format!(
            "lunisolar month {month} is outside 1-12"
        )));
    }
    let leap = leap_month(year)?;
    if is_leap && leap != Some(month) {
        return Err(CoreError::DateResolution(format!(
            "lunisolar year {year} has no leap month {month}"
        )));
    }
    let len = resolved_month_days(year, month, is_leap)?;
    if day == 0 || day > len {
        return Err(CoreError::DateResolution(format!(
            "day {day} is outside lunisolar month {year}-{month:02} of {len} days"
        )));
    }

    let mut offset: i64 = 0;
    for y in MIN_YEAR..year {
        offset += i64::from(year_days(y)?);
    }
    for m in 1..month {
        offset += i64::from(month_days(year, m)?);
        if leap == Some(m) {
            offset += i64::from(leap_month_days(year)?);
        }
    }
    if is_leap {
        // The leap month follows its ordinary namesake.
        offset += i64::from(month_days(year, month)?);
    }
    offset += i64::from(day - 1);

    Ok(epoch() + Duration::days(offset))
}

/// Projects a Gregorian anchor date onto the lunisolar year conventionally
/// associated with `target_year`, returning the Gregorian date of the same
/// lunisolar month/day there.
///
/// An anchor in an ordinary month maps to the ordinary month of the same
/// number. An anchor inside its own year's leap month maps to the target
/// year's leap month when one exists at that number, otherwise to the
/// ordinary month of that number. A day past the end of the resolved target
/// month (lunisolar months vary 29/30 days) clamps to the month's last day,
/// so the projection only fails when the target year itself cannot be
/// resolved.
pub fn project_to_gregorian_year(
    anchor: NaiveDate,
    target_year: i32,
) -> Result<NaiveDate, CoreError> {
    let anchor_lunar = to_lunisolar(anchor)?;
    let target_leap = leap_month(target_year)?;

    let is_leap = anchor_lunar.is_leap && target_leap == Some(anchor_lunar.month);
    let len = resolved_month_days(target_year, anchor_lunar.month, is_leap)?;
    let day = anchor_lunar.day.min(len);

    from_lunisolar(LunisolarDate {
        year: target_year,
        month: anchor_lunar.month,
        day,
        is_leap,
    })
}
