use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use lunical_core::lunisolar::{from_lunisolar, to_lunisolar, LunisolarDate};

use crate::cli::{ToLunarCommand, ToSolarCommand};

pub fn to_lunar(command: ToLunarCommand) -> Result<()> {
    let date = NaiveDate::from_ymd_opt(command.year, command.month, command.day)
        .ok_or_else(|| {
            anyhow!(
                "invalid solar date {}-{:02}-{:02}",
                command.year,
                command.month,
                command.day
            )
        })?;
    let lunar = to_lunisolar(date)?;
    println!("Solar {date} is lunisolar {lunar}");
    Ok(())
}

pub fn to_solar(command: ToSolarCommand) -> Result<()> {
    let lunar = LunisolarDate {
        year: command.year,
        month: command.month,
        day: command.day,
        is_leap: command.leap,
    };
    let solar = from_lunisolar(lunar)?;
    println!("Lunisolar {lunar} is solar {solar}");
    Ok(())
}
