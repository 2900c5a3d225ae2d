use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Generate iCalendar events and reminders for lunar birthdays, solar
/// birthdays, day milestones and civil observances
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate an iCalendar file from one or more config files
    Generate(GenerateCommand),
    /// Convert a solar (Gregorian) date to its lunisolar date
    ToLunar(ToLunarCommand),
    /// Convert a lunisolar date to its solar (Gregorian) date
    ToSolar(ToSolarCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct GenerateCommand {
    /// Config files (YAML or TOML), see config/example-calendar.yaml
    #[clap(required = true, num_args = 1..)]
    pub config_files: Vec<PathBuf>,
    /// Output path; defaults to the config file with an .ics extension
    #[clap(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct ToLunarCommand {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

#[derive(Parser, Debug, Clone)]
pub struct ToSolarCommand {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    /// Treat the month as the leap month of the lunisolar year
    #[clap(long)]
    pub leap: bool,
}
