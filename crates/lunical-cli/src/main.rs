use clap::Parser;
use lunical_core::error::CoreError;
use owo_colors::{OwoColorize, Style};
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;
mod ical;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();

    let result = match cli.command {
        cli::Commands::Generate(command) => commands::generate::generate(command),
        cli::Commands::ToLunar(command) => commands::convert::to_lunar(command),
        cli::Commands::ToSolar(command) => commands::convert::to_solar(command),
    };

    if let Err(e) = result {
        handle_error(&e);
        std::process::exit(1);
    }
}

fn handle_error(err: &anyhow::Error) {
    let error_style = Style::new().red().bold();

    if let Some(core_error) = err.downcast_ref::<CoreError>() {
        match core_error {
            CoreError::ConfigValidation(s) => {
                eprintln!("{} Invalid configuration: {}", "Error:".style(error_style), s);
            }
            CoreError::DateResolution(s) => {
                eprintln!("{} {}", "Error:".style(error_style), s);
            }
            CoreError::InvalidTimezone(s) => {
                eprintln!(
                    "{} Invalid timezone: {}",
                    "Error:".style(error_style),
                    s.yellow()
                );
            }
        }
    } else {
        eprintln!("{} {:#}", "Error:".style(error_style), err);
    }
}
