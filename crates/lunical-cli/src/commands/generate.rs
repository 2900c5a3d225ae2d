use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use lunical_core::expand::expand_calendar;

use crate::cli::GenerateCommand;
use crate::config;
use crate::ical;

pub fn generate(command: GenerateCommand) -> Result<()> {
    if command.output.is_some() && command.config_files.len() > 1 {
        bail!("--output can only be used with a single config file");
    }

    for path in &command.config_files {
        let output = command
            .output
            .clone()
            .unwrap_or_else(|| default_output(path));
        generate_one(path, &output)?;
    }
    Ok(())
}

fn default_output(config_path: &Path) -> PathBuf {
    config_path.with_extension("ics")
}

fn generate_one(config_path: &Path, output: &Path) -> Result<()> {
    let app_config = config::load_config(config_path)?;
    let expansion = expand_calendar(&app_config)?;

    let text = ical::write_ical(
        &expansion.events,
        &app_config.global.calendar_name,
        &app_config.global.timezone,
    )?;
    fs::write(output, text)
        .with_context(|| format!("cannot write iCal file {}", output.display()))?;

    if expansion.warnings.is_empty() {
        println!("Wrote {} ({} events)", output.display(), expansion.events.len());
    } else {
        println!(
            "Wrote {} ({} events, {} warnings)",
            output.display(),
            expansion.events.len(),
            expansion.warnings.len()
        );
    }
    Ok(())
}
