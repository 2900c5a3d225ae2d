use std::path::Path;

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Toml, Yaml};
use figment::Figment;
use lunical_core::config::AppConfig;

/// Loads an [`AppConfig`] from a YAML or TOML file (picked by extension),
/// with `LUNICAL_*` environment variables layered on top; nested keys use
/// `__`, e.g. `LUNICAL_GLOBAL__TIMEZONE`.
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let file = match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => Figment::from(Toml::file(path)),
        _ => Figment::from(Yaml::file(path)),
    };

    file.merge(Env::prefixed("LUNICAL_").split("__"))
        .extract()
        .with_context(|| format!("invalid config file {}", path.display()))
}
