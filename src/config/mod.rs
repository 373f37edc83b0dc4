pub mod types;

use anyhow::{Context, Result};
use config::{Config, File, FileFormat};
use std::path::{Path, PathBuf};
pub use types::*;

/// Values given on the command line or in the environment. Each one wins
/// over whatever the configuration file says.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub port: Option<u16>,
    pub static_dir: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_format: Option<String>,
}

/// Load configuration from an optional TOML file and apply overrides.
///
/// A missing file is not an error; every setting has a default.
pub fn load_config<P: AsRef<Path>>(path: P, overrides: &ConfigOverrides) -> Result<AppConfig> {
    let path = path.as_ref();

    let builder = register_target_defaults(Config::builder(), "primary", &TargetConfig::primary())?;
    let builder = register_target_defaults(builder, "fallback", &TargetConfig::fallback())?;

    let config = builder
        .add_source(File::from(path).format(FileFormat::Toml).required(false))
        .set_override_option("http.port", overrides.port.map(i64::from))?
        .set_override_option(
            "http.static_dir",
            overrides
                .static_dir
                .as_ref()
                .map(|dir| dir.to_string_lossy().into_owned()),
        )?
        .set_override_option("logging.level", overrides.log_level.clone())?
        .set_override_option("logging.format", overrides.log_format.clone())?
        .build()
        .with_context(|| format!("Failed to load config from: {}", path.display()))?;

    let app_config: AppConfig = config
        .try_deserialize()
        .context("Failed to deserialize configuration")?;

    validate_config(&app_config)?;

    Ok(app_config)
}

fn register_target_defaults(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    name: &str,
    target: &TargetConfig,
) -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
    let key = |field: &str| format!("upstream.{}.{}", name, field);

    Ok(builder
        .set_default(key("url"), target.url.as_str())?
        .set_default(key("accept"), target.accept.as_str())?
        .set_default(key("timeout_secs"), target.timeout_secs as i64)?)
}

/// Validate the loaded configuration
fn validate_config(config: &AppConfig) -> Result<()> {
    for (name, target) in [
        ("primary", &config.upstream.primary),
        ("fallback", &config.upstream.fallback),
    ] {
        let url = reqwest::Url::parse(&target.url)
            .with_context(|| format!("Invalid {} upstream URL '{}'", name, target.url))?;
        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!(
                "Upstream {} URL '{}' must use http or https",
                name,
                target.url
            );
        }
        if target.timeout_secs == 0 {
            anyhow::bail!("Upstream {} timeout must be greater than zero", name);
        }
    }

    if !config.http.static_dir.is_dir() {
        anyhow::bail!(
            "Static directory '{}' does not exist or is not a directory",
            config.http.static_dir.display()
        );
    }

    // Validate log level
    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.logging.level.as_str()) {
        anyhow::bail!(
            "Invalid log level '{}'. Valid levels: {}",
            config.logging.level,
            valid_levels.join(", ")
        );
    }

    // Validate log format
    let valid_formats = ["pretty", "json"];
    if !valid_formats.contains(&config.logging.format.as_str()) {
        anyhow::bail!(
            "Invalid log format '{}'. Valid formats: {}",
            config.logging.format,
            valid_formats.join(", ")
        );
    }

    Ok(())
}
