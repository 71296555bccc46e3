//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use crate::config::schema::SmokeConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable that overrides `ui.url`.
pub const DASHBOARD_URL_ENV: &str = "WAZUH_URL";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<SmokeConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: SmokeConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load `path` when given, otherwise start from defaults.
///
/// Environment overrides are applied separately, once logging is up.
pub fn load_or_default(path: Option<&Path>) -> Result<SmokeConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => Ok(SmokeConfig::default()),
    }
}

/// Apply overrides from the process environment.
pub fn apply_process_env(config: &mut SmokeConfig) {
    apply_env_overrides(config, |key| std::env::var(key).ok());
}

/// Apply environment overrides using `lookup` to read variables.
pub fn apply_env_overrides<F>(config: &mut SmokeConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(DASHBOARD_URL_ENV).filter(|v| !v.trim().is_empty()) {
        tracing::info!(url = %url, "ui.url overridden from {}", DASHBOARD_URL_ENV);
        config.ui.url = url;
    }
}
