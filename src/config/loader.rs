//! Configuration loading from disk.
//!
//! Supports `${VAR}` environment references anywhere in the file, resolved
//! before the TOML parser runs. An unset or empty variable aborts the load.

use std::fs;
use std::path::Path;

use regex::Regex;
use thiserror::Error;

use crate::config::schema::ServeConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("environment variable {0} is not found or value is not set")]
    MissingEnvVar(String),

    #[error("validation failed: {}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join(", "))]
    Validation(Vec<ValidationError>),
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ServeConfig, ConfigError> {
    let raw = fs::read_to_string(path)?;
    let resolved = expand_env(&raw)?;
    let config: ServeConfig = toml::from_str(&resolved)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Replace every `${VAR}` occurrence with the value of `VAR` from the
/// environment. Unset variables are an error, not an empty expansion.
pub fn expand_env(raw: &str) -> Result<String, ConfigError> {
    let pattern = Regex::new(r"\$\{([^{}]+)\}").expect("env reference pattern is valid");

    let mut resolved = String::with_capacity(raw.len());
    let mut last = 0;
    for caps in pattern.captures_iter(raw) {
        let whole = caps.get(0).expect("capture group 0 always exists");
        let name = &caps[1];
        let value = std::env::var(name)
            .ok()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))?;
        resolved.push_str(&raw[last..whole.start()]);
        resolved.push_str(&value);
        last = whole.end();
    }
    resolved.push_str(&raw[last..]);

    Ok(resolved)
}
