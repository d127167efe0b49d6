//! Configuration file loading.
//!
//! Reads a YAML policy file, enforces a size limit, deserializes it into
//! [`GeneratorConfig`] and validates the result.

use std::fs;
use std::path::Path;

use crate::config::GeneratorConfig;
use crate::error::ConfigError;

/// Environment variable overriding the maximum config file size.
pub const MAX_CONFIG_SIZE_ENV: &str = "DOCS2SCHEMA_MAX_CONFIG_SIZE";

/// Default maximum config file size (1 MiB).
pub const DEFAULT_MAX_CONFIG_SIZE: u64 = 1024 * 1024;

/// Returns the effective config size limit in bytes.
#[must_use]
pub fn max_config_size() -> u64 {
    env_or(MAX_CONFIG_SIZE_ENV, DEFAULT_MAX_CONFIG_SIZE)
}

/// Loads and validates a configuration file within [`max_config_size`].
///
/// An empty file yields the default configuration.
///
/// # Errors
///
/// See [`load_config_with_limit`].
pub fn load_config(path: &Path) -> Result<GeneratorConfig, ConfigError> {
    load_config_with_limit(path, max_config_size())
}

/// Loads and validates a configuration file no larger than `limit` bytes.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the file is missing, unreadable, over
/// `limit`, not valid YAML for [`GeneratorConfig`], or holds unusable values.
pub fn load_config_with_limit(path: &Path, limit: u64) -> Result<GeneratorConfig, ConfigError> {
    let metadata = fs::metadata(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ConfigError::MissingFile {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Unreadable {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    if metadata.len() > limit {
        return Err(ConfigError::TooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            limit,
        });
    }

    let text = fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let config = parse_config(&text, path)?;
    config.validate()?;
    tracing::debug!(path = %path.display(), "configuration loaded");
    Ok(config)
}

/// Parses configuration YAML; `path` is only used for error messages.
///
/// # Errors
///
/// Returns [`ConfigError::ParseError`] with the line number when the YAML is
/// malformed or names an unknown field.
pub fn parse_config(text: &str, path: &Path) -> Result<GeneratorConfig, ConfigError> {
    if text.trim().is_empty() {
        return Ok(GeneratorConfig::default());
    }

    serde_yaml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        line: e.location().map(|loc| loc.line()),
        message: e.to_string(),
    })
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
