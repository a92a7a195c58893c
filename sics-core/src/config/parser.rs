use std::path::Path;

use crate::config::AdapterConfig;
use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
    Auto,
}

impl ConfigFormat {
    /// Picks the format from a file extension, falling back to auto-detection.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ConfigFormat::Json,
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                ConfigFormat::Yaml
            }
            _ => ConfigFormat::Auto,
        }
    }
}

/// Parses an adapter configuration document. Does not validate it.
pub fn parse_config_str(input: &str, format: ConfigFormat) -> Result<AdapterConfig, ConfigError> {
    match format {
        ConfigFormat::Json => Ok(serde_json::from_str(input)?),
        ConfigFormat::Yaml => Ok(serde_yaml::from_str(input)?),
        ConfigFormat::Auto => parse_config_auto(input),
    }
}

/// Reads, parses, and validates a configuration file.
pub fn load_config_file(path: impl AsRef<Path>) -> Result<AdapterConfig, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let config = parse_config_str(&content, ConfigFormat::from_path(path))?;
    config.validate()?;
    tracing::info!(path = %path.display(), teams = config.teams.len(), "loaded adapter configuration");
    Ok(config)
}

fn parse_config_auto(input: &str) -> Result<AdapterConfig, ConfigError> {
    // JSON always starts with `{` after trimming; anything else is tried as YAML first.
    let trimmed = input.trim_start();
    if trimmed.starts_with('{') {
        return match serde_json::from_str::<AdapterConfig>(input) {
            Ok(cfg) => Ok(cfg),
            Err(e) => serde_yaml::from_str::<AdapterConfig>(input).map_err(|_| ConfigError::Json(e)),
        };
    }

    match serde_yaml::from_str::<AdapterConfig>(input) {
        Ok(cfg) => Ok(cfg),
        Err(e) => serde_json::from_str::<AdapterConfig>(input).map_err(|_| ConfigError::Yaml(e)),
    }
}
