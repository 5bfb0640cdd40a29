//! Reading a single override file.

use std::path::Path;

use super::ConfigError;
use crate::Value;

/// Data format of the override files in a config directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfigFormat {
    #[default]
    Toml,
    Json,
}

impl ConfigFormat {
    /// File extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ConfigFormat::Toml => "toml",
            ConfigFormat::Json => "json",
        }
    }

    /// Guesses the format from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "toml" => Some(ConfigFormat::Toml),
            "json" => Some(ConfigFormat::Json),
            _ => None,
        }
    }

    fn parse(self, contents: &str, path: &Path) -> Result<Value, ConfigError> {
        match self {
            ConfigFormat::Toml => toml::from_str::<toml::Table>(contents)
                .map(Value::from)
                .map_err(|e| ConfigError::ParseError {
                    path: path.to_path_buf(),
                    source: e,
                }),
            ConfigFormat::Json => serde_json::from_str::<serde_json::Value>(contents)
                .map(Value::from)
                .map_err(|e| ConfigError::JsonParseError {
                    path: path.to_path_buf(),
                    source: e,
                }),
        }
    }
}

/// Loads and parses an override file.
///
/// Returns `Ok(None)` if the file doesn't exist. The top level must be a
/// mapping (or sequence); anything else is rejected.
pub fn load_config_file(path: &Path, format: ConfigFormat) -> Result<Option<Value>, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => {
            let value = format.parse(&contents, path)?;
            if value.is_scalar() {
                return Err(ConfigError::NotAMapping(path.display().to_string()));
            }
            Ok(Some(value))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}
