//! Option document loading
//!
//! sqlc hands plugin options over as JSON bytes. YAML and TOML are accepted
//! too (behind the `yaml` and `toml` features) so options can live in their
//! own files during development and tests.

use crate::error::{ConfigError, ConfigResult};
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::debug;

/// Supported document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON, the sqlc plugin wire format
    Json,
    /// YAML (`.yaml`, `.yml`)
    #[cfg(feature = "yaml")]
    Yaml,
    /// TOML (`.toml`)
    #[cfg(feature = "toml")]
    Toml,
}

impl ConfigFormat {
    /// Pick a format from a file extension
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Ok(Self::Json),
            #[cfg(feature = "yaml")]
            "yaml" | "yml" => Ok(Self::Yaml),
            #[cfg(feature = "toml")]
            "toml" => Ok(Self::Toml),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Json => "json",
            #[cfg(feature = "yaml")]
            Self::Yaml => "yaml",
            #[cfg(feature = "toml")]
            Self::Toml => "toml",
        }
    }
}

/// Deserialize a document, treating empty input as the type's default
pub fn from_str<T>(content: &str, format: ConfigFormat) -> ConfigResult<T>
where
    T: DeserializeOwned + Default,
{
    if content.trim().is_empty() {
        return Ok(T::default());
    }
    let parse_err = |message: String| ConfigError::Parse {
        format: format.name(),
        message,
    };
    match format {
        ConfigFormat::Json => serde_json::from_str(content).map_err(|e| parse_err(e.to_string())),
        #[cfg(feature = "yaml")]
        ConfigFormat::Yaml => serde_yaml::from_str(content).map_err(|e| parse_err(e.to_string())),
        #[cfg(feature = "toml")]
        ConfigFormat::Toml => toml::from_str(content).map_err(|e| parse_err(e.to_string())),
    }
}

/// Deserialize the JSON bytes sqlc sends with a generate request
pub fn from_json_bytes<T>(bytes: &[u8]) -> ConfigResult<T>
where
    T: DeserializeOwned + Default,
{
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(bytes).map_err(|e| ConfigError::Parse {
        format: "json",
        message: e.to_string(),
    })
}

/// Read and deserialize an options file
pub fn load_from_path<T>(path: impl AsRef<Path>) -> ConfigResult<T>
where
    T: DeserializeOwned + Default,
{
    let path = path.as_ref();
    let format = ConfigFormat::from_path(path)?;
    let content = std::fs::read_to_string(path)?;
    debug!(path = %path.display(), format = format.name(), "loading options");
    from_str(&content, format)
}
