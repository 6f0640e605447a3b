use serde::Deserialize;
use std::path::Path;

use super::ConfigError;
use crate::utils::SecretString;

/// Complete YAML configuration structure
///
/// Every field is optional so a file can override just part of the
/// environment-derived configuration.
///
/// # Example YAML structure
/// ```yaml
/// server:
///   host: "0.0.0.0"
///   port: 3001
///
/// speechKey: "your-azure-speech-key"
/// speechRegion: "eastus"
/// defaultLang: "en-US"
/// defaultVoiceName: "en-US-AshleyNeural"
/// defaultRate: 1.0
/// defaultPitch: 1.0
/// requestTimeoutSeconds: 60
/// escapeMarkup: false
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct YamlConfig {
    pub server: Option<ServerYaml>,
    pub speech_key: Option<SecretString>,
    pub speech_region: Option<String>,
    pub default_lang: Option<String>,
    pub default_voice_name: Option<String>,
    pub default_rate: Option<f64>,
    pub default_pitch: Option<f64>,
    /// Full synthesis URL, replaces the regional endpoint when set
    pub endpoint: Option<String>,
    pub request_timeout_seconds: Option<u64>,
    pub escape_markup: Option<bool>,
}

/// Server configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ServerYaml {
    pub host: Option<String>,
    pub port: Option<u16>,
}

impl YamlConfig {
    /// Load and parse a YAML configuration file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents)
    }

    /// Parse YAML configuration from a string
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(contents)?)
    }
}
