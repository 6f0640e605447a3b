//! Configuration for the Azure TTS bot.
//!
//! Sources are layered with the priority YAML > ENV vars > .env values > defaults.
//! `.env` is loaded in `main` before any of this runs.
//!
//! # Modules
//! - `yaml`: YAML configuration file loading
//! - `env`: Environment variable loading
//! - `merge`: Merging YAML and environment configurations
//! - `validation`: Configuration validation logic
//!
//! # Example
//! ```rust,no_run
//! use azure_tts_bot::config::TtsConfig;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = TtsConfig::from_file(Path::new("config.yaml"))?;
//! println!("Server listening on {}", config.address());
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use crate::core::tts::azure::{
    DEFAULT_LANG, DEFAULT_PITCH, DEFAULT_RATE, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_VOICE_NAME,
};
use crate::core::tts::{AzureSpeechConfig, TTSResult};
use crate::utils::SecretString;

mod env;
mod merge;
mod validation;
mod yaml;

pub use env::{
    ENV_DEFAULT_LANG, ENV_DEFAULT_PITCH, ENV_DEFAULT_RATE, ENV_DEFAULT_VOICE, ENV_ESCAPE_MARKUP,
    ENV_HOST, ENV_PORT, ENV_REQUEST_TIMEOUT, ENV_SPEECH_ENDPOINT, ENV_SPEECH_KEY,
    ENV_SPEECH_REGION,
};
pub use yaml::{ServerYaml, YamlConfig};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid value for {name}: '{value}'")]
    InvalidEnv { name: &'static str, value: String },

    #[error("Missing required setting: {0}")]
    Missing(&'static str),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Resolved bot configuration.
///
/// The `default_*` fields fill in any command option the user leaves out.
#[derive(Debug, Clone)]
pub struct TtsConfig {
    pub host: String,
    pub port: u16,

    pub speech_key: SecretString,
    pub speech_region: String,

    pub default_lang: String,
    pub default_voice_name: String,
    pub default_rate: f64,
    pub default_pitch: f64,

    /// Full synthesis URL overriding the regional endpoint
    pub endpoint: Option<String>,
    pub request_timeout_seconds: u64,
    /// Escape XML special characters in user text before embedding it in SSML
    pub escape_markup: bool,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            speech_key: SecretString::default(),
            speech_region: String::new(),
            default_lang: DEFAULT_LANG.to_string(),
            default_voice_name: DEFAULT_VOICE_NAME.to_string(),
            default_rate: DEFAULT_RATE,
            default_pitch: DEFAULT_PITCH,
            endpoint: None,
            request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECS,
            escape_markup: false,
        }
    }
}

impl TtsConfig {
    /// Load configuration from environment variables only.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = merge::merge_config(None)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a YAML file and layer it over the environment.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The YAML file cannot be read or is malformed
    /// - Environment variables have invalid formats
    /// - Configuration validation fails
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let yaml_config = YamlConfig::from_file(path)?;
        let config = merge::merge_config(Some(yaml_config))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validation::validate_credentials(self)?;
        validation::validate_defaults(self)?;
        validation::validate_transport(self)?;
        Ok(())
    }

    /// Get the server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Build the process-wide Azure backend settings.
    pub fn azure_speech_config(&self) -> TTSResult<AzureSpeechConfig> {
        AzureSpeechConfig::new(
            self.speech_key.expose(),
            &self.speech_region,
            self.endpoint.clone(),
            self.request_timeout(),
        )
    }
}
