//! Environment variable loading.
//!
//! `.env` values are already in the process environment by the time this runs
//! (`dotenvy` is invoked from `main`), so real variables win over `.env`.

use std::str::FromStr;

use super::ConfigError;
use crate::utils::SecretString;

pub const ENV_SPEECH_KEY: &str = "AZURE_SPEECH_SUBSCRIPTION_KEY";
pub const ENV_SPEECH_REGION: &str = "AZURE_SPEECH_REGION";
pub const ENV_SPEECH_ENDPOINT: &str = "AZURE_SPEECH_ENDPOINT";
pub const ENV_DEFAULT_LANG: &str = "TTS_DEFAULT_LANG";
pub const ENV_DEFAULT_VOICE: &str = "TTS_DEFAULT_VOICE";
pub const ENV_DEFAULT_RATE: &str = "TTS_DEFAULT_RATE";
pub const ENV_DEFAULT_PITCH: &str = "TTS_DEFAULT_PITCH";
pub const ENV_REQUEST_TIMEOUT: &str = "TTS_REQUEST_TIMEOUT_SECONDS";
pub const ENV_ESCAPE_MARKUP: &str = "TTS_ESCAPE_MARKUP";
pub const ENV_HOST: &str = "HOST";
pub const ENV_PORT: &str = "PORT";

/// Values read from the environment; `None` means unset or empty.
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub speech_key: Option<SecretString>,
    pub speech_region: Option<String>,
    pub endpoint: Option<String>,
    pub default_lang: Option<String>,
    pub default_voice_name: Option<String>,
    pub default_rate: Option<f64>,
    pub default_pitch: Option<f64>,
    pub request_timeout_seconds: Option<u64>,
    pub escape_markup: Option<bool>,
}

impl EnvConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env_string(ENV_HOST),
            port: env_parse(ENV_PORT)?,
            speech_key: env_string(ENV_SPEECH_KEY).map(SecretString::from),
            speech_region: env_string(ENV_SPEECH_REGION),
            endpoint: env_string(ENV_SPEECH_ENDPOINT),
            default_lang: env_string(ENV_DEFAULT_LANG),
            default_voice_name: env_string(ENV_DEFAULT_VOICE),
            default_rate: env_parse(ENV_DEFAULT_RATE)?,
            default_pitch: env_parse(ENV_DEFAULT_PITCH)?,
            request_timeout_seconds: env_parse(ENV_REQUEST_TIMEOUT)?,
            escape_markup: env_bool(ENV_ESCAPE_MARKUP)?,
        })
    }
}

fn env_string(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_parse<T: FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    env_string(name)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|_| ConfigError::InvalidEnv { name, value: raw })
        })
        .transpose()
}

fn env_bool(name: &'static str) -> Result<Option<bool>, ConfigError> {
    env_string(name)
        .map(|raw| match raw.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidEnv { name, value: raw }),
        })
        .transpose()
}
