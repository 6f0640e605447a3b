use reqwest::Url;

use super::{ConfigError, TtsConfig};
use crate::core::tts::azure::{PITCH_RANGE, RATE_RANGE};

/// Validate Azure credentials.
///
/// Both the subscription key and the region must be non-empty; the region
/// also selects the endpoint, so it stays required even with an override.
pub fn validate_credentials(config: &TtsConfig) -> Result<(), ConfigError> {
    if config.speech_key.is_blank() {
        return Err(ConfigError::Missing("speechKey"));
    }
    if config.speech_region.trim().is_empty() {
        return Err(ConfigError::Missing("speechRegion"));
    }
    Ok(())
}

/// Validate the default voice parameters against the service's domains.
pub fn validate_defaults(config: &TtsConfig) -> Result<(), ConfigError> {
    if config.default_lang.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "defaultLang must not be empty".to_string(),
        ));
    }
    if config.default_voice_name.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "defaultVoiceName must not be empty".to_string(),
        ));
    }
    check_range("defaultRate", config.default_rate, RATE_RANGE)?;
    check_range("defaultPitch", config.default_pitch, PITCH_RANGE)?;
    Ok(())
}

/// Validate transport settings.
pub fn validate_transport(config: &TtsConfig) -> Result<(), ConfigError> {
    if config.request_timeout_seconds == 0 {
        return Err(ConfigError::Invalid(
            "requestTimeoutSeconds must be greater than 0".to_string(),
        ));
    }
    if let Some(endpoint) = &config.endpoint {
        let url = Url::parse(endpoint)
            .map_err(|e| ConfigError::Invalid(format!("endpoint '{endpoint}' is invalid: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(format!(
                "endpoint must use http or https, got: {}",
                url.scheme()
            )));
        }
    }
    Ok(())
}

fn check_range(field: &str, value: f64, (min, max): (f64, f64)) -> Result<(), ConfigError> {
    if !value.is_finite() || value < min || value > max {
        return Err(ConfigError::Invalid(format!(
            "{field} must be between {min} and {max}, got {value}"
        )));
    }
    Ok(())
}
