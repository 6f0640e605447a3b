//! Azure Speech configuration and SSML generation.
//!
//! # References
//!
//! - [REST API](https://learn.microsoft.com/en-us/azure/ai-services/speech-service/rest-text-to-speech)
//! - [SSML prosody](https://learn.microsoft.com/en-us/azure/ai-services/speech-service/speech-synthesis-markup-voice#adjust-prosody)

use std::borrow::Cow;
use std::time::Duration;

use reqwest::Client;

use crate::core::tts::base::{TTSError, TTSResult};
use crate::utils::SecretString;

// =============================================================================
// Constants
// =============================================================================

/// Azure TTS REST endpoint template; `{region}` is replaced at runtime.
pub const AZURE_TTS_URL: &str = "https://{region}.tts.speech.microsoft.com/cognitiveservices/v1";

/// Header carrying the requested audio output format.
pub const AZURE_OUTPUT_FORMAT_HEADER: &str = "X-Microsoft-OutputFormat";

/// 24kHz 16-bit mono PCM wrapped in a RIFF header.
pub const AZURE_OUTPUT_FORMAT: &str = "riff-24khz-16bit-mono-pcm";

/// MIME type of the audio attachment produced by [`AZURE_OUTPUT_FORMAT`].
pub const AUDIO_MIME_TYPE: &str = "audio/x-wav";

pub const DEFAULT_LANG: &str = "en-US";
pub const DEFAULT_VOICE_NAME: &str = "en-US-AshleyNeural";
pub const DEFAULT_RATE: f64 = 1.0;
pub const DEFAULT_PITCH: f64 = 1.0;

/// Accepted multiplier ranges, inclusive.
pub const RATE_RANGE: (f64, f64) = (0.0, 3.0);
pub const PITCH_RANGE: (f64, f64) = (0.0, 2.0);

/// Default upper bound for a single synthesis request.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

const SSML_NAMESPACE: &str = "http://www.w3.org/2001/10/synthesis";
const MSTTS_NAMESPACE: &str = "http://www.w3.org/2001/mstts";
const EMO_NAMESPACE: &str = "http://www.w3.org/2009/10/emotionml";

// =============================================================================
// Synthesis request
// =============================================================================

/// Fully resolved parameters for one synthesis.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisRequest {
    pub text: String,
    pub lang: String,
    pub voice: String,
    /// Speaking rate multiplier, 1.0 is the voice's natural speed.
    pub rate: f64,
    /// Pitch multiplier, 1.0 is the voice's natural pitch.
    pub pitch: f64,
}

/// Relative rate offset in percent: `(rate - 1) * 100`.
pub fn rate_offset(rate: f64) -> f64 {
    (rate - 1.0) * 100.0
}

/// Relative pitch offset in percent: `(pitch - 1) * 50`.
pub fn pitch_offset(pitch: f64) -> f64 {
    (pitch - 1.0) * 50.0
}

/// Render an offset as an SSML percentage, e.g. `52%` or `-12.5%`.
///
/// Rounded to two decimals so float noise such as `52.00000000000001` never
/// reaches the service.
pub fn format_percent(offset: f64) -> String {
    let rounded = (offset * 100.0).round() / 100.0;
    // -0.0 would render as "-0"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded}%")
}

/// Escape the five XML special characters.
pub fn escape_xml(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(
        text.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;"),
    )
}

/// Build the SSML document for `request`.
///
/// With `escape` off the text and attribute values are embedded verbatim, so
/// callers may pass their own inline SSML.
pub fn build_ssml(request: &SynthesisRequest, escape: bool) -> String {
    let value = |s: &str| -> String {
        if escape {
            escape_xml(s).into_owned()
        } else {
            s.to_string()
        }
    };

    format!(
        "<speak xmlns=\"{SSML_NAMESPACE}\" xmlns:mstts=\"{MSTTS_NAMESPACE}\" xmlns:emo=\"{EMO_NAMESPACE}\" version=\"1.0\" xml:lang=\"{lang}\"><voice name=\"{voice}\"><prosody rate=\"{rate}\" pitch=\"{pitch}\">{text}</prosody></voice></speak>",
        lang = value(&request.lang),
        voice = value(&request.voice),
        rate = format_percent(rate_offset(request.rate)),
        pitch = format_percent(pitch_offset(request.pitch)),
        text = value(&request.text),
    )
}

// =============================================================================
// Backend configuration
// =============================================================================

/// Process-wide Azure Speech settings, immutable once built.
///
/// Owns the pooled HTTP client that per-invocation synthesizers borrow.
#[derive(Debug)]
pub struct AzureSpeechConfig {
    subscription_key: SecretString,
    region: String,
    endpoint: Option<String>,
    request_timeout: Duration,
    pub(crate) client: Client,
}

impl AzureSpeechConfig {
    /// Equivalent of `SpeechConfig::fromSubscription`.
    pub fn from_subscription(subscription_key: &str, region: &str) -> TTSResult<Self> {
        Self::new(
            subscription_key,
            region,
            None,
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    pub fn new(
        subscription_key: &str,
        region: &str,
        endpoint: Option<String>,
        request_timeout: Duration,
    ) -> TTSResult<Self> {
        if subscription_key.trim().is_empty() {
            return Err(TTSError::InvalidConfiguration(
                "Azure speech subscription key is required".to_string(),
            ));
        }
        if region.trim().is_empty() {
            return Err(TTSError::InvalidConfiguration(
                "Azure speech region is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(request_timeout)
            .connect_timeout(request_timeout.min(Duration::from_secs(30)))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| {
                TTSError::ConnectionFailed(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            subscription_key: SecretString::new(subscription_key.trim()),
            region: region.trim().to_string(),
            endpoint,
            request_timeout,
            client,
        })
    }

    pub fn subscription_key(&self) -> &str {
        self.subscription_key.expose()
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Synthesis URL: the explicit endpoint if set, otherwise the regional one.
    pub fn tts_url(&self) -> String {
        match &self.endpoint {
            Some(endpoint) => endpoint.clone(),
            None => AZURE_TTS_URL.replace("{region}", &self.region),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(text: &str, rate: f64, pitch: f64) -> SynthesisRequest {
        SynthesisRequest {
            text: text.to_string(),
            lang: DEFAULT_LANG.to_string(),
            voice: DEFAULT_VOICE_NAME.to_string(),
            rate,
            pitch,
        }
    }

    #[test]
    fn test_default_offsets_are_zero() {
        assert_eq!(format_percent(rate_offset(1.0)), "0%");
        assert_eq!(format_percent(pitch_offset(1.0)), "0%");

        let ssml = build_ssml(&request("hello", 1.0, 1.0), false);
        assert!(ssml.contains(r#"<prosody rate="0%" pitch="0%">"#));
    }

    #[test]
    fn test_rate_offset_scale() {
        assert_eq!(format_percent(rate_offset(1.52)), "52%");
        assert_eq!(format_percent(rate_offset(0.5)), "-50%");
        assert_eq!(format_percent(rate_offset(3.0)), "200%");
        assert_eq!(format_percent(rate_offset(0.0)), "-100%");
    }

    #[test]
    fn test_pitch_offset_scale() {
        assert_eq!(format_percent(pitch_offset(1.52)), "26%");
        assert_eq!(format_percent(pitch_offset(2.0)), "50%");
        assert_eq!(format_percent(pitch_offset(0.0)), "-50%");
        assert_eq!(format_percent(pitch_offset(1.02)), "1%");
        assert_eq!(format_percent(pitch_offset(1.25)), "12.5%");
    }

    #[test]
    fn test_format_percent_never_negative_zero() {
        assert_eq!(format_percent(-0.0), "0%");
        assert_eq!(format_percent(-0.001), "0%");
    }

    #[test]
    fn test_build_ssml_structure() {
        let req = SynthesisRequest {
            text: "gymbag".to_string(),
            lang: "en-US".to_string(),
            voice: "en-US-AshleyNeural".to_string(),
            rate: 1.0,
            pitch: 1.52,
        };
        let ssml = build_ssml(&req, false);

        assert!(ssml.starts_with("<speak "));
        assert!(ssml.ends_with("</speak>"));
        assert!(ssml.contains(r#"xmlns="http://www.w3.org/2001/10/synthesis""#));
        assert!(ssml.contains(r#"xmlns:mstts="http://www.w3.org/2001/mstts""#));
        assert!(ssml.contains(r#"version="1.0""#));
        assert!(ssml.contains(r#"xml:lang="en-US""#));
        assert!(ssml.contains(
            r#"<voice name="en-US-AshleyNeural"><prosody rate="0%" pitch="26%">gymbag</prosody></voice>"#
        ));
    }

    #[test]
    fn test_build_ssml_keeps_text_verbatim() {
        let text = "Tom & Jerry <break time=\"500ms\"/> say 'hi'";
        let ssml = build_ssml(&request(text, 1.0, 1.0), false);
        assert!(ssml.contains(text));
        assert!(!ssml.contains("&amp;"));
    }

    #[test]
    fn test_build_ssml_escapes_when_enabled() {
        let mut req = request("Tom & Jerry <3 cats > dogs", 1.0, 1.0);
        req.voice = "a\"b".to_string();
        let ssml = build_ssml(&req, true);

        assert!(ssml.contains("Tom &amp; Jerry &lt;3 cats &gt; dogs"));
        assert!(ssml.contains(r#"<voice name="a&quot;b">"#));
    }

    #[test]
    fn test_escape_xml_borrows_clean_text() {
        assert!(matches!(escape_xml("plain text"), Cow::Borrowed(_)));
        assert_eq!(escape_xml("it's"), "it&apos;s");
    }

    #[test]
    fn test_tts_url_from_region() {
        let config = AzureSpeechConfig::from_subscription("key", "westeurope").unwrap();
        assert_eq!(
            config.tts_url(),
            "https://westeurope.tts.speech.microsoft.com/cognitiveservices/v1"
        );
    }

    #[test]
    fn test_tts_url_endpoint_override() {
        let config = AzureSpeechConfig::new(
            "key",
            "eastus",
            Some("http://127.0.0.1:9999/cognitiveservices/v1".to_string()),
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(config.tts_url(), "http://127.0.0.1:9999/cognitiveservices/v1");
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_missing_credentials_rejected() {
        assert!(matches!(
            AzureSpeechConfig::from_subscription("", "eastus"),
            Err(TTSError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            AzureSpeechConfig::from_subscription("key", "  "),
            Err(TTSError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_endpoint_override_still_requires_region() {
        let result = AzureSpeechConfig::new(
            "key",
            "",
            Some("http://127.0.0.1:9000/tts".to_string()),
            Duration::from_secs(5),
        );
        assert!(matches!(result, Err(TTSError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = AzureSpeechConfig::from_subscription("super-secret", "eastus").unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
