//! Azure Speech synthesizer backed by the REST API.
//!
//! - Endpoint: `POST https://{region}.tts.speech.microsoft.com/cognitiveservices/v1`
//! - Auth: `Ocp-Apim-Subscription-Key`
//! - Body: SSML (`application/ssml+xml`)
//! - Output: `riff-24khz-16bit-mono-pcm`

use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, StatusCode};
use tracing::{debug, error, info, warn};

use super::config::{
    AZURE_OUTPUT_FORMAT, AZURE_OUTPUT_FORMAT_HEADER, AzureSpeechConfig, PITCH_RANGE, RATE_RANGE,
};
use crate::core::tts::base::{
    SpeechSynthesizer, SynthesisResult, SynthesizerFactory, TTSError, TTSResult,
};

const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";
const SSML_CONTENT_TYPE: &str = "application/ssml+xml";
const CLIENT_USER_AGENT: &str = "azure-tts-bot";
const UNREADABLE_BODY: &str = "<unreadable body>";

/// Read the playback duration from a RIFF/WAV payload.
///
/// An empty payload is zero seconds long. When the `data` chunk size is
/// unset (streamed responses) or claims more than the body holds, the
/// duration comes from the PCM bytes actually present.
pub fn wav_duration(audio: &[u8]) -> TTSResult<Duration> {
    if audio.is_empty() {
        return Ok(Duration::ZERO);
    }

    let reader = hound::WavReader::new(Cursor::new(audio)).map_err(|e| {
        TTSError::AudioGenerationFailed(format!("Service returned invalid WAV audio: {}", e))
    })?;

    let spec = reader.spec();
    if spec.sample_rate == 0 {
        return Ok(Duration::ZERO);
    }

    // duration() counts frames, i.e. samples per channel
    let header_frames = u64::from(reader.duration());
    // the reader stops at the start of the data chunk
    let data_start = reader.into_inner().position() as usize;

    let bytes_per_frame =
        u64::from(spec.channels) * u64::from(spec.bits_per_sample).div_ceil(8);
    let available_frames = match bytes_per_frame {
        0 => 0,
        n => audio.len().saturating_sub(data_start) as u64 / n,
    };

    let frames = if header_frames == 0 || header_frames > available_frames {
        available_frames
    } else {
        header_frames
    };

    Ok(Duration::from_secs_f64(
        frames as f64 / f64::from(spec.sample_rate),
    ))
}

/// Detail text for a non-2xx response.
fn error_details(status: StatusCode, body: Option<&str>) -> String {
    format!(
        "Azure TTS API error ({}): {}",
        status,
        body.unwrap_or(UNREADABLE_BODY)
    )
}

/// A single-use Azure synthesis handle.
///
/// Borrows the pooled HTTP client from [`AzureSpeechConfig`]; [`close`] drops
/// that borrow and makes further calls fail with
/// [`TTSError::ProviderNotReady`].
///
/// [`close`]: SpeechSynthesizer::close
pub struct AzureSynthesizer {
    config: Arc<AzureSpeechConfig>,
    client: Option<Client>,
}

impl AzureSynthesizer {
    pub fn new(config: Arc<AzureSpeechConfig>) -> Self {
        let client = Some(config.client.clone());
        Self { config, client }
    }

    /// Build the Azure-specific HTTP request for `ssml`.
    fn build_http_request(&self, client: &Client, ssml: &str) -> reqwest::RequestBuilder {
        client
            .post(self.config.tts_url())
            .header(SUBSCRIPTION_KEY_HEADER, self.config.subscription_key())
            .header(CONTENT_TYPE, SSML_CONTENT_TYPE)
            .header(AZURE_OUTPUT_FORMAT_HEADER, AZURE_OUTPUT_FORMAT)
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .body(ssml.to_string())
    }
}

#[async_trait]
impl SpeechSynthesizer for AzureSynthesizer {
    async fn speak_ssml(&mut self, ssml: &str) -> TTSResult<SynthesisResult> {
        let client = self
            .client
            .clone()
            .ok_or_else(|| TTSError::ProviderNotReady("synthesizer already closed".into()))?;

        debug!(
            region = %self.config.region(),
            ssml_len = ssml.len(),
            "Submitting SSML to Azure TTS"
        );

        let response = self
            .build_http_request(&client, ssml)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Azure TTS API request failed");
                TTSError::NetworkError(format!("Request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => Some(body),
                Err(e) => {
                    warn!(error = %e, "Failed to read Azure TTS error body");
                    None
                }
            };
            let details = error_details(status, body.as_deref());
            error!(status = %status, details = %details, "Azure TTS API returned error");
            return Ok(SynthesisResult::canceled(details));
        }

        let audio: Bytes = response.bytes().await.map_err(|e| {
            error!(error = %e, "Failed to read audio response");
            TTSError::NetworkError(format!("Failed to read audio: {}", e))
        })?;
        let duration = wav_duration(&audio)?;

        debug!(
            audio_bytes = audio.len(),
            duration_ms = duration.as_millis() as u64,
            "Azure TTS synthesis completed"
        );

        Ok(SynthesisResult::completed(audio, duration))
    }

    async fn close(&mut self) {
        if self.client.take().is_some() {
            debug!("Azure synthesizer closed");
        }
    }
}

/// Hands out one [`AzureSynthesizer`] per invocation.
#[derive(Debug, Clone)]
pub struct AzureSynthesizerFactory {
    config: Arc<AzureSpeechConfig>,
}

impl AzureSynthesizerFactory {
    pub fn new(config: AzureSpeechConfig) -> Self {
        info!(
            region = %config.region(),
            endpoint = %config.tts_url(),
            "Azure speech backend configured"
        );
        Self {
            config: Arc::new(config),
        }
    }
}

impl SynthesizerFactory for AzureSynthesizerFactory {
    fn create_synthesizer(&self) -> TTSResult<Box<dyn SpeechSynthesizer>> {
        Ok(Box::new(AzureSynthesizer::new(self.config.clone())))
    }

    fn get_provider_info(&self) -> serde_json::Value {
        serde_json::json!({
            "provider": "azure",
            "version": "1.0.0",
            "api_type": "HTTP REST",
            "endpoint": self.config.tts_url(),
            "region": self.config.region(),
            "output_format": AZURE_OUTPUT_FORMAT,
            "rate_range": { "min": RATE_RANGE.0, "max": RATE_RANGE.1, "default": 1.0 },
            "pitch_range": { "min": PITCH_RANGE.0, "max": PITCH_RANGE.1, "default": 1.0 },
            "documentation": "https://learn.microsoft.com/en-us/azure/ai-services/speech-service/rest-text-to-speech",
        })
    }
}
