//! Backend-agnostic synthesis types.
//!
//! A [`SpeechSynthesizer`] is a per-invocation handle to the remote synthesis
//! service. It performs one synthesis per call and resolves exactly once: the
//! `Ok` arm carries the service's [`SynthesisResult`] (which may itself report
//! a cancellation), the `Err` arm is reserved for transport or invocation
//! failures where no result was produced at all.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Errors raised while talking to a synthesis backend.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TTSError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Provider not ready: {0}")]
    ProviderNotReady(String),

    #[error("Audio generation failed: {0}")]
    AudioGenerationFailed(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type TTSResult<T> = Result<T, TTSError>;

/// Why a synthesis request finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultReason {
    /// The service produced the complete audio stream.
    SynthesizingAudioCompleted,
    /// The service rejected or aborted the request.
    Canceled,
}

/// Outcome of a single synthesis, consumed once by the caller.
#[derive(Debug, Clone)]
pub struct SynthesisResult {
    pub reason: ResultReason,
    /// Raw audio payload (RIFF/WAV for the Azure output format in use).
    pub audio_data: Bytes,
    /// Playback duration of `audio_data`. Zero means the service returned no
    /// speech at all.
    pub audio_duration: Duration,
    /// Service supplied detail, only populated for [`ResultReason::Canceled`].
    pub error_details: String,
}

impl SynthesisResult {
    pub fn completed(audio_data: Bytes, audio_duration: Duration) -> Self {
        Self {
            reason: ResultReason::SynthesizingAudioCompleted,
            audio_data,
            audio_duration,
            error_details: String::new(),
        }
    }

    pub fn canceled(error_details: impl Into<String>) -> Self {
        Self {
            reason: ResultReason::Canceled,
            audio_data: Bytes::new(),
            audio_duration: Duration::ZERO,
            error_details: error_details.into(),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.reason == ResultReason::SynthesizingAudioCompleted
    }
}

/// A live synthesis handle.
///
/// Handles are created per invocation and must be closed once the outcome is
/// known; they are never pooled.
#[async_trait]
pub trait SpeechSynthesizer: Send {
    /// Submit an SSML document and wait for the single completion.
    async fn speak_ssml(&mut self, ssml: &str) -> TTSResult<SynthesisResult>;

    /// Release the handle. Calling it more than once is a no-op.
    async fn close(&mut self);
}

/// Creates fresh [`SpeechSynthesizer`] handles bound to an immutable backend
/// configuration.
pub trait SynthesizerFactory: Send + Sync {
    fn create_synthesizer(&self) -> TTSResult<Box<dyn SpeechSynthesizer>>;

    /// Static description of the backend for diagnostics.
    fn get_provider_info(&self) -> serde_json::Value;
}
