//! Microsoft Azure Speech text-to-speech.
//!
//! - **config**: constants, [`SynthesisRequest`], SSML generation and the
//!   process-wide [`AzureSpeechConfig`].
//! - **provider**: [`AzureSynthesizer`] handles and the factory that creates
//!   them.
//!
//! # Example
//!
//! ```rust,ignore
//! use azure_tts_bot::core::tts::azure::{
//!     AzureSpeechConfig, AzureSynthesizerFactory, SynthesisRequest, build_ssml,
//! };
//! use azure_tts_bot::core::tts::{SpeechSynthesizer, SynthesizerFactory};
//!
//! let factory = AzureSynthesizerFactory::new(AzureSpeechConfig::from_subscription(key, "eastus")?);
//! let mut synthesizer = factory.create_synthesizer()?;
//! let outcome = synthesizer.speak_ssml(&build_ssml(&request, false)).await;
//! synthesizer.close().await;
//! ```

mod config;
mod provider;

pub use config::{
    AUDIO_MIME_TYPE, AZURE_OUTPUT_FORMAT, AZURE_OUTPUT_FORMAT_HEADER, AZURE_TTS_URL,
    AzureSpeechConfig, DEFAULT_LANG, DEFAULT_PITCH, DEFAULT_RATE, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_VOICE_NAME, PITCH_RANGE, RATE_RANGE, SynthesisRequest, build_ssml, escape_xml,
    format_percent, pitch_offset, rate_offset,
};
pub use provider::{AzureSynthesizer, AzureSynthesizerFactory, wav_duration};
