pub mod azure;
mod base;

pub use azure::{AZURE_TTS_URL, AzureSpeechConfig, AzureSynthesizer, AzureSynthesizerFactory};
pub use base::{
    ResultReason, SpeechSynthesizer, SynthesisResult, SynthesizerFactory, TTSError, TTSResult,
};
