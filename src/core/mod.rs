pub mod tts;

// Re-export commonly used types for convenience
pub use tts::{
    AzureSpeechConfig, AzureSynthesizer, AzureSynthesizerFactory, ResultReason, SpeechSynthesizer,
    SynthesisResult, SynthesizerFactory, TTSError, TTSResult,
};
