use std::sync::Arc;

use crate::command::TtsCommand;
use crate::config::TtsConfig;
use crate::core::tts::{AzureSynthesizerFactory, SynthesizerFactory, TTSResult};

/// Shared, read-only application state.
pub struct AppState {
    pub config: Arc<TtsConfig>,
    pub tts: TtsCommand,
}

impl AppState {
    /// Build state backed by the Azure Speech REST API.
    pub fn new(config: TtsConfig) -> TTSResult<Arc<Self>> {
        let factory = AzureSynthesizerFactory::new(config.azure_speech_config()?);
        Ok(Self::with_factory(config, Arc::new(factory)))
    }

    /// Build state around any synthesizer backend.
    pub fn with_factory(config: TtsConfig, factory: Arc<dyn SynthesizerFactory>) -> Arc<Self> {
        let config = Arc::new(config);
        Arc::new(Self {
            tts: TtsCommand::new(config.clone(), factory),
            config,
        })
    }
}
