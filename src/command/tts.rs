use std::sync::Arc;

use tracing::{debug, info, warn};

use super::options::{TtsArgs, has_message, help_text};
use super::reply::Reply;
use crate::config::TtsConfig;
use crate::core::tts::azure::{AUDIO_MIME_TYPE, build_ssml};
use crate::core::tts::{SynthesisResult, SynthesizerFactory, TTSResult};

/// Sent when the service completes without producing any speech.
pub const NO_AUDIO_OUTPUT_MESSAGE: &str = "No audio output. Please check that the language of the input text matches the language of the voice.";

/// The `tts` chat command.
#[derive(Clone)]
pub struct TtsCommand {
    config: Arc<TtsConfig>,
    factory: Arc<dyn SynthesizerFactory>,
}

impl TtsCommand {
    pub fn new(config: Arc<TtsConfig>, factory: Arc<dyn SynthesizerFactory>) -> Self {
        Self { config, factory }
    }

    /// Description of the synthesis backend.
    pub fn provider_info(&self) -> serde_json::Value {
        self.factory.get_provider_info()
    }

    /// Parse the text after the command name and run it.
    ///
    /// Parse failures never reach the backend. Without a message they show
    /// the usage text, otherwise clap's error comes back as text.
    pub async fn execute(&self, line: &str) -> Reply {
        match TtsArgs::parse_line(line) {
            Ok(args) => self.invoke(&args).await,
            Err(e) if e.kind() == clap::error::ErrorKind::DisplayHelp => Reply::Help(help_text()),
            Err(_) if !has_message(line) => Reply::Help(help_text()),
            Err(e) => {
                debug!(error = %e, "Rejected tts options");
                Reply::Text(e.to_string().trim_end().to_string())
            }
        }
    }

    /// Run one synthesis and turn its outcome into exactly one reply.
    pub async fn invoke(&self, args: &TtsArgs) -> Reply {
        let Some(request) = args.resolve(&self.config) else {
            return Reply::Help(help_text());
        };

        let ssml = build_ssml(&request, self.config.escape_markup);
        info!(
            lang = %request.lang,
            voice = %request.voice,
            rate = request.rate,
            pitch = request.pitch,
            text_len = request.text.len(),
            "Synthesizing speech"
        );

        let mut synthesizer = match self.factory.create_synthesizer() {
            Ok(synthesizer) => synthesizer,
            Err(e) => {
                warn!(error = %e, "Failed to create synthesizer");
                return Reply::Text(e.to_string());
            }
        };

        let outcome = synthesizer.speak_ssml(&ssml).await;
        synthesizer.close().await;

        reply_for(outcome)
    }
}

fn reply_for(outcome: TTSResult<SynthesisResult>) -> Reply {
    match outcome {
        Ok(result) if result.is_completed() => {
            if result.audio_duration.is_zero() {
                warn!("Synthesis completed without audio");
                Reply::Text(NO_AUDIO_OUTPUT_MESSAGE.to_string())
            } else {
                Reply::Audio {
                    data: result.audio_data,
                    mime_type: AUDIO_MIME_TYPE,
                }
            }
        }
        Ok(result) => {
            warn!(reason = ?result.reason, details = %result.error_details, "Synthesis canceled");
            Reply::Text(result.error_details)
        }
        Err(e) => {
            warn!(error = %e, "Synthesis failed");
            Reply::Text(e.to_string())
        }
    }
}
