//! `tts` option parsing and resolution.
//!
//! Leading option tokens are handed to clap; everything after the first
//! non-option token is the message and is kept verbatim, so inline SSML,
//! apostrophes and repeated spaces reach the request builder untouched.

use clap::{Command, CommandFactory, FromArgMatches, Parser};

use crate::config::TtsConfig;
use crate::core::tts::azure::SynthesisRequest;

pub const LANGUAGE_SUPPORT_URL: &str = "https://learn.microsoft.com/zh-cn/azure/cognitive-services/speech-service/language-support?tabs=tts#supported-languages";

pub const USAGE_EXAMPLE: &str = "tts -l en-US -v en-US-AshleyNeural -r 1 -p 1.52 gymbag";

/// Options that consume the following token as their value.
const VALUE_OPTIONS: &[&str] = &[
    "-l", "--lang", "-v", "--voice", "-r", "--rate", "-p", "--pitch",
];

/// Text to speech with Azure Speech
#[derive(Parser, Debug, Clone, Default, PartialEq)]
#[command(
    name = "tts",
    disable_version_flag = true,
    override_usage = "tts [-l <LANG>] [-v <VOICE>] [-r <RATE>] [-p <PITCH>] <MESSAGE...>"
)]
pub struct TtsArgs {
    /// Language of the input text, e.g. en-US
    #[arg(short = 'l', long = "lang", value_name = "LANG")]
    pub lang: Option<String>,

    /// Voice name, e.g. en-US-AshleyNeural
    #[arg(short = 'v', long = "voice", value_name = "VOICE")]
    pub voice: Option<String>,

    /// Speaking rate multiplier, 1 is normal speed
    #[arg(short = 'r', long = "rate", value_name = "RATE", allow_negative_numbers = true)]
    pub rate: Option<f64>,

    /// Pitch multiplier, 1 is the voice's normal pitch
    #[arg(short = 'p', long = "pitch", value_name = "PITCH", allow_negative_numbers = true)]
    pub pitch: Option<f64>,

    /// Text to speak
    #[arg(value_name = "MESSAGE")]
    pub message: Option<String>,
}

impl TtsArgs {
    /// Parse everything after the `tts` command name.
    pub fn parse_line(input: &str) -> Result<Self, clap::Error> {
        let (options, message) = split_options(input);

        let mut argv = Vec::with_capacity(options.len() + 3);
        argv.push("tts");
        argv.extend(options);
        if !message.is_empty() {
            argv.push("--");
            argv.push(message);
        }

        let matches = command().try_get_matches_from(argv)?;
        Self::from_arg_matches(&matches)
    }

    /// The message, or `None` when it is missing or blank.
    pub fn text(&self) -> Option<&str> {
        self.message
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }

    /// Fill omitted options from `config`.
    ///
    /// Returns `None` when there is nothing to say.
    pub fn resolve(&self, config: &TtsConfig) -> Option<SynthesisRequest> {
        let text = self.text()?;
        Some(SynthesisRequest {
            text: text.to_string(),
            lang: self
                .lang
                .clone()
                .unwrap_or_else(|| config.default_lang.clone()),
            voice: self
                .voice
                .clone()
                .unwrap_or_else(|| config.default_voice_name.clone()),
            rate: self.rate.unwrap_or(config.default_rate),
            pitch: self.pitch.unwrap_or(config.default_pitch),
        })
    }
}

/// Usage text shown for `help tts`, `tts -h` and empty invocations.
pub fn help_text() -> String {
    command().render_help().to_string()
}

/// Whether `input` carries any text after its leading options.
pub(crate) fn has_message(input: &str) -> bool {
    !split_options(input).1.is_empty()
}

fn command() -> Command {
    TtsArgs::command().after_help(format!(
        "Supported languages and voices: {LANGUAGE_SUPPORT_URL}\n\nExample:\n  {USAGE_EXAMPLE}"
    ))
}

/// Split `input` into leading option tokens and the verbatim remainder.
fn split_options(input: &str) -> (Vec<&str>, &str) {
    let mut options = Vec::new();
    let mut rest = input.trim_start();
    let mut expects_value = false;

    while let Some(token) = rest.split_whitespace().next() {
        if expects_value {
            expects_value = false;
        } else if token == "--" {
            rest = rest[token.len()..].trim_start();
            break;
        } else if is_option(token) {
            expects_value = VALUE_OPTIONS.contains(&token);
        } else {
            break;
        }
        options.push(token);
        rest = rest[token.len()..].trim_start();
    }

    (options, rest.trim_end())
}

fn is_option(token: &str) -> bool {
    token.len() > 1 && token.starts_with('-') && token.parse::<f64>().is_err()
}
