//! Chat commands.
//!
//! - **options**: `tts` option parsing and default resolution
//! - **reply**: the message sent back to the chat
//! - **tts**: the command itself

pub mod options;
pub mod reply;
pub mod tts;

pub use options::{LANGUAGE_SUPPORT_URL, TtsArgs, USAGE_EXAMPLE, help_text};
pub use reply::Reply;
pub use tts::{NO_AUDIO_OUTPUT_MESSAGE, TtsCommand};
