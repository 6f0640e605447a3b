pub mod command;
pub mod config;
pub mod core;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod utils;

// Re-export commonly used items for convenience
pub use command::{Reply, TtsArgs, TtsCommand};
pub use config::{ConfigError, TtsConfig};
pub use crate::core::*;
pub use state::AppState;
