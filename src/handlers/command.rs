//! Chat command dispatch.
//!
//! `POST /command` takes the raw chat message as its body, the way a chat
//! framework would hand it to a command plugin:
//!
//! - `tts ...` runs the text-to-speech command
//! - `help` and `help tts` return its usage text
//! - anything else is `404 Not Found`

use std::sync::Arc;

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use http::{StatusCode, header};
use tracing::debug;

use crate::command::{Reply, help_text};
use crate::state::AppState;

const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

pub async fn command_handler(State(state): State<Arc<AppState>>, body: String) -> Response {
    let (name, rest) = split_command(&body);

    let reply = match name {
        "tts" => state.tts.execute(rest).await,
        "help" if matches!(rest.trim(), "" | "tts") => Reply::Help(help_text()),
        _ => {
            debug!(command = %name, "Unknown command");
            return (
                StatusCode::NOT_FOUND,
                [(header::CONTENT_TYPE, TEXT_CONTENT_TYPE)],
                format!("Unknown command: {}", name),
            )
                .into_response();
        }
    };

    render_reply(reply)
}

/// Turn a [`Reply`] into the HTTP response sent back to the chat.
pub fn render_reply(reply: Reply) -> Response {
    match reply {
        Reply::Text(text) | Reply::Help(text) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, TEXT_CONTENT_TYPE)],
            text,
        )
            .into_response(),
        Reply::Audio { data, mime_type } => {
            (StatusCode::OK, [(header::CONTENT_TYPE, mime_type)], data).into_response()
        }
    }
}

/// Split a message into the command name and the untouched remainder.
fn split_command(message: &str) -> (&str, &str) {
    let message = message.trim_start();
    match message.find(char::is_whitespace) {
        Some(idx) => (&message[..idx], &message[idx..]),
        None => (message.trim_end(), ""),
    }
}
