use bytes::Bytes;

/// The single message a command invocation sends back to the chat.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Text(String),
    /// Usage text for the command
    Help(String),
    Audio {
        data: Bytes,
        mime_type: &'static str,
    },
}

impl Reply {
    /// Text content of a `Text` or `Help` reply.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Reply::Text(text) | Reply::Help(text) => Some(text),
            Reply::Audio { .. } => None,
        }
    }
}
