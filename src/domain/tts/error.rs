/// Longest response body excerpt carried by an HTTP error
pub const MAX_ERROR_BODY_CHARS: usize = 500;

#[derive(Debug, Clone, thiserror::Error)]
pub enum TtsError {
    #[error("TTS API error {status}: {body}")]
    Http { status: u16, body: String },
    #[error("transport error: {0}")]
    Transport(String),
}

impl TtsError {
    /// Build an HTTP error, keeping at most `MAX_ERROR_BODY_CHARS` characters of the body
    pub fn http(status: u16, body: &str) -> Self {
        TtsError::Http {
            status,
            body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
        }
    }
}

impl From<reqwest::Error> for TtsError {
    fn from(err: reqwest::Error) -> Self {
        TtsError::Transport(err.to_string())
    }
}
