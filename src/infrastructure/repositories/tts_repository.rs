use crate::domain::tts::{TtsError, VoiceConfig};
use async_trait::async_trait;

/// Repository for TTS synthesis operations.
/// Abstracts the underlying TTS provider so the batch pipeline can run against
/// the OpenAI speech endpoint or a scripted fake.
///
/// Implementations perform exactly one provider call per invocation. Retries,
/// pacing and artifact handling belong to the caller.
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Synthesize `text` with the given voice parameters
    ///
    /// Returns the raw audio bytes in `voice.format`
    ///
    /// # Errors
    /// `TtsError::Http` for non-success responses (status + truncated body),
    /// `TtsError::Transport` when the request could not complete
    async fn synthesize(&self, text: &str, voice: &VoiceConfig) -> Result<Vec<u8>, TtsError>;
}
