use super::tts_repository::TtsRepository;
use crate::domain::tts::{AudioFormat, TtsError, VoiceConfig};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

const SPEECH_PATH: &str = "/v1/audio/speech";

/// JSON body of POST /v1/audio/speech
#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    voice: &'a str,
    input: &'a str,
    response_format: AudioFormat,
    speed: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    instructions: Option<&'a str>,
}

/// OpenAI speech endpoint implementation of TTS repository
pub struct OpenAiTtsRepository {
    http_client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl OpenAiTtsRepository {
    pub fn new(api_key: String, base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), SPEECH_PATH),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl TtsRepository for OpenAiTtsRepository {
    async fn synthesize(&self, text: &str, voice: &VoiceConfig) -> Result<Vec<u8>, TtsError> {
        let start_time = std::time::Instant::now();

        tracing::debug!(
            model = %voice.model,
            voice = %voice.voice,
            format = %voice.format,
            text_length = text.chars().count(),
            "Calling OpenAI TTS API"
        );

        let request = SpeechRequest {
            model: &voice.model,
            voice: &voice.voice,
            input: text,
            response_format: voice.format,
            speed: voice.speed,
            instructions: voice.instructions.as_deref(),
        };

        let response = self
            .http_client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TtsError::http(status.as_u16(), &body));
        }

        let audio_bytes = response.bytes().await?.to_vec();

        tracing::debug!(
            provider = "openai",
            latency_ms = start_time.elapsed().as_millis(),
            audio_size_bytes = audio_bytes.len(),
            "OpenAI TTS audio received successfully"
        );

        Ok(audio_bytes)
    }
}
