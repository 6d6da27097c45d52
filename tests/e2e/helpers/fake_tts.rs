use async_trait::async_trait;
use parking_lot::Mutex;
use phrase_tts::domain::tts::{TtsError, VoiceConfig};
use phrase_tts::infrastructure::repositories::TtsRepository;
use std::collections::{HashMap, HashSet};
use std::time::Duration;

/// In-memory TTS provider that records every call.
///
/// Each text can be scripted to fail its first N calls with a 503, or to
/// panic inside the provider call. Successful calls return the UTF-8 bytes
/// of the text.
#[derive(Default)]
pub struct FakeTtsRepository {
    failures: Mutex<HashMap<String, u32>>,
    calls: Mutex<Vec<String>>,
    panics: Mutex<HashSet<String>>,
    latency: Duration,
}

impl FakeTtsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency,
            ..Self::default()
        }
    }

    /// Make the next `times` calls for `text` fail
    pub fn fail(&self, text: &str, times: u32) {
        self.failures.lock().insert(text.to_string(), times);
    }

    pub fn fail_always(&self, text: &str) {
        self.fail(text, u32::MAX);
    }

    /// Make every call for `text` panic
    pub fn panic_on(&self, text: &str) {
        self.panics.lock().insert(text.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn calls_for(&self, text: &str) -> usize {
        self.calls.lock().iter().filter(|t| *t == text).count()
    }
}

#[async_trait]
impl TtsRepository for FakeTtsRepository {
    async fn synthesize(&self, text: &str, _voice: &VoiceConfig) -> Result<Vec<u8>, TtsError> {
        self.calls.lock().push(text.to_string());

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        if self.panics.lock().contains(text) {
            panic!("fake provider crashed on {text:?}");
        }

        let should_fail = match self.failures.lock().get_mut(text) {
            Some(remaining) if *remaining > 0 => {
                *remaining -= 1;
                true
            }
            _ => false,
        };

        if should_fail {
            Err(TtsError::http(503, "Service Unavailable"))
        } else {
            Ok(text.as_bytes().to_vec())
        }
    }
}
