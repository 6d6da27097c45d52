use crate::domain::phrase::TextSource;
use crate::domain::tts::{AudioFormat, VoiceConfig};
use crate::error::{AppError, AppResult};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api_key: String,
    pub api_base_url: String,
    pub csv_path: PathBuf,
    pub out_dir: PathBuf,
    pub text_source: TextSource,
    pub voice: VoiceConfig,
    // Scheduling
    pub concurrency: usize,
    pub call_delay: Duration,
    pub retry_backoff: Duration,
    pub request_timeout: Duration,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let api_key = env::var(API_KEY_VAR)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(AppError::MissingCredential(API_KEY_VAR))?;

        let concurrency: usize = parse_var("TTS_CONCURRENCY", 2)?;
        if concurrency == 0 {
            return Err(AppError::InvalidConfig {
                name: "TTS_CONCURRENCY",
                value: concurrency.to_string(),
                reason: "at least one worker is required".to_string(),
            });
        }

        let speed: f32 = parse_var("TTS_SPEED", 0.95)?;
        if !(0.25..=4.0).contains(&speed) {
            return Err(AppError::InvalidConfig {
                name: "TTS_SPEED",
                value: speed.to_string(),
                reason: "must be between 0.25 and 4.0".to_string(),
            });
        }

        let config = Config {
            api_key,
            api_base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com".to_string()),
            csv_path: env::var("TTS_CSV_PATH")
                .unwrap_or_else(|_| "phrases.csv".to_string())
                .into(),
            out_dir: env::var("TTS_OUT_DIR")
                .unwrap_or_else(|_| "audio".to_string())
                .into(),
            text_source: parse_var("TTS_TEXT_SOURCE", TextSource::Secondary)?,
            voice: VoiceConfig {
                model: env::var("TTS_MODEL").unwrap_or_else(|_| "gpt-4o-mini-tts".to_string()),
                voice: env::var("TTS_VOICE").unwrap_or_else(|_| "alloy".to_string()),
                format: parse_var("TTS_FORMAT", AudioFormat::Mp3)?,
                speed,
                instructions: env::var("TTS_INSTRUCTIONS")
                    .ok()
                    .filter(|s| !s.trim().is_empty()),
            },
            concurrency,
            call_delay: Duration::from_millis(parse_var("TTS_CALL_DELAY_MS", 120)?),
            retry_backoff: Duration::from_millis(parse_var("TTS_RETRY_BACKOFF_MS", 500)?),
            request_timeout: Duration::from_secs(parse_var("TTS_REQUEST_TIMEOUT_SECS", 120)?),
            log_format: env::var("LOG_FORMAT")
                .map(|s| match s.to_lowercase().as_str() {
                    "json" => LogFormat::Json,
                    _ => LogFormat::Pretty,
                })
                .unwrap_or(LogFormat::Pretty),
        };

        Ok(config)
    }
}

/// Read `name` from the environment, falling back to `default` when unset.
/// A set but unparsable value is a configuration error, never silently defaulted.
fn parse_var<T>(name: &'static str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|e: T::Err| AppError::InvalidConfig {
            name,
            value: raw.clone(),
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}
