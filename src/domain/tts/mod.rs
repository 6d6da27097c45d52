pub mod error;
pub mod voice;

pub use error::TtsError;
pub use voice::{AudioFormat, VoiceConfig};
