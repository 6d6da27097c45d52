pub mod batch;
pub mod phrase;
pub mod tts;
