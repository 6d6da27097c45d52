//! Batch text-to-speech for phrase sheets.
//!
//! Reads a CSV of phrases, derives one synthesis task per row, skips rows
//! whose audio already exists, and drains the rest through a small worker
//! pool that calls the speech API with pacing and a single retry.

pub mod domain;
pub mod error;
pub mod infrastructure;

pub use domain::batch::{BatchService, RunReport, TaskOutcome};
pub use error::{AppError, AppResult};
pub use infrastructure::config::Config;
