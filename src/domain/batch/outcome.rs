use crate::domain::phrase::SkipReason;
use crate::domain::tts::TtsError;
use std::path::PathBuf;

/// Failure of a single attempt at a task
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error(transparent)]
    Synthesis(#[from] TtsError),
    #[error("empty audio response")]
    EmptyAudio,
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Final state of one task after the run
#[derive(Debug, Clone, PartialEq)]
pub enum TaskOutcome {
    /// Artifact written
    Succeeded {
        key: String,
        path: PathBuf,
        attempts: u32,
        bytes: usize,
    },
    /// A non-empty artifact already existed; the client was never called
    Skipped { key: String, path: PathBuf },
    /// Every attempt failed; `error` is the last one
    Failed {
        key: String,
        attempts: u32,
        error: String,
    },
}

impl TaskOutcome {
    pub fn key(&self) -> &str {
        match self {
            TaskOutcome::Succeeded { key, .. }
            | TaskOutcome::Skipped { key, .. }
            | TaskOutcome::Failed { key, .. } => key,
        }
    }

    pub fn is_succeeded(&self) -> bool {
        matches!(self, TaskOutcome::Succeeded { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, TaskOutcome::Skipped { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, TaskOutcome::Failed { .. })
    }
}

/// A row that never became a task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedRow {
    pub line: usize,
    pub reason: SkipReason,
}

/// Aggregated result of one batch run
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Data rows after header stripping
    pub rows_read: usize,
    pub dropped: Vec<DroppedRow>,
    /// One entry per task, in no particular order
    pub outcomes: Vec<TaskOutcome>,
}

impl RunReport {
    /// Tasks built from the input, cached or not
    pub fn requested(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_succeeded()).count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_skipped()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failed()).count()
    }

    pub fn failed_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .outcomes
            .iter()
            .filter(|o| o.is_failed())
            .map(TaskOutcome::key)
            .collect();
        keys.sort_unstable();
        keys
    }

    pub fn outcome_for(&self, key: &str) -> Option<&TaskOutcome> {
        self.outcomes.iter().find(|o| o.key() == key)
    }
}
