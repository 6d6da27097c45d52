use super::guard::OutputCacheGuard;
use super::outcome::{DroppedRow, RunReport};
use super::scheduler::{SchedulerSettings, TaskScheduler};
use crate::domain::phrase::{csv, strip_header, SkipReason, Task, TextExtractor};
use crate::domain::tts::VoiceConfig;
use crate::error::{AppError, AppResult};
use crate::infrastructure::repositories::TtsRepository;
use crate::infrastructure::storage::AudioStore;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

/// Drives one batch: parse → extract → filter → schedule → report
pub struct BatchService {
    extractor: Arc<dyn TextExtractor>,
    store: Arc<AudioStore>,
    guard: OutputCacheGuard,
    scheduler: TaskScheduler,
}

impl BatchService {
    pub fn new(
        tts_repo: Arc<dyn TtsRepository>,
        extractor: Arc<dyn TextExtractor>,
        store: Arc<AudioStore>,
        voice: VoiceConfig,
        settings: SchedulerSettings,
    ) -> Self {
        Self {
            extractor,
            guard: OutputCacheGuard::new(store.clone()),
            scheduler: TaskScheduler::new(tts_repo, store.clone(), voice, settings),
            store,
        }
    }

    /// Run the batch over the CSV file at `path`.
    ///
    /// # Errors
    /// Only input-level problems are errors: a missing, unreadable or empty
    /// file, or an output directory that cannot be created. Individual task
    /// failures are reported in the returned `RunReport`.
    pub async fn run_file(&self, path: &Path) -> AppResult<RunReport> {
        let text = load_input(path).await?;
        self.run(&text).await
    }

    pub async fn run(&self, csv_text: &str) -> AppResult<RunReport> {
        let rows = strip_header(csv::parse(csv_text));
        let rows_read = rows.len();

        let mut tasks: Vec<Task> = Vec::with_capacity(rows.len());
        let mut dropped = Vec::new();
        let mut seen_keys = HashSet::new();

        for row in rows {
            let extracted = self.extractor.extract(&row).and_then(|task| {
                if seen_keys.insert(task.key.clone()) {
                    Ok(task)
                } else {
                    Err(SkipReason::DuplicateKey(task.key))
                }
            });

            match extracted {
                Ok(task) => tasks.push(task),
                Err(reason) => {
                    tracing::warn!(
                        line = row.line,
                        reason = %reason,
                        row = ?row.fields,
                        "skip row"
                    );
                    dropped.push(DroppedRow {
                        line: row.line,
                        reason,
                    });
                }
            }
        }

        self.store
            .ensure_dir()
            .await
            .map_err(|source| AppError::OutputDir {
                path: self.store.dir().to_path_buf(),
                source,
            })?;

        let (pending, mut outcomes) = self.guard.filter(tasks).await;

        tracing::info!(
            tasks = pending.len(),
            cached = outcomes.len(),
            concurrency = self.scheduler.settings().concurrency,
            out_dir = %self.store.dir().display(),
            "Start"
        );

        outcomes.extend(self.scheduler.run(pending).await);

        let report = RunReport {
            rows_read,
            dropped,
            outcomes,
        };

        tracing::info!(
            requested = report.requested(),
            saved = report.succeeded(),
            cached = report.skipped(),
            failed = report.failed(),
            dropped_rows = report.dropped.len(),
            failed_keys = ?report.failed_keys(),
            out_dir = %self.store.dir().display(),
            "Done"
        );

        Ok(report)
    }
}

/// Read the whole input file; absence, read errors and blank content are fatal
pub async fn load_input(path: &Path) -> AppResult<String> {
    let text = match tokio::fs::read_to_string(path).await {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(AppError::InputNotFound(path.to_path_buf()))
        }
        Err(source) => {
            return Err(AppError::InputUnreadable {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    if text.trim().is_empty() {
        return Err(AppError::EmptyInput(path.to_path_buf()));
    }

    Ok(text)
}
