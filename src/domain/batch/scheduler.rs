//! Bounded worker pool draining a fixed task list.
//!
//! Workers pop from one shared FIFO queue, so every task is handled by
//! exactly one worker, but completion order across workers is unspecified.
//! A task failure stays inside its worker: it is retried per the
//! [`RetryPolicy`], reported as [`TaskOutcome::Failed`], and the worker moves on.
//! Each task runs in its own tokio task, so a panic while handling it is
//! reported as that task's failure and the worker keeps draining the queue.

use super::outcome::{TaskError, TaskOutcome};
use crate::domain::phrase::Task;
use crate::domain::tts::VoiceConfig;
use crate::infrastructure::repositories::TtsRepository;
use crate::infrastructure::storage::AudioStore;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinSet;

/// Fixed retry policy: `max_attempts` calls in total, `backoff` between them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl RetryPolicy {
    /// One initial attempt plus one retry
    pub fn single_retry(backoff: Duration) -> Self {
        Self {
            max_attempts: 2,
            backoff,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::single_retry(Duration::from_millis(500))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerSettings {
    pub concurrency: usize,
    /// Pause after each task before the worker dequeues the next one
    pub call_delay: Duration,
    pub retry: RetryPolicy,
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            concurrency: 2,
            call_delay: Duration::from_millis(120),
            retry: RetryPolicy::default(),
        }
    }
}

type SharedQueue = Arc<Mutex<VecDeque<Task>>>;
type SharedOutcomes = Arc<Mutex<Vec<TaskOutcome>>>;

pub struct TaskScheduler {
    runner: Arc<TaskRunner>,
    settings: SchedulerSettings,
}

impl TaskScheduler {
    pub fn new(
        tts_repo: Arc<dyn TtsRepository>,
        store: Arc<AudioStore>,
        voice: VoiceConfig,
        settings: SchedulerSettings,
    ) -> Self {
        Self {
            runner: Arc::new(TaskRunner {
                tts_repo,
                store,
                voice,
                retry: settings.retry,
            }),
            settings,
        }
    }

    pub fn settings(&self) -> &SchedulerSettings {
        &self.settings
    }

    /// Drain `tasks` with `concurrency` workers and return one outcome per
    /// task, unordered. Never fails: task errors become `Failed` outcomes.
    pub async fn run(&self, tasks: Vec<Task>) -> Vec<TaskOutcome> {
        if tasks.is_empty() {
            return Vec::new();
        }

        let task_count = tasks.len();
        let queue: SharedQueue = Arc::new(Mutex::new(VecDeque::from(tasks)));
        let outcomes: SharedOutcomes = Arc::new(Mutex::new(Vec::with_capacity(task_count)));
        let worker_count = self.settings.concurrency.clamp(1, task_count);

        let mut workers = JoinSet::new();
        for id in 1..=worker_count {
            let worker = Worker {
                id,
                queue: queue.clone(),
                outcomes: outcomes.clone(),
                runner: self.runner.clone(),
                call_delay: self.settings.call_delay,
            };
            workers.spawn(worker.run());
        }

        while let Some(joined) = workers.join_next().await {
            if let Err(e) = joined {
                tracing::error!(error = %e, "Worker terminated abnormally");
            }
        }

        let mut outcomes = outcomes.lock().await;
        std::mem::take(&mut *outcomes)
    }
}

struct Worker {
    id: usize,
    queue: SharedQueue,
    outcomes: SharedOutcomes,
    runner: Arc<TaskRunner>,
    call_delay: Duration,
}

impl Worker {
    async fn run(self) {
        let mut handled = 0;

        loop {
            let next = self.queue.lock().await.pop_front();
            let Some(task) = next else {
                break;
            };

            let outcome = self.handle(task).await;
            self.outcomes.lock().await.push(outcome);
            handled += 1;

            tokio::time::sleep(self.call_delay).await;
        }

        tracing::debug!(worker = self.id, handled, "Worker finished");
    }

    async fn handle(&self, task: Task) -> TaskOutcome {
        let key = task.key.clone();
        let attempts = Arc::new(AtomicU32::new(0));

        let processed = tokio::spawn(self.runner.clone().process(self.id, task, attempts.clone())).await;

        match processed {
            Ok(outcome) => outcome,
            Err(e) => {
                let attempts = attempts.load(Ordering::SeqCst);
                tracing::error!(
                    worker = self.id,
                    key = %key,
                    error = %e,
                    attempts,
                    "task aborted"
                );
                TaskOutcome::Failed {
                    key,
                    attempts,
                    error: format!("task aborted: {}", e),
                }
            }
        }
    }
}

/// Runs the attempt loop for one task
struct TaskRunner {
    tts_repo: Arc<dyn TtsRepository>,
    store: Arc<AudioStore>,
    voice: VoiceConfig,
    retry: RetryPolicy,
}

impl TaskRunner {
    /// `attempts` is bumped before every call so the count survives a panic
    async fn process(self: Arc<Self>, worker: usize, task: Task, attempts: Arc<AtomicU32>) -> TaskOutcome {
        loop {
            let attempt = attempts.fetch_add(1, Ordering::SeqCst) + 1;

            match self.attempt(&task).await {
                Ok((path, bytes)) => {
                    tracing::info!(
                        worker,
                        key = %task.key,
                        path = %path.display(),
                        bytes,
                        attempt,
                        "saved"
                    );
                    return TaskOutcome::Succeeded {
                        key: task.key,
                        path,
                        attempts: attempt,
                        bytes,
                    };
                }
                Err(e) if attempt < self.retry.max_attempts => {
                    tracing::warn!(
                        worker,
                        key = %task.key,
                        error = %e,
                        attempt,
                        backoff_ms = self.retry.backoff.as_millis(),
                        "failed, retrying"
                    );
                    tokio::time::sleep(self.retry.backoff).await;
                }
                Err(e) => {
                    tracing::error!(
                        worker,
                        key = %task.key,
                        error = %e,
                        attempts = attempt,
                        "retry failed, giving up"
                    );
                    return TaskOutcome::Failed {
                        key: task.key,
                        attempts: attempt,
                        error: e.to_string(),
                    };
                }
            }
        }
    }

    /// One synthesis call followed by the artifact write
    async fn attempt(&self, task: &Task) -> Result<(PathBuf, usize), TaskError> {
        let audio = self.tts_repo.synthesize(&task.text, &self.voice).await?;
        if audio.is_empty() {
            return Err(TaskError::EmptyAudio);
        }

        let path = self
            .store
            .write(&task.key, &audio)
            .await
            .map_err(|source| TaskError::Write {
                path: self.store.path_for(&task.key),
                source,
            })?;

        Ok((path, audio.len()))
    }
}
