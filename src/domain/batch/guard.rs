use super::outcome::TaskOutcome;
use crate::domain::phrase::Task;
use crate::infrastructure::storage::AudioStore;
use std::sync::Arc;

/// Keeps already-produced artifacts out of the queue.
///
/// Checked once per task before scheduling. Two processes sharing an output
/// directory can still race; that case is not guarded.
pub struct OutputCacheGuard {
    store: Arc<AudioStore>,
}

impl OutputCacheGuard {
    pub fn new(store: Arc<AudioStore>) -> Self {
        Self { store }
    }

    pub async fn should_skip(&self, key: &str) -> bool {
        self.store.has_artifact(key).await
    }

    /// Split tasks into those still to synthesize and `Skipped` outcomes for
    /// those already on disk. Pending tasks keep their input order.
    pub async fn filter(&self, tasks: Vec<Task>) -> (Vec<Task>, Vec<TaskOutcome>) {
        let mut pending = Vec::with_capacity(tasks.len());
        let mut cached = Vec::new();

        for task in tasks {
            if self.should_skip(&task.key).await {
                let path = self.store.path_for(&task.key);
                tracing::info!(key = %task.key, path = %path.display(), "skip (exists)");
                cached.push(TaskOutcome::Skipped {
                    key: task.key,
                    path,
                });
            } else {
                pending.push(task);
            }
        }

        (pending, cached)
    }
}
