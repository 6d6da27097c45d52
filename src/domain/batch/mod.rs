pub mod guard;
pub mod outcome;
pub mod scheduler;
pub mod service;

pub use guard::OutputCacheGuard;
pub use outcome::{DroppedRow, RunReport, TaskError, TaskOutcome};
pub use scheduler::{RetryPolicy, SchedulerSettings, TaskScheduler};
pub use service::{load_input, BatchService};
