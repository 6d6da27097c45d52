use std::path::PathBuf;

/// Fatal, run-level errors. Anything that reaches `main` as an `AppError`
/// aborts the batch before any task is scheduled.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Missing credential: {0} is not set")]
    MissingCredential(&'static str),

    #[error("Invalid configuration: {name}={value:?} ({reason})")]
    InvalidConfig {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Input file {} could not be read: {source}", .path.display())]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Input file {} is empty", .0.display())]
    EmptyInput(PathBuf),

    #[error("Output directory {} could not be created: {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl AppError {
    /// Actionable guidance printed to stderr alongside the error, if any.
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::MissingCredential(name) => Some(format!(
                "Set it like:  export {}=\"sk-xxxx\"  (or add it to a .env file)",
                name
            )),
            Self::InputNotFound(_) => {
                Some("Place the CSV in the current directory or point TTS_CSV_PATH at it".to_string())
            }
            _ => None,
        }
    }
}

/// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;
