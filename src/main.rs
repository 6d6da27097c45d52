use anyhow::Context;
use phrase_tts::domain::batch::{BatchService, RetryPolicy, RunReport, SchedulerSettings};
use phrase_tts::infrastructure::config::{Config, LogFormat};
use phrase_tts::infrastructure::repositories::OpenAiTtsRepository;
use phrase_tts::infrastructure::storage::AudioStore;
use phrase_tts::AppError;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    // Load configuration
    let config = match Config::from_env().context("Failed to load configuration") {
        Ok(config) => config,
        Err(err) => return fatal(err),
    };

    // Initialize logging
    init_logging(&config);

    match run(config).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => fatal(err),
    }
}

async fn run(config: Config) -> anyhow::Result<RunReport> {
    tracing::info!(
        input = %config.csv_path.display(),
        out_dir = %config.out_dir.display(),
        model = %config.voice.model,
        voice = %config.voice.voice,
        text_source = ?config.text_source,
        "Starting phrase-tts"
    );

    // === DEPENDENCY INJECTION SETUP ===
    let tts_repo = Arc::new(
        OpenAiTtsRepository::new(
            config.api_key.clone(),
            &config.api_base_url,
            config.request_timeout,
        )
        .map_err(AppError::from)
        .context("Failed to build HTTP client")?,
    );
    let store = Arc::new(AudioStore::new(config.out_dir.clone(), config.voice.format));
    let settings = SchedulerSettings {
        concurrency: config.concurrency,
        call_delay: config.call_delay,
        retry: RetryPolicy::single_retry(config.retry_backoff),
    };

    let service = BatchService::new(
        tts_repo,
        config.text_source.extractor(),
        store,
        config.voice.clone(),
        settings,
    );

    let report = service.run_file(&config.csv_path).await?;
    Ok(report)
}

/// Exit status for any run that aborts before finishing the batch
const FATAL_EXIT_STATUS: u8 = 1;

/// Print a fatal error (and a hint when one applies) to stderr
fn fatal(err: anyhow::Error) -> ExitCode {
    tracing::error!(error = %format!("{:#}", err), "Fatal");
    let (lines, status) = fatal_report(&err);
    for line in lines {
        eprintln!("{}", line);
    }
    ExitCode::from(status)
}

/// The stderr lines and exit status for a fatal error
fn fatal_report(err: &anyhow::Error) -> (Vec<String>, u8) {
    let mut lines = vec![format!("❌ Fatal: {:#}", err)];
    if let Some(hint) = err.downcast_ref::<AppError>().and_then(AppError::hint) {
        lines.push(hint);
    }
    (lines, FATAL_EXIT_STATUS)
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "phrase_tts=info".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "phrase_tts=info".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
