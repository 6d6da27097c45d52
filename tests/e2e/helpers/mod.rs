use anyhow::Result;
use phrase_tts::domain::batch::{BatchService, RetryPolicy, RunReport, SchedulerSettings};
use phrase_tts::domain::phrase::TextSource;
use phrase_tts::domain::tts::{AudioFormat, VoiceConfig};
use phrase_tts::infrastructure::storage::AudioStore;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

pub mod fake_tts;

pub use fake_tts::FakeTtsRepository;

/// Scratch workspace with an input CSV path, an output directory and a fake
/// TTS provider shared by every service built from it
pub struct TestContext {
    pub tts: Arc<FakeTtsRepository>,
    pub csv_path: PathBuf,
    pub out_dir: PathBuf,
    _dir: TempDir,
}

impl TestContext {
    pub fn new() -> Result<Self> {
        Self::with_repo(FakeTtsRepository::new())
    }

    pub fn with_repo(tts: FakeTtsRepository) -> Result<Self> {
        let dir = tempfile::tempdir()?;
        Ok(Self {
            tts: Arc::new(tts),
            csv_path: dir.path().join("phrases.csv"),
            out_dir: dir.path().join("audio"),
            _dir: dir,
        })
    }

    pub fn write_csv(&self, contents: &str) -> Result<()> {
        std::fs::write(&self.csv_path, contents)?;
        Ok(())
    }

    pub fn service(&self, source: TextSource, concurrency: usize) -> BatchService {
        let settings = SchedulerSettings {
            concurrency,
            call_delay: Duration::from_millis(1),
            retry: RetryPolicy::single_retry(Duration::from_millis(5)),
        };
        BatchService::new(
            self.tts.clone(),
            source.extractor(),
            Arc::new(AudioStore::new(&self.out_dir, AudioFormat::Mp3)),
            VoiceConfig::default(),
            settings,
        )
    }

    pub async fn run(&self, source: TextSource, concurrency: usize) -> Result<RunReport> {
        Ok(self.service(source, concurrency).run_file(&self.csv_path).await?)
    }

    pub fn artifact(&self, key: &str) -> PathBuf {
        self.out_dir.join(format!("{}.mp3", key))
    }

    /// Keys of every non-empty `.mp3` in the output directory, sorted
    pub fn artifact_keys(&self) -> Vec<String> {
        artifact_keys(&self.out_dir)
    }
}

fn artifact_keys(dir: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut keys: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "mp3"))
        .filter(|path| std::fs::metadata(path).map(|m| m.len() > 0).unwrap_or(false))
        .filter_map(|path| path.file_stem().map(|stem| stem.to_string_lossy().into_owned()))
        .collect();
    keys.sort();
    keys
}
