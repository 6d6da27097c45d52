use crate::domain::tts::AudioFormat;
use std::io;
use std::path::{Path, PathBuf};

/// Keyed audio artifacts on disk: `<dir>/<key>.<format>`
#[derive(Debug, Clone)]
pub struct AudioStore {
    dir: PathBuf,
    format: AudioFormat,
}

impl AudioStore {
    pub fn new(dir: impl Into<PathBuf>, format: AudioFormat) -> Self {
        Self {
            dir: dir.into(),
            format,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", key, self.format))
    }

    pub async fn ensure_dir(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await
    }

    /// True iff the artifact for `key` is a file with non-zero size
    pub async fn has_artifact(&self, key: &str) -> bool {
        match tokio::fs::metadata(self.path_for(key)).await {
            Ok(meta) => meta.is_file() && meta.len() > 0,
            Err(_) => false,
        }
    }

    /// Write the artifact for `key`, returning its final path.
    ///
    /// Bytes land in a sibling `.partial` file first and are renamed into place,
    /// so an interrupted write never leaves a non-empty artifact behind. On any
    /// failure the `.partial` file is removed.
    pub async fn write(&self, key: &str, audio: &[u8]) -> io::Result<PathBuf> {
        let path = self.path_for(key);
        let partial = self.partial_path_for(key);

        let written = async {
            tokio::fs::write(&partial, audio).await?;
            tokio::fs::rename(&partial, &path).await
        }
        .await;

        if let Err(e) = written {
            let _ = tokio::fs::remove_file(&partial).await;
            return Err(e);
        }

        Ok(path)
    }

    fn partial_path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!(".{}.{}.partial", key, self.format))
    }
}
