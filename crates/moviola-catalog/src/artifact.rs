//! Local artifact handoff.
//!
//! The final bytes land as a named file under a fixed downloads directory.
//! Artifacts past the single-shot threshold are written as a numbered
//! `<name>.chunk.<n>.<ext>` series instead.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use tracing::debug;

/// Artifacts larger than this become chunk files.
pub const DEFAULT_CHUNK_FILE_THRESHOLD: usize = 256 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    dir: PathBuf,
    chunk_threshold: usize,
}

impl ArtifactWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            chunk_threshold: DEFAULT_CHUNK_FILE_THRESHOLD,
        }
    }

    /// Set the size above which an artifact is split into chunk files.
    pub fn with_chunk_threshold(mut self, chunk_threshold: usize) -> Self {
        self.chunk_threshold = chunk_threshold;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes the artifact, returning every path produced.
    pub async fn write(
        &self,
        name: &str,
        ext: &str,
        bytes: &Bytes,
    ) -> std::io::Result<Vec<PathBuf>> {
        tokio::fs::create_dir_all(&self.dir).await?;

        if bytes.len() <= self.chunk_threshold {
            let path = self.dir.join(format!("{name}.{ext}"));
            tokio::fs::write(&path, bytes).await?;
            debug!(path = %path.display(), bytes = bytes.len(), "artifact written");
            return Ok(vec![path]);
        }

        let mut paths = Vec::new();
        for (n, chunk) in bytes.chunks(self.chunk_threshold).enumerate() {
            let path = self.dir.join(format!("{name}.chunk.{n}.{ext}"));
            tokio::fs::write(&path, chunk).await?;
            paths.push(path);
        }
        debug!(
            name,
            chunks = paths.len(),
            bytes = bytes.len(),
            "artifact written as chunk series"
        );
        Ok(paths)
    }
}
