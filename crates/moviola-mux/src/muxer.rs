//! ffmpeg-backed copy muxer.

use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use moviola_download::ElementaryStream;
use tokio::process::Command;
use tracing::debug;

use crate::error::{MuxError, MuxResult};

/// Combines separate video and audio elementary streams into one container
/// file without re-encoding.
#[async_trait]
pub trait Muxer: Send + Sync {
    /// Copy-mux both streams into a single container.
    ///
    /// Codec-level problems are not this layer's to fix: tool failures come
    /// back verbatim.
    async fn copy_mux(
        &self,
        video: &ElementaryStream,
        audio: &ElementaryStream,
    ) -> MuxResult<Bytes>;
}

const VIDEO_INPUT: &str = "video.m4v";
const AUDIO_INPUT: &str = "audio.m4a";
const OUTPUT: &str = "output.mp4";

/// [`Muxer`] backed by an ffmpeg binary.
///
/// Streams are staged as files in a temporary directory and combined with
/// `-c copy` — stream copy only, no transcode.
#[derive(Debug, Clone)]
pub struct FfmpegMuxer {
    binary: PathBuf,
}

impl FfmpegMuxer {
    /// Uses `ffmpeg` from `PATH`.
    pub fn new() -> Self {
        Self {
            binary: PathBuf::from("ffmpeg"),
        }
    }

    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for FfmpegMuxer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Muxer for FfmpegMuxer {
    async fn copy_mux(
        &self,
        video: &ElementaryStream,
        audio: &ElementaryStream,
    ) -> MuxResult<Bytes> {
        let scratch = tempfile::tempdir()?;
        let video_path = scratch.path().join(VIDEO_INPUT);
        let audio_path = scratch.path().join(AUDIO_INPUT);
        let output_path = scratch.path().join(OUTPUT);

        tokio::fs::write(&video_path, &video.bytes).await?;
        tokio::fs::write(&audio_path, &audio.bytes).await?;

        debug!(
            binary = %self.binary.display(),
            video_bytes = video.len(),
            audio_bytes = audio.len(),
            "invoking copy mux"
        );

        let output = Command::new(&self.binary)
            .arg("-i")
            .arg(&video_path)
            .arg("-i")
            .arg(&audio_path)
            .args(["-c", "copy"])
            .arg(&output_path)
            .output()
            .await
            .map_err(|source| MuxError::Spawn {
                binary: self.binary.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(MuxError::Tool {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        let muxed = tokio::fs::read(&output_path).await?;
        debug!(output_bytes = muxed.len(), "copy mux complete");
        Ok(Bytes::from(muxed))
    }
}
