#![forbid(unsafe_code)]

use thiserror::Error;

/// Download pipeline errors.
///
/// Any failure is fatal to the whole track: there is no partial artifact and
/// no resume. Re-initiation is the caller's decision.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("init segment is not valid base64: {0}")]
    InitSegmentDecode(String),

    #[error("segment {index} download failed: {source}")]
    Segment {
        index: usize,
        #[source]
        source: moviola_net::NetError,
    },
}

pub type DownloadResult<T> = Result<T, DownloadError>;
