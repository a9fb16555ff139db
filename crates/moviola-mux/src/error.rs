#![forbid(unsafe_code)]

use std::path::PathBuf;

use thiserror::Error;

/// External muxing tool failures, surfaced to the caller unchanged.
#[derive(Debug, Error)]
pub enum MuxError {
    #[error("mux tool {binary:?} could not be started: {source}")]
    Spawn {
        binary: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("mux tool exited with code {code:?}: {stderr}")]
    Tool { code: Option<i32>, stderr: String },

    #[error("mux scratch I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

pub type MuxResult<T> = Result<T, MuxError>;
