#![forbid(unsafe_code)]

use thiserror::Error;

/// Manifest resolution errors.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("manifest fetch failed: {0}")]
    Fetch(#[from] moviola_net::NetError),

    #[error("manifest parse error: {0}")]
    Parse(String),

    #[error("no eligible video representation (height ceiling: {max_height:?})")]
    NoEligibleRepresentation { max_height: Option<u32> },

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

pub type ManifestResult<T> = Result<T, ManifestError>;
