#![forbid(unsafe_code)]

use thiserror::Error;

/// Top-level pipeline error.
///
/// Everything below propagates here unchanged; the only local recovery
/// anywhere is the transport retry inside the fetch layer.
#[derive(Debug, Error)]
pub enum MoviolaError {
    #[error("manifest resolution failed: {0}")]
    Manifest(#[from] moviola_manifest::ManifestError),

    #[error("download failed: {0}")]
    Download(#[from] moviola_download::DownloadError),

    #[error("mux failed: {0}")]
    Mux(#[from] moviola_mux::MuxError),

    #[error("catalog operation failed: {0}")]
    Catalog(#[from] moviola_catalog::CatalogError),

    #[error("artifact write failed: {0}")]
    Artifact(#[from] std::io::Error),
}
