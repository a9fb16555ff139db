#![forbid(unsafe_code)]

use thiserror::Error;

/// Catalog errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("no catalog record with id {id:?}")]
    NotFound { id: String },
}

pub type CatalogResult<T> = Result<T, CatalogError>;
