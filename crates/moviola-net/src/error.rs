use thiserror::Error;
use url::Url;

/// Centralized error type for moviola-net.
///
/// The split matters for retry semantics: `Transport` is the only variant the
/// retry layer acts on. A non-success HTTP status never becomes an error at
/// the fetch layer — [`crate::HttpResponse::into_success_body`] raises
/// `HttpStatus` on the caller's side.
#[derive(Debug, Error, Clone)]
pub enum NetError {
    #[error("transport failure for {url}: {message}")]
    Transport { url: Url, message: String },
    #[error("HTTP {status} for URL: {url}")]
    HttpStatus { status: u16, url: Url },
}

impl NetError {
    pub fn transport(url: Url, message: impl Into<String>) -> Self {
        Self::Transport {
            url,
            message: message.into(),
        }
    }

    pub fn http_status(status: u16, url: Url) -> Self {
        Self::HttpStatus { status, url }
    }

    /// Whether the retry layer may act on this error.
    pub fn is_retryable(&self) -> bool {
        matches!(self, NetError::Transport { .. })
    }

    /// Gets the HTTP status code if this is an HTTP status error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            NetError::HttpStatus { status, .. } => Some(*status),
            NetError::Transport { .. } => None,
        }
    }
}

pub type NetResult<T> = Result<T, NetError>;
