use thiserror::Error;

/// Failures surfaced by the repository layer.
///
/// The store collapses these into one message per operation; the variants
/// only matter to callers that need to distinguish a missing resource
/// (detail/edit views) from everything else.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("resource not found")]
    NotFound,
    #[error("request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),
    #[error("server returned status {code}")]
    Status { code: u16 },
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::Network(err)
        }
    }
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound)
    }
}

/// Result alias for repository operations.
pub type ApiResult<T> = Result<T, ApiError>;
