//! Error types for the GitHub client.

/// Result type alias using the GitHub error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by [`crate::GitHubClient`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Transport or decoding failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// No usable token was configured.
    #[error("no GitHub token configured")]
    NoToken,

    /// The token was rejected.
    #[error("GitHub authentication failed")]
    AuthenticationFailed,

    /// The requested resource does not exist (or is not visible).
    #[error("not found: {0}")]
    NotFound(String),

    /// The rate limit is exhausted.
    #[error("GitHub API rate limit exceeded")]
    RateLimited,

    /// Any other unsuccessful response.
    #[error("GitHub API error ({status}): {message}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Response body.
        message: String,
    },
}
