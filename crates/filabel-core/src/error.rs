//! Error types for filabel-core.

/// Result type alias using the core error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building the labeling configuration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The auth configuration file was not given.
    #[error("Auth configuration not supplied!")]
    AuthNotSupplied,

    /// The auth configuration file could not be read or lacks the token.
    #[error("Auth configuration not usable!")]
    AuthNotUsable {
        /// What was wrong with the file.
        reason: String,
    },

    /// The labels configuration file was not given.
    #[error("Labels configuration not supplied!")]
    LabelsNotSupplied,

    /// The labels configuration file could not be read or is malformed.
    #[error("Labels configuration not usable!")]
    LabelsNotUsable {
        /// What was wrong with the file.
        reason: String,
    },

    /// A repository slug is not of the form `owner/name`.
    #[error("Reposlug {0} not valid!")]
    InvalidReposlug(String),

    /// A glob pattern could not be compiled.
    #[error("invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Unknown pull request state filter.
    #[error("invalid state '{0}' (expected open, closed or all)")]
    InvalidState(String),
}

impl Error {
    /// The detail behind a configuration error, if any.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::AuthNotUsable { reason } | Self::LabelsNotUsable { reason } => Some(reason.as_str()),
            _ => None,
        }
    }
}
