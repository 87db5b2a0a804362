//! Authentication for the GitHub API.

use secrecy::{ExposeSecret, SecretString};

use crate::error::{Error, Result};

/// How the client authenticates.
#[derive(Debug)]
pub enum Auth {
    /// Personal access token, sent as `Authorization: token <value>`.
    Token(SecretString),
}

impl Auth {
    /// Token authentication.
    #[must_use]
    pub const fn token(token: SecretString) -> Self {
        Self::Token(token)
    }

    /// Resolve the credential into the header value payload.
    ///
    /// # Errors
    /// Returns [`Error::NoToken`] if the token is empty.
    pub fn resolve(&self) -> Result<String> {
        match self {
            Self::Token(token) => {
                let token = token.expose_secret().trim();
                if token.is_empty() {
                    return Err(Error::NoToken);
                }
                Ok(token.to_string())
            }
        }
    }
}
