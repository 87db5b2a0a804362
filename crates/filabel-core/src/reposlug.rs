//! Repository slug validation and newtype.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A validated `owner/name` repository identifier.
///
/// # Examples
///
/// ```
/// use filabel_core::Reposlug;
///
/// let slug = Reposlug::new("rust-lang/rust").unwrap();
/// assert_eq!(slug.as_str(), "rust-lang/rust");
///
/// assert!(Reposlug::new("owner/").is_err());
/// assert!(Reposlug::new("a/b/c").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reposlug(String);

impl Reposlug {
    /// Parse and validate a reposlug.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidReposlug`] unless the input contains exactly
    /// one `/` with a non-empty owner and name around it.
    pub fn new(slug: impl Into<String>) -> Result<Self, Error> {
        let slug = slug.into();
        let mut parts = slug.split('/');
        let valid = matches!(
            (parts.next(), parts.next(), parts.next()),
            (Some(owner), Some(name), None) if !owner.is_empty() && !name.is_empty()
        );
        if !valid {
            return Err(Error::InvalidReposlug(slug));
        }
        Ok(Self(slug))
    }

    /// The full `owner/name` string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Reposlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Reposlug {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for Reposlug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
