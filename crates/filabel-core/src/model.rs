//! Domain types for pull requests and their changed files.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexSet;

use crate::error::Error;

/// A pull request as seen by the labeler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    /// PR number.
    pub number: u64,

    /// Browser URL of the PR.
    pub url: String,

    /// PR state.
    pub state: PullRequestState,

    /// Base (target) branch name.
    pub base_ref: String,

    /// SHA of the head commit.
    pub head_sha: String,

    /// Labels currently on the PR, in API order.
    pub labels: IndexSet<String>,
}

/// State of a pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PullRequestState {
    /// PR is open.
    Open,
    /// PR is closed (merged or not).
    Closed,
}

/// Which pull requests to consider, by state.
///
/// `All` is a filter value, not a state a pull request can be in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StateFilter {
    /// Only open PRs.
    #[default]
    Open,
    /// Only closed PRs.
    Closed,
    /// Any PR.
    All,
}

impl StateFilter {
    /// Value used for the `state` query parameter of the pulls endpoint.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::All => "all",
        }
    }

    /// Check if a pull request in `state` passes this filter.
    #[must_use]
    pub const fn admits(self, state: PullRequestState) -> bool {
        matches!(
            (self, state),
            (Self::All, _)
                | (Self::Open, PullRequestState::Open)
                | (Self::Closed, PullRequestState::Closed)
        )
    }
}

impl fmt::Display for StateFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StateFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            "all" => Ok(Self::All),
            other => Err(Error::InvalidState(other.to_string())),
        }
    }
}

/// A file touched by a pull request's head commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedFile {
    /// Path relative to the repository root.
    pub filename: String,

    /// What happened to the file.
    pub status: FileStatus,
}

impl ChangedFile {
    /// Create a changed file entry.
    #[must_use]
    pub fn new(filename: impl Into<String>, status: FileStatus) -> Self {
        Self {
            filename: filename.into(),
            status,
        }
    }
}

/// Change status of a file as reported by GitHub.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FileStatus {
    Added,
    Modified,
    Removed,
    Renamed,
    Copied,
    Changed,
    Unchanged,
    /// A status this version does not know about.
    Other(String),
}

impl FileStatus {
    /// The status string used by the API.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Added => "added",
            Self::Modified => "modified",
            Self::Removed => "removed",
            Self::Renamed => "renamed",
            Self::Copied => "copied",
            Self::Changed => "changed",
            Self::Unchanged => "unchanged",
            Self::Other(s) => s.as_str(),
        }
    }
}

impl From<&str> for FileStatus {
    fn from(s: &str) -> Self {
        match s {
            "added" => Self::Added,
            "modified" => Self::Modified,
            "removed" => Self::Removed,
            "renamed" => Self::Renamed,
            "copied" => Self::Copied,
            "changed" => Self::Changed,
            "unchanged" => Self::Unchanged,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
