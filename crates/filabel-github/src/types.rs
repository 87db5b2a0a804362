//! GitHub API payloads.

use serde::{Deserialize, Serialize};

/// A label attached to an issue or pull request.
#[derive(Debug, Deserialize)]
pub(crate) struct Label {
    pub name: String,
}

/// Request replacing all labels of an issue or pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetLabels {
    /// The complete new label list.
    pub labels: Vec<String>,
}

/// Pull request as returned by the pulls endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiPullRequest {
    pub number: u64,
    pub html_url: String,
    pub state: String,
    pub head: ApiBranch,
    pub base: ApiBranch,
    #[serde(default)]
    pub labels: Vec<Label>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiBranch {
    #[serde(rename = "ref")]
    pub ref_name: String,
    #[serde(default)]
    pub sha: String,
}

/// Commit as returned by the commits endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiCommit {
    #[serde(default)]
    pub files: Vec<ApiFile>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiFile {
    pub filename: String,
    pub status: String,
}
