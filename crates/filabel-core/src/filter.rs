//! Pull request scoping by state and base branch.

use crate::model::{PullRequest, StateFilter};

/// Decides whether a pull request is in scope for labeling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullRequestFilter {
    /// Requested state.
    pub state: StateFilter,

    /// Required base branch. `None` or empty admits every base.
    pub base: Option<String>,
}

impl PullRequestFilter {
    /// Create a filter.
    #[must_use]
    pub fn new(state: StateFilter, base: Option<String>) -> Self {
        Self {
            state,
            base: base.filter(|b| !b.is_empty()),
        }
    }

    /// Check the state restriction alone.
    #[must_use]
    pub const fn matches_state(&self, pr: &PullRequest) -> bool {
        self.state.admits(pr.state)
    }

    /// Check the base branch restriction alone. Exact string equality.
    #[must_use]
    pub fn matches_base(&self, pr: &PullRequest) -> bool {
        match self.base.as_deref() {
            None | Some("") => true,
            Some(base) => pr.base_ref == base,
        }
    }

    /// Check if the pull request passes both restrictions.
    #[must_use]
    pub fn is_in_scope(&self, pr: &PullRequest) -> bool {
        self.matches_state(pr) && self.matches_base(pr)
    }
}
