//! Label reconciliation.
//!
//! Computes the labels a pull request should carry from its current labels,
//! its changed files and the rule set.
//!
//! Labels that no rule mentions are never touched. With `delete_old` set,
//! every rule-governed label is stripped and the changed files are not
//! scanned, so nothing is added back. Without it, existing labels are kept
//! and each matching rule adds its label.

use indexmap::IndexSet;

use crate::model::{ChangedFile, FileStatus};
use crate::rules::RuleSet;

/// Outcome of reconciling one pull request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// Labels to apply, existing labels first.
    pub labels: IndexSet<String>,

    /// Rule matches in file-then-rule order.
    pub matches: Vec<MatchEntry>,
}

/// One rule matching one changed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchEntry {
    /// Label implied by the match.
    pub label: String,

    /// Path of the matching file.
    pub filename: String,

    /// Change status of the file.
    pub status: FileStatus,
}

impl Reconciliation {
    /// Labels to send to the API.
    #[must_use]
    pub fn label_list(&self) -> Vec<String> {
        self.labels.iter().cloned().collect()
    }
}

/// Reconcile a pull request's labels with its changed files.
#[must_use]
pub fn reconcile(
    current: &IndexSet<String>,
    files: &[ChangedFile],
    rules: &RuleSet,
    delete_old: bool,
) -> Reconciliation {
    let mut labels = current.clone();

    if delete_old {
        for rule in rules {
            labels.shift_remove(rule.label.as_str());
        }
        return Reconciliation {
            labels,
            matches: Vec::new(),
        };
    }

    let mut matches = Vec::new();
    for file in files {
        for rule in rules {
            if rule.matches(&file.filename) {
                if !labels.contains(rule.label.as_str()) {
                    labels.insert(rule.label.clone());
                }
                matches.push(MatchEntry {
                    label: rule.label.clone(),
                    filename: file.filename.clone(),
                    status: file.status.clone(),
                });
            }
        }
    }

    Reconciliation { labels, matches }
}
