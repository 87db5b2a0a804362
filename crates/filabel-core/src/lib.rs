//! # filabel-core
//!
//! Core library for filabel providing the label rule set, glob matching,
//! pull request filtering and the label reconciler.

pub mod config;
pub mod error;
pub mod filter;
pub mod glob;
pub mod model;
pub mod reconcile;
pub mod reposlug;
pub mod rules;

pub use config::{Settings, SettingsArgs};
pub use error::{Error, Result};
pub use filter::PullRequestFilter;
pub use glob::Glob;
pub use model::{ChangedFile, FileStatus, PullRequest, PullRequestState, StateFilter};
pub use reconcile::{MatchEntry, Reconciliation, reconcile};
pub use reposlug::Reposlug;
pub use rules::{LabelRule, RuleSet};
