//! # filabel-github
//!
//! GitHub API integration for filabel: repository lookup, pull request
//! listing, commit file listing and label updates.

mod auth;
mod client;
mod error;
mod types;

pub use auth::Auth;
pub use client::GitHubClient;
pub use error::{Error, Result};
pub use types::SetLabels;
