//! CLI definition and handlers.

use std::path::PathBuf;

use clap::Parser;
use filabel_core::{SettingsArgs, StateFilter};
use filabel_github::GitHubClient;

pub mod label;

/// CLI tool for filename-pattern-based labeling of GitHub PRs.
///
/// Matches the files changed by each pull request against the glob
/// patterns of the labels configuration and updates the PR labels.
#[derive(Parser, Debug)]
#[command(name = "filabel")]
#[command(author, version, long_about = None)]
#[command(about = "CLI tool for filename-pattern-based labeling of GitHub PRs")]
pub struct Cli {
    /// Filter pulls by state: open, closed or all.
    #[arg(short, long, value_name = "STATE", default_value_t = StateFilter::Open)]
    pub state: StateFilter,

    /// Delete labels that do not match anymore. [default]
    #[arg(short = 'd', long, overrides_with = "no_delete_old")]
    pub delete_old: bool,

    /// Keep labels that do not match anymore.
    #[arg(short = 'D', long, overrides_with = "delete_old")]
    pub no_delete_old: bool,

    /// Filter pulls by base (PR target) branch name.
    #[arg(short, long, value_name = "BRANCH")]
    pub base: Option<String>,

    /// File with authorization configuration.
    #[arg(short = 'a', long, value_name = "FILENAME")]
    pub config_auth: Option<PathBuf>,

    /// File with labels configuration.
    #[arg(short = 'l', long, value_name = "FILENAME")]
    pub config_labels: Option<PathBuf>,

    /// GitHub API URL.
    #[arg(
        long,
        env = "FILABEL_API_URL",
        default_value = GitHubClient::DEFAULT_API_URL,
        hide = true
    )]
    pub api_url: String,

    /// Repositories to label, as owner/name.
    #[arg(value_name = "REPOSLUGS", required = true)]
    pub reposlugs: Vec<String>,
}

impl Cli {
    /// Whether rule-governed labels are stripped. On unless `-D` is last.
    #[must_use]
    pub const fn delete_old(&self) -> bool {
        !self.no_delete_old
    }

    /// Unvalidated settings for [`filabel_core::Settings::from_args`].
    #[must_use]
    pub fn settings_args(&self) -> SettingsArgs {
        SettingsArgs {
            state: self.state,
            delete_old: self.delete_old(),
            base: self.base.clone(),
            config_auth: self.config_auth.clone(),
            config_labels: self.config_labels.clone(),
            reposlugs: self.reposlugs.clone(),
        }
    }
}
