//! Terminal output formatting utilities.

use std::collections::HashSet;

use colored::Colorize;
use filabel_core::FileStatus;

use crate::commands::label::{Outcome, PrReport, RepoReport};

/// Print an error message (always prints to stderr).
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print essential report output (always prints to stdout).
pub fn essential(msg: &str) {
    println!("{msg}");
}

/// Colored `OK` / `FAIL` marker.
#[must_use]
pub fn outcome(outcome: Outcome) -> String {
    match outcome {
        Outcome::Ok => "OK".green().to_string(),
        Outcome::Fail => "FAIL".red().to_string(),
    }
}

/// Change marker for a matched file: `+` added, `=` modified, `-` otherwise.
#[must_use]
pub fn file_marker(status: &FileStatus) -> String {
    match status {
        FileStatus::Added => "+".green().to_string(),
        FileStatus::Modified => "=".to_string(),
        _ => "-".red().to_string(),
    }
}

/// Lines for one repository: the repo line, one line per reported pull
/// request and, under successful pull requests, one line per matched file.
#[must_use]
pub fn report_lines(report: &RepoReport) -> Vec<String> {
    let mut lines = vec![format!(
        "{} {} - {}",
        "REPO".bold(),
        report.slug,
        outcome(report.outcome)
    )];

    for pr in &report.pulls {
        lines.extend(pr_lines(pr));
    }

    lines
}

fn pr_lines(pr: &PrReport) -> Vec<String> {
    let mut lines = vec![format!(
        "  {} {} - {}",
        "PR".bold(),
        pr.url,
        outcome(pr.outcome)
    )];

    if pr.outcome == Outcome::Ok {
        let mut seen = HashSet::new();
        for entry in &pr.matches {
            if seen.insert(entry.filename.as_str()) {
                lines.push(format!(
                    "    {} {}",
                    file_marker(&entry.status),
                    entry.filename
                ));
            }
        }
    }

    lines
}
