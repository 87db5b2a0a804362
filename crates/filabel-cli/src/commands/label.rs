//! Label pull requests of the given repositories.
//!
//! For every repository:
//! 1. Looks up the repository (FAIL and move on if it is unavailable)
//! 2. Lists its pull requests with the requested state
//! 3. Skips pull requests of another state, fails those of another base
//! 4. Reconciles labels from the head commit's files and applies them

use anyhow::{Context, Result};
use filabel_core::{MatchEntry, PullRequest, Reposlug, Settings, reconcile};
use filabel_github::{Auth, GitHubClient};

use crate::commands::Cli;
use crate::output;

/// Outcome of processing a repository or a pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ok,
    Fail,
}

/// Report for one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoReport {
    pub slug: String,
    pub outcome: Outcome,
    pub pulls: Vec<PrReport>,
}

/// Report for one pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrReport {
    pub url: String,
    pub outcome: Outcome,
    pub matches: Vec<MatchEntry>,
}

impl RepoReport {
    fn failed(slug: &Reposlug) -> Self {
        Self {
            slug: slug.to_string(),
            outcome: Outcome::Fail,
            pulls: Vec::new(),
        }
    }
}

impl PrReport {
    fn failed(pr: &PullRequest) -> Self {
        Self {
            url: pr.url.clone(),
            outcome: Outcome::Fail,
            matches: Vec::new(),
        }
    }
}

/// Run the labeler.
pub fn run(cli: &Cli) -> Result<()> {
    let settings = Settings::from_args(cli.settings_args()).inspect_err(|e| {
        if let Some(reason) = e.reason() {
            tracing::debug!(reason, "configuration rejected");
        }
    })?;

    let auth = Auth::token(settings.token.clone());
    let client = GitHubClient::with_base_url(&auth, cli.api_url.as_str())
        .context("Failed to set up GitHub client")?;
    let rt = tokio::runtime::Runtime::new()?;

    let reports = rt.block_on(walk(&client, &settings));

    for report in &reports {
        for line in output::report_lines(report) {
            output::essential(&line);
        }
    }

    Ok(())
}

/// Process every repository in order, one request at a time.
pub async fn walk(client: &GitHubClient, settings: &Settings) -> Vec<RepoReport> {
    let mut reports = Vec::with_capacity(settings.reposlugs.len());
    for slug in &settings.reposlugs {
        reports.push(walk_repo(client, settings, slug).await);
    }
    reports
}

async fn walk_repo(client: &GitHubClient, settings: &Settings, slug: &Reposlug) -> RepoReport {
    if let Err(e) = client.get_repo(slug).await {
        tracing::warn!(repo = %slug, error = %e, "repository unavailable");
        return RepoReport::failed(slug);
    }

    let prs = match client.list_pulls(slug, settings.filter.state).await {
        Ok(prs) => prs,
        Err(e) => {
            tracing::warn!(repo = %slug, error = %e, "could not list pull requests");
            return RepoReport::failed(slug);
        }
    };

    let mut pulls = Vec::new();
    for pr in &prs {
        if !settings.filter.matches_state(pr) {
            tracing::debug!(pr = %pr.url, state = ?pr.state, "skipping pull request");
            continue;
        }

        if !settings.filter.matches_base(pr) {
            tracing::debug!(pr = %pr.url, base = %pr.base_ref, "base branch does not match");
            pulls.push(PrReport::failed(pr));
            continue;
        }

        pulls.push(label_pr(client, settings, slug, pr).await);
    }

    RepoReport {
        slug: slug.to_string(),
        outcome: Outcome::Ok,
        pulls,
    }
}

async fn label_pr(
    client: &GitHubClient,
    settings: &Settings,
    slug: &Reposlug,
    pr: &PullRequest,
) -> PrReport {
    // Delete-old never scans files, so the commit is not fetched.
    let files = if settings.delete_old {
        Vec::new()
    } else {
        match client.get_commit_files(slug, &pr.head_sha).await {
            Ok(files) => files,
            Err(e) => {
                tracing::warn!(pr = %pr.url, error = %e, "could not fetch changed files");
                return PrReport::failed(pr);
            }
        }
    };

    let result = reconcile(&pr.labels, &files, &settings.rules, settings.delete_old);

    match client.set_labels(slug, pr.number, result.label_list()).await {
        Ok(()) => PrReport {
            url: pr.url.clone(),
            outcome: Outcome::Ok,
            matches: result.matches,
        },
        Err(e) => {
            tracing::warn!(pr = %pr.url, error = %e, "label update rejected");
            PrReport::failed(pr)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use filabel_core::{FileStatus, LabelRule, PullRequestFilter, RuleSet, StateFilter};
    use secrecy::SecretString;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn settings(slugs: &[&str], filter: PullRequestFilter, delete_old: bool) -> Settings {
        let rules: RuleSet = [
            LabelRule::new("*.py", "python").unwrap(),
            LabelRule::new("*.md", "docs").unwrap(),
        ]
        .into_iter()
        .collect();

        Settings {
            token: SecretString::from("t0ken".to_string()),
            rules,
            reposlugs: slugs.iter().map(|s| Reposlug::new(*s).unwrap()).collect(),
            filter,
            delete_old,
        }
    }

    fn client(server: &MockServer) -> GitHubClient {
        let auth = Auth::token(SecretString::from("t0ken".to_string()));
        GitHubClient::with_base_url(&auth, server.uri()).unwrap()
    }

    fn pr_json(repo: &str, number: u64, state: &str, base: &str, labels: &[&str]) -> serde_json::Value {
        json!({
            "number": number,
            "html_url": format!("https://github.com/{repo}/pull/{number}"),
            "state": state,
            "head": { "ref": "feature", "sha": format!("sha{number}") },
            "base": { "ref": base },
            "labels": labels.iter().map(|l| json!({ "name": l })).collect::<Vec<_>>(),
        })
    }

    async fn mount_repo(server: &MockServer, repo: &str, pulls: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(format!("/repos/{repo}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "full_name": repo,
                "html_url": format!("https://github.com/{repo}"),
            })))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("/repos/{repo}/pulls")))
            .respond_with(ResponseTemplate::new(200).set_body_json(pulls))
            .mount(server)
            .await;
    }

    async fn mount_files(server: &MockServer, repo: &str, sha: &str, files: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(format!("/repos/{repo}/commits/{sha}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "files": files })))
            .mount(server)
            .await;
    }

    fn labels_response(labels: &[&str]) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "labels": labels.iter().map(|l| json!({ "name": l })).collect::<Vec<_>>(),
        }))
    }

    #[tokio::test]
    async fn test_labels_matching_files() {
        let server = MockServer::start().await;
        mount_repo(&server, "o/r", json!([pr_json("o/r", 1, "open", "main", &["bug"])])).await;
        mount_files(
            &server,
            "o/r",
            "sha1",
            json!([
                { "filename": "a.py", "status": "added" },
                { "filename": "README.md", "status": "modified" },
                { "filename": "Makefile", "status": "removed" },
            ]),
        )
        .await;
        Mock::given(method("POST"))
            .and(path("/repos/o/r/issues/1"))
            .and(body_json(json!({ "labels": ["bug", "python", "docs"] })))
            .respond_with(labels_response(&["bug", "python", "docs"]))
            .expect(1)
            .mount(&server)
            .await;

        let settings = settings(&["o/r"], PullRequestFilter::default(), false);
        let reports = walk(&client(&server), &settings).await;

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].outcome, Outcome::Ok);
        let pr = &reports[0].pulls[0];
        assert_eq!(pr.url, "https://github.com/o/r/pull/1");
        assert_eq!(pr.outcome, Outcome::Ok);
        let matched: Vec<_> = pr
            .matches
            .iter()
            .map(|m| (m.label.as_str(), m.filename.as_str(), m.status.clone()))
            .collect();
        assert_eq!(
            matched,
            vec![
                ("python", "a.py", FileStatus::Added),
                ("docs", "README.md", FileStatus::Modified),
            ]
        );
    }

    #[tokio::test]
    async fn test_delete_old_strips_rule_labels() {
        let server = MockServer::start().await;
        mount_repo(
            &server,
            "o/r",
            json!([pr_json("o/r", 2, "open", "main", &["python", "bug"])]),
        )
        .await;
        Mock::given(method("GET"))
            .and(path("/repos/o/r/commits/sha2"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/repos/o/r/issues/2"))
            .and(body_json(json!({ "labels": ["bug"] })))
            .respond_with(labels_response(&["bug"]))
            .expect(1)
            .mount(&server)
            .await;

        let settings = settings(&["o/r"], PullRequestFilter::default(), true);
        let reports = walk(&client(&server), &settings).await;

        let pr = &reports[0].pulls[0];
        assert_eq!(pr.outcome, Outcome::Ok);
        assert!(pr.matches.is_empty());
    }

    #[tokio::test]
    async fn test_base_mismatch_fails_without_update() {
        let server = MockServer::start().await;
        mount_repo(
            &server,
            "o/r",
            json!([
                pr_json("o/r", 1, "open", "feature", &[]),
                pr_json("o/r", 2, "open", "main", &[]),
            ]),
        )
        .await;
        mount_files(&server, "o/r", "sha2", json!([])).await;
        Mock::given(method("POST"))
            .and(path("/repos/o/r/issues/1"))
            .respond_with(labels_response(&[]))
            .expect(0)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/repos/o/r/issues/2"))
            .respond_with(labels_response(&[]))
            .expect(1)
            .mount(&server)
            .await;

        let filter = PullRequestFilter::new(StateFilter::Open, Some("main".to_string()));
        let reports = walk(&client(&server), &settings(&["o/r"], filter, false)).await;

        let outcomes: Vec<_> = reports[0].pulls.iter().map(|p| p.outcome).collect();
        assert_eq!(outcomes, vec![Outcome::Fail, Outcome::Ok]);
    }

    #[tokio::test]
    async fn test_other_state_skipped_silently() {
        let server = MockServer::start().await;
        mount_repo(
            &server,
            "o/r",
            json!([pr_json("o/r", 3, "closed", "main", &[])]),
        )
        .await;
        Mock::given(method("POST"))
            .respond_with(labels_response(&[]))
            .expect(0)
            .mount(&server)
            .await;

        let reports = walk(&client(&server), &settings(&["o/r"], PullRequestFilter::default(), false)).await;

        assert_eq!(reports[0].outcome, Outcome::Ok);
        assert!(reports[0].pulls.is_empty());
    }

    #[tokio::test]
    async fn test_missing_repo_fails_and_continues() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/o/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        mount_repo(&server, "o/r", json!([])).await;

        let reports = walk(
            &client(&server),
            &settings(&["o/missing", "o/r"], PullRequestFilter::default(), false),
        )
        .await;

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].slug, "o/missing");
        assert_eq!(reports[0].outcome, Outcome::Fail);
        assert_eq!(reports[1].slug, "o/r");
        assert_eq!(reports[1].outcome, Outcome::Ok);
    }

    #[tokio::test]
    async fn test_rejected_update_fails_pr_only() {
        let server = MockServer::start().await;
        mount_repo(
            &server,
            "o/r",
            json!([
                pr_json("o/r", 1, "open", "main", &[]),
                pr_json("o/r", 2, "open", "main", &[]),
            ]),
        )
        .await;
        mount_files(&server, "o/r", "sha1", json!([])).await;
        mount_files(&server, "o/r", "sha2", json!([])).await;
        Mock::given(method("POST"))
            .and(path("/repos/o/r/issues/1"))
            .respond_with(ResponseTemplate::new(422).set_body_string("Validation Failed"))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/repos/o/r/issues/2"))
            .respond_with(labels_response(&[]))
            .mount(&server)
            .await;

        let reports = walk(&client(&server), &settings(&["o/r"], PullRequestFilter::default(), false)).await;

        let outcomes: Vec<_> = reports[0].pulls.iter().map(|p| p.outcome).collect();
        assert_eq!(outcomes, vec![Outcome::Fail, Outcome::Ok]);
    }

    #[tokio::test]
    async fn test_requested_state_sent_to_api() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/o/r"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "full_name": "o/r",
                "html_url": "https://github.com/o/r",
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/o/r/pulls"))
            .and(query_param("state", "closed"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let filter = PullRequestFilter::new(StateFilter::Closed, None);
        let reports = walk(&client(&server), &settings(&["o/r"], filter, true)).await;
        assert_eq!(reports[0].outcome, Outcome::Ok);
    }
}
