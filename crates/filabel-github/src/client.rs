//! GitHub API client.

use filabel_core::{ChangedFile, FileStatus, PullRequest, PullRequestState, Reposlug, StateFilter};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Client;
use serde::de::{DeserializeOwned, IgnoredAny};

use crate::auth::Auth;
use crate::error::{Error, Result};
use crate::types::{ApiCommit, ApiPullRequest, SetLabels};

/// GitHub API client.
pub struct GitHubClient {
    client: Client,
    base_url: String,
    token: String,
}

impl GitHubClient {
    /// Default GitHub API URL.
    pub const DEFAULT_API_URL: &'static str = "https://api.github.com";

    /// Create a new GitHub client.
    ///
    /// # Errors
    /// Returns error if authentication fails.
    pub fn new(auth: &Auth) -> Result<Self> {
        Self::with_base_url(auth, Self::DEFAULT_API_URL)
    }

    /// Create a new GitHub client with a custom API URL (for GitHub Enterprise).
    ///
    /// # Errors
    /// Returns error if authentication fails.
    pub fn with_base_url(auth: &Auth, base_url: impl Into<String>) -> Result<Self> {
        let token = auth.resolve()?;

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("filabel"));
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );

        let client = Client::builder().default_headers(headers).build()?;

        let base_url: String = base_url.into();
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Make a GET request.
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "GET");
        let response = self
            .client
            .get(&url)
            .header(AUTHORIZATION, format!("token {}", self.token))
            .send()
            .await?;

        Self::handle_response(response, path).await
    }

    /// Make a POST request.
    async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "POST");
        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, format!("token {}", self.token))
            .json(body)
            .send()
            .await?;

        Self::handle_response(response, path).await
    }

    /// Handle API response.
    async fn handle_response<T: DeserializeOwned>(
        response: reqwest::Response,
        path: &str,
    ) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            let body = response.json().await?;
            return Ok(body);
        }

        // Handle error responses
        let status_code = status.as_u16();
        tracing::debug!(status = status_code, path, "request failed");

        match status_code {
            401 => Err(Error::AuthenticationFailed),
            404 => Err(Error::NotFound(path.to_string())),
            403 if response
                .headers()
                .get("x-ratelimit-remaining")
                .is_some_and(|v| v == "0") =>
            {
                Err(Error::RateLimited)
            }
            _ => {
                let text = response.text().await.unwrap_or_default();
                Err(Error::ApiError {
                    status: status_code,
                    message: text,
                })
            }
        }
    }

    // === Repository Operations ===

    /// Check that a repository exists and is readable.
    ///
    /// The response body is not inspected.
    ///
    /// # Errors
    /// Returns error if the repository does not exist or the call fails.
    pub async fn get_repo(&self, slug: &Reposlug) -> Result<()> {
        let _: IgnoredAny = self.get(&format!("/repos/{slug}")).await?;
        Ok(())
    }

    // === PR Operations ===

    /// List pull requests of a repository, first page only.
    ///
    /// # Errors
    /// Returns error if API call fails.
    pub async fn list_pulls(
        &self,
        slug: &Reposlug,
        state: StateFilter,
    ) -> Result<Vec<PullRequest>> {
        let prs: Vec<ApiPullRequest> = self
            .get(&format!("/repos/{slug}/pulls?state={state}"))
            .await?;

        Ok(prs
            .into_iter()
            .map(|api_pr| PullRequest {
                number: api_pr.number,
                url: api_pr.html_url,
                state: match api_pr.state.as_str() {
                    "open" => PullRequestState::Open,
                    _ => PullRequestState::Closed,
                },
                base_ref: api_pr.base.ref_name,
                head_sha: api_pr.head.sha,
                labels: api_pr.labels.into_iter().map(|l| l.name).collect(),
            })
            .collect())
    }

    // === Commit Operations ===

    /// Get the files changed by a commit.
    ///
    /// # Errors
    /// Returns error if API call fails.
    pub async fn get_commit_files(&self, slug: &Reposlug, sha: &str) -> Result<Vec<ChangedFile>> {
        let commit: ApiCommit = self.get(&format!("/repos/{slug}/commits/{sha}")).await?;

        Ok(commit
            .files
            .into_iter()
            .map(|f| ChangedFile::new(f.filename, FileStatus::from(f.status.as_str())))
            .collect())
    }

    // === Label Operations ===

    /// Replace all labels of a pull request.
    ///
    /// # Errors
    /// Returns error if the update is rejected.
    pub async fn set_labels(&self, slug: &Reposlug, number: u64, labels: Vec<String>) -> Result<()> {
        let _: IgnoredAny = self
            .post(
                &format!("/repos/{slug}/issues/{number}"),
                &SetLabels { labels },
            )
            .await?;
        Ok(())
    }
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("base_url", &self.base_url)
            .field("token", &"[redacted]")
            .finish_non_exhaustive()
    }
}
