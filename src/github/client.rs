//! GitHub REST client for the release flow.

use super::types::{FileContents, NewComment, NewRelease, PullRequest, Release};
use super::{Repository, SourceHost};
use crate::error::{CliError, GitHubError, ReleaseError, Result};
use base64::Engine as _;
use bytes::Bytes;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};

/// Public GitHub API root
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Thin authenticated client over the GitHub REST API
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    api_url: String,
}

impl GitHubClient {
    /// Create a client authenticated with `token` against `api_url`
    pub fn new(token: &str, api_url: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let auth = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|e| {
            ReleaseError::Cli(CliError::ExecutionFailed {
                command: "github_client_init".to_string(),
                reason: format!("token is not a valid header value: {}", e),
            })
        })?;
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("ruby_release_tag/", env!("CARGO_PKG_VERSION"))),
        );

        let http = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    fn repo_url(&self, repo: &Repository, rest: &str) -> String {
        format!("{}/repos/{}/{}", self.api_url, repo, rest)
    }
}

/// Turn a non-success response into a [`GitHubError::Api`]
async fn check(response: reqwest::Response, operation: &str) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    Err(GitHubError::Api {
        operation: operation.to_string(),
        status: status.as_u16(),
        message,
    }
    .into())
}

/// Decode the `content` field of a contents API response
fn decode_contents(path: &str, contents: FileContents) -> std::result::Result<Bytes, GitHubError> {
    if contents.encoding != "base64" {
        return Err(GitHubError::InvalidContent {
            path: path.to_string(),
            reason: format!("unsupported encoding '{}'", contents.encoding),
        });
    }

    // The API wraps base64 at 60 columns
    let packed: String = contents
        .content
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    base64::engine::general_purpose::STANDARD
        .decode(packed)
        .map(Bytes::from)
        .map_err(|e| GitHubError::InvalidContent {
            path: path.to_string(),
            reason: e.to_string(),
        })
}

impl SourceHost for GitHubClient {
    async fn list_pull_requests(&self, repo: &Repository, state: &str) -> Result<Vec<PullRequest>> {
        let url = self.repo_url(repo, "pulls");
        log::debug!("GET {} state={}", url, state);

        let response = self
            .http
            .get(&url)
            .query(&[("state", state), ("per_page", "100")])
            .send()
            .await?;
        let pulls = check(response, "list pull requests")
            .await?
            .json::<Vec<PullRequest>>()
            .await?;

        log::debug!("{} {} pull requests in {}", pulls.len(), state, repo);
        Ok(pulls)
    }

    async fn get_contents(&self, repo: &Repository, path: &str, git_ref: &str) -> Result<Bytes> {
        let url = self.repo_url(repo, &format!("contents/{}", path));
        log::debug!("GET {} ref={}", url, git_ref);

        let response = self.http.get(&url).query(&[("ref", git_ref)]).send().await?;
        let contents = check(response, &format!("get contents of {}", path))
            .await?
            .json::<FileContents>()
            .await?;

        Ok(decode_contents(path, contents)?)
    }

    async fn create_release(&self, repo: &Repository, release: &NewRelease) -> Result<Release> {
        let url = self.repo_url(repo, "releases");
        log::debug!("POST {} tag_name={}", url, release.tag_name);

        let response = self.http.post(&url).json(release).send().await?;
        let created = check(response, "create release")
            .await?
            .json::<Release>()
            .await?;

        log::info!("Created release {} ({})", created.id, created.html_url);
        Ok(created)
    }

    async fn create_pull_request_comment(
        &self,
        repo: &Repository,
        number: u64,
        body: &str,
    ) -> Result<()> {
        // Pull request conversation comments live on the issues endpoint
        let url = self.repo_url(repo, &format!("issues/{}/comments", number));
        log::debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .json(&NewComment { body })
            .send()
            .await?;
        check(response, "create pull request comment").await?;
        Ok(())
    }
}
