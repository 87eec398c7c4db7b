//! GitHub integration for release operations

mod client;
mod repository;
mod types;

pub use client::{DEFAULT_API_URL, GitHubClient};
pub use repository::Repository;
pub use types::{NewRelease, PullRequest, PullRequestHead, Release};

use crate::error::Result;
use bytes::Bytes;

/// Source-hosting operations the release flow depends on.
///
/// Implemented by [`GitHubClient`]; tests substitute in-memory fakes.
#[allow(async_fn_in_trait)]
pub trait SourceHost {
    /// List pull requests in the given state (`open`, `closed`, `all`)
    async fn list_pull_requests(&self, repo: &Repository, state: &str) -> Result<Vec<PullRequest>>;

    /// Fetch raw file contents at a git ref
    async fn get_contents(&self, repo: &Repository, path: &str, git_ref: &str) -> Result<Bytes>;

    /// Create a release object
    async fn create_release(&self, repo: &Repository, release: &NewRelease) -> Result<Release>;

    /// Comment on a pull request
    async fn create_pull_request_comment(
        &self,
        repo: &Repository,
        number: u64,
        body: &str,
    ) -> Result<()>;
}
