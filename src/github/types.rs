//! GitHub API records used by the release flow.
//!
//! Only the fields the flow reads are modelled; serde ignores the rest.

use serde::{Deserialize, Serialize};

/// A pull request as returned by `GET /repos/{owner}/{repo}/pulls`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PullRequest {
    /// Pull request number
    pub number: u64,
    /// Title
    pub title: String,
    /// Head branch
    pub head: PullRequestHead,
    /// Merge commit, `None` when the pull request was closed unmerged
    #[serde(default)]
    pub merge_commit_sha: Option<String>,
    /// Web URL
    #[serde(default)]
    pub html_url: String,
}

/// Head branch of a pull request
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PullRequestHead {
    /// Branch name
    #[serde(rename = "ref")]
    pub ref_name: String,
}

/// Payload for `POST /repos/{owner}/{repo}/releases`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewRelease {
    /// Tag to create
    pub tag_name: String,
    /// Commit the tag points at
    pub target_commitish: String,
    /// Release title
    pub name: String,
    /// Release notes
    pub body: String,
}

/// A created release
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Release {
    /// Release ID
    pub id: u64,
    /// Web URL
    pub html_url: String,
    /// Tag name
    #[serde(default)]
    pub tag_name: String,
}

/// Response of the contents API for a single file
#[derive(Debug, Deserialize)]
pub(super) struct FileContents {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub encoding: String,
}

#[derive(Debug, Serialize)]
pub(super) struct NewComment<'a> {
    pub body: &'a str,
}
