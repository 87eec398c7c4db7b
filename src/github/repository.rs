//! Upstream repository identity.

use crate::error::GitHubError;
use std::fmt;
use std::str::FromStr;

/// A GitHub repository, `owner/name`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Repository {
    /// Owning user or organization
    pub owner: String,
    /// Repository name
    pub name: String,
}

impl Repository {
    /// Create a repository identifier
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Parse owner/repo from a git remote URL
    ///
    /// Supports Git URL formats:
    /// - SSH SCP-like: git@github.com:owner/repo.git
    /// - HTTPS: https://github.com/owner/repo.git
    pub fn from_remote_url(url: &str) -> Result<Self, GitHubError> {
        let url = url.trim();

        // SSH SCP-like format: git@github.com:owner/repo.git
        if url.contains('@')
            && !url.contains("://")
            && let Some((_, path)) = url.split_once(':')
        {
            return path.trim_end_matches(".git").parse();
        }

        // HTTPS/SSH protocol URLs
        if let Some(path_start) = url.find("github.com/") {
            let path = url[path_start + "github.com/".len()..].trim_end_matches(".git");
            let mut parts = path.split('/');
            if let (Some(owner), Some(name)) = (parts.next(), parts.next())
                && !owner.is_empty()
                && !name.is_empty()
            {
                return Ok(Self::new(owner, name));
            }
        }

        Err(GitHubError::InvalidRepository {
            input: url.to_string(),
        })
    }
}

impl FromStr for Repository {
    type Err = GitHubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split('/').collect::<Vec<_>>().as_slice() {
            [owner, name] if !owner.is_empty() && !name.is_empty() => Ok(Self::new(*owner, *name)),
            _ => Err(GitHubError::InvalidRepository {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
