//! Shared helper functions for command execution.

use crate::EnvConfig;
use crate::config::TagConfig;
use crate::error::{CliError, ReleaseError, Result};
use crate::github::Repository;

/// Authentication and repository identity for a session
#[derive(Debug, Clone)]
pub(super) struct GitHubContext {
    /// API token
    pub token: String,
    /// Repository releases are created in
    pub upstream_repo: Repository,
}

/// Resolve the token and upstream repository before any step runs
pub(super) async fn setup_github_context(
    config: &TagConfig,
    env_config: &EnvConfig,
) -> Result<GitHubContext> {
    let token = github_token(env_config)?;

    let upstream_repo = match &config.upstream_repo {
        Some(repo) => repo.clone(),
        None => {
            let origin_url = detect_origin_url(&std::env::current_dir()?).await?;
            log::debug!("origin remote is {}", origin_url);
            Repository::from_remote_url(&origin_url)?
        }
    };

    Ok(GitHubContext {
        token,
        upstream_repo,
    })
}

/// GitHub token from `GH_TOKEN` or `GITHUB_TOKEN`
pub(super) fn github_token(env_config: &EnvConfig) -> Result<String> {
    env_config
        .get("GH_TOKEN")
        .or_else(|| env_config.get("GITHUB_TOKEN"))
        .ok_or(ReleaseError::Cli(CliError::MissingToken))
}

/// Name to greet the user by
pub(super) fn current_user(env_config: &EnvConfig) -> String {
    env_config
        .get("USER")
        .or_else(|| env_config.get("USERNAME"))
        .unwrap_or_else(|| "there".to_string())
}

/// Detect origin URL from git config
async fn detect_origin_url(repo_path: &std::path::Path) -> Result<String> {
    let output = tokio::process::Command::new("git")
        .args(["remote", "get-url", "origin"])
        .current_dir(repo_path)
        .output()
        .await
        .map_err(|e| {
            ReleaseError::Cli(CliError::ExecutionFailed {
                command: "git remote get-url origin".to_string(),
                reason: e.to_string(),
            })
        })?;

    if !output.status.success() {
        return Err(ReleaseError::Cli(CliError::ExecutionFailed {
            command: "git remote get-url origin".to_string(),
            reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
