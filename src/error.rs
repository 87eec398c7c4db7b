//! Error types for ruby_release_tag operations.
//!
//! This module defines all error types with actionable error messages and recovery suggestions.

use thiserror::Error;

/// Result type alias for ruby_release_tag operations
pub type Result<T> = std::result::Result<T, ReleaseError>;

/// Main error type for all ruby_release_tag operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// GitHub API errors
    #[error("GitHub error: {0}")]
    GitHub(#[from] GitHubError),

    /// CircleCI API errors
    #[error("CircleCI error: {0}")]
    CircleCi(#[from] CircleCiError),

    /// Release tag derivation errors
    #[error("Tag error: {0}")]
    Tag(#[from] TagError),

    /// CLI and user input errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// Transport errors from the HTTP client
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// GitHub-specific errors
#[derive(Error, Debug)]
pub enum GitHubError {
    /// Non-success response from the GitHub API
    #[error("{operation} failed with HTTP {status}: {message}")]
    Api {
        /// Operation that failed
        operation: String,
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },

    /// Pull request was closed without being merged
    #[error("Pull request #{number} has no merge commit. Was it merged?")]
    MissingMergeCommit {
        /// Pull request number
        number: u64,
    },

    /// File contents could not be decoded
    #[error("Could not decode contents of '{path}': {reason}")]
    InvalidContent {
        /// Path of the file in the repository
        path: String,
        /// Reason for the error
        reason: String,
    },

    /// Repository identifier could not be parsed
    #[error("Invalid repository '{input}'. Expected: owner/repo")]
    InvalidRepository {
        /// Input that failed to parse
        input: String,
    },
}

/// CircleCI-specific errors
#[derive(Error, Debug)]
pub enum CircleCiError {
    /// Non-success response from the CircleCI API
    #[error("{operation} failed with HTTP {status}: {message}")]
    Api {
        /// Operation that failed
        operation: String,
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },
}

/// Release tag errors
#[derive(Error, Debug)]
pub enum TagError {
    /// Typed tag does not look like `<package>/v<major>.<minor>.<patch>`
    #[error("'{tag}' is not a valid release tag. Expected: <package>/v<major>.<minor>.<patch>")]
    InvalidTag {
        /// Tag as entered
        tag: String,
    },
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// No GitHub token in the environment
    #[error("GitHub token not provided. Set GH_TOKEN or GITHUB_TOKEN.")]
    MissingToken,

    /// Selected pull request index is out of range
    #[error("Selection {selection} is out of range (expected 1-{available})")]
    InvalidSelection {
        /// Number typed by the user
        selection: i64,
        /// Number of listed pull requests
        available: usize,
    },

    /// No closed pull request looks like a release
    #[error("No closed pull requests with 'release' in the title were found in {repository}")]
    NoReleasePullRequests {
        /// Repository that was searched
        repository: String,
    },

    /// Standard input closed while waiting for an answer
    #[error("Input closed while waiting for: {prompt}")]
    InputClosed {
        /// Prompt that was pending
        prompt: String,
    },

    /// A step ran before the step that fills in what it needs
    #[error("Release step '{step}' ran before {missing} was determined")]
    StepOutOfOrder {
        /// Step that was running
        step: String,
        /// Missing context field
        missing: String,
    },

    /// Command execution failed
    #[error("Command execution failed: {command} - {reason}")]
    ExecutionFailed {
        /// Command that failed
        command: String,
        /// Reason for the error
        reason: String,
    },
}

impl ReleaseError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            ReleaseError::Cli(CliError::MissingToken) => vec![
                "Export a token with repo scope: export GITHUB_TOKEN=<token>".to_string(),
                "Or reuse the gh CLI login: export GH_TOKEN=$(gh auth token)".to_string(),
            ],
            ReleaseError::Cli(CliError::InvalidSelection { available, .. }) => vec![
                format!("Rerun and pick a number between 1 and {}", available),
            ],
            ReleaseError::Cli(CliError::NoReleasePullRequests { .. }) => vec![
                "Merge the release pull request before tagging".to_string(),
                "Pass --repo owner/repo if the origin remote is a fork".to_string(),
            ],
            ReleaseError::Cli(CliError::ExecutionFailed { .. }) => vec![
                "Run from inside a clone of the upstream repository".to_string(),
                "Or pass --repo owner/repo explicitly".to_string(),
            ],
            ReleaseError::Tag(TagError::InvalidTag { .. }) => vec![
                "Use the form <package>/v<major>.<minor>.<patch>, e.g. google-cloud-storage/v1.2.3"
                    .to_string(),
            ],
            ReleaseError::GitHub(GitHubError::Api { status: 401, .. }) => vec![
                "Check that GITHUB_TOKEN is valid and not expired".to_string(),
            ],
            ReleaseError::GitHub(GitHubError::Api { status: 404, .. }) => vec![
                "Verify the repository name and that the token can read it".to_string(),
                "Check that <package>/CHANGELOG.md exists at the merge commit".to_string(),
            ],
            ReleaseError::GitHub(GitHubError::Api { status: 422, .. }) => vec![
                "A release with this tag may already exist".to_string(),
            ],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }
}
