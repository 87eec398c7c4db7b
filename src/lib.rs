//! # Ruby Release Tag
//!
//! Interactive assistant for tagging a Ruby package release.
//!
//! Given a merged release pull request in a multi-gem repository, it:
//!
//! - **Finds the release PR**: lists recently closed pull requests whose title
//!   mentions "release" and asks which one to tag
//! - **Derives the tag**: `release-<package>-v<version>` branches become
//!   `<package>/v<version>`; anything else is typed in by hand
//! - **Extracts notes**: the `### <version> / <date>` section of
//!   `<package>/CHANGELOG.md` at the merge commit
//! - **Creates the GitHub release** and links it from the pull request
//! - **Watches CircleCI** until the build that publishes the gem finishes
//!
//! ## Usage
//!
//! ```bash
//! export GITHUB_TOKEN=...
//! ruby_release_tag                                      # upstream from origin remote
//! ruby_release_tag --repo googleapis/google-cloud-ruby  # explicit upstream
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

// Core modules
pub mod circleci;
pub mod cli;
pub mod config;
pub mod error;
pub mod github;
pub mod release;

// Re-export main types for public API
pub use circleci::{BuildStatusPoller, CiService, CircleCiClient};
pub use cli::Args;
pub use cli::commands::{ReleaseContext, ReleaseSession};
pub use config::{EnvConfig, TagConfig};
pub use error::{CliError, ReleaseError, Result};
pub use github::{GitHubClient, Repository, SourceHost};
pub use release::ReleaseTag;
