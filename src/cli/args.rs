//! Command line argument parsing and validation.
//!
//! The tool is interactive; flags only override where it talks to and how
//! patiently it waits on CI.

use crate::circleci;
use crate::github::{self, Repository};
use clap::Parser;

/// Tag a Ruby package release from its merged release pull request
#[derive(Parser, Debug)]
#[command(
    name = "ruby_release_tag",
    version,
    about = "Tag a Ruby package release from its merged release pull request",
    long_about = "Walks through tagging a Ruby package release: pick the merged release PR,
derive <package>/v<version>, pull the notes from <package>/CHANGELOG.md, create the
GitHub release and follow the CircleCI build it triggers.

Requires GH_TOKEN or GITHUB_TOKEN. Run from a clone of the upstream repository or
pass --repo."
)]
pub struct Args {
    /// Upstream repository (defaults to the origin remote)
    #[arg(long, env = "RELEASE_UPSTREAM_REPO", value_name = "OWNER/REPO")]
    pub repo: Option<String>,

    /// GitHub API root
    #[arg(long, env = "GITHUB_API_URL", default_value = github::DEFAULT_API_URL)]
    pub github_api_url: String,

    /// CircleCI API root
    #[arg(long, env = "CIRCLECI_API_URL", default_value = circleci::DEFAULT_API_URL)]
    pub circleci_api_url: String,

    /// Seconds between CircleCI build status requests
    #[arg(long, value_name = "SECS", default_value_t = circleci::DEFAULT_POLL_INTERVAL.as_secs())]
    pub poll_interval: u64,

    /// Times to look for the CircleCI build of the new tag before giving up
    #[arg(long, value_name = "N", default_value_t = circleci::DEFAULT_LOOKUP_ATTEMPTS)]
    pub lookup_attempts: u32,

    /// Show request-level details
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if let Some(repo) = &self.repo {
            repo.parse::<Repository>().map_err(|e| e.to_string())?;
        }

        if self.lookup_attempts == 0 {
            return Err("--lookup-attempts must be at least 1".to_string());
        }

        Ok(())
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
}

impl RuntimeConfig {
    /// Create runtime configuration
    pub fn new(verbose: bool) -> Self {
        Self {
            output: super::OutputManager::new(verbose),
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::new(false)
    }
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        Self::new(args.verbose)
    }
}

impl RuntimeConfig {
    /// Print message
    pub fn println(&self, message: &str) -> std::io::Result<()> {
        self.output.println(message)
    }

    /// Print a step header
    pub fn step_println(&self, message: &str) -> std::io::Result<()> {
        self.output.step(message)
    }

    /// Print a greeting or farewell
    pub fn banner_println(&self, message: &str) -> std::io::Result<()> {
        self.output.banner(message)
    }

    /// Print verbose message
    pub fn verbose_println(&self, message: &str) -> std::io::Result<()> {
        self.output.verbose(message)
    }

    /// Print error message (always shown)
    pub fn error_println(&self, message: &str) {
        self.output.error(message);
    }

    /// Replace the current terminal line
    pub fn status_line(&self, message: &str) -> std::io::Result<()> {
        self.output.status_line(message)
    }

    /// Finish the status line so later output starts on a fresh one
    pub fn end_status_line(&self) -> std::io::Result<()> {
        self.output.end_status_line()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["ruby_release_tag"]).expect("no flags needed");
        assert_eq!(args.poll_interval, 10);
        assert_eq!(args.lookup_attempts, 15);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_repo() {
        let args = Args::try_parse_from(["ruby_release_tag", "--repo", "google-cloud-ruby"])
            .expect("parses");
        assert!(args.validate().unwrap_err().contains("owner/repo"));
    }

    #[test]
    fn test_rejects_zero_lookup_attempts() {
        let args = Args::try_parse_from(["ruby_release_tag", "--lookup-attempts", "0"])
            .expect("parses");
        assert!(args.validate().is_err());
    }
}
