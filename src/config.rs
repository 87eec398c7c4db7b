//! Settings for a tagging session.

use crate::cli::Args;
use crate::github::Repository;
use std::collections::HashMap;
use std::time::Duration;

/// Typed settings for one tagging session
#[derive(Debug, Clone)]
pub struct TagConfig {
    /// Upstream repository; detected from the origin remote when `None`
    pub upstream_repo: Option<Repository>,
    /// GitHub API root
    pub github_api_url: String,
    /// CircleCI API root
    pub circleci_api_url: String,
    /// Delay between build status requests
    pub poll_interval: Duration,
    /// Requests made while waiting for the tag build to appear
    pub lookup_attempts: u32,
}

impl Default for TagConfig {
    fn default() -> Self {
        Self {
            upstream_repo: None,
            github_api_url: crate::github::DEFAULT_API_URL.to_string(),
            circleci_api_url: crate::circleci::DEFAULT_API_URL.to_string(),
            poll_interval: crate::circleci::DEFAULT_POLL_INTERVAL,
            lookup_attempts: crate::circleci::DEFAULT_LOOKUP_ATTEMPTS,
        }
    }
}

impl From<&Args> for TagConfig {
    /// Arguments are validated before this runs, so an unparsable `--repo`
    /// never reaches here.
    fn from(args: &Args) -> Self {
        Self {
            upstream_repo: args.repo.as_deref().and_then(|r| r.parse().ok()),
            github_api_url: args.github_api_url.clone(),
            circleci_api_url: args.circleci_api_url.clone(),
            poll_interval: Duration::from_secs(args.poll_interval),
            lookup_attempts: args.lookup_attempts,
        }
    }
}

/// Snapshot of the process environment
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    vars: HashMap<String, String>,
}

impl EnvConfig {
    /// Capture the current process environment
    pub fn from_env() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    /// Build from explicit pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Value of `key`, treating empty values as unset
    pub fn get(&self, key: &str) -> Option<String> {
        self.vars.get(key).filter(|v| !v.is_empty()).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_values_are_unset() {
        let env = EnvConfig::from_pairs([("GH_TOKEN", ""), ("GITHUB_TOKEN", "abc")]);
        assert_eq!(env.get("GH_TOKEN"), None);
        assert_eq!(env.get("GITHUB_TOKEN").as_deref(), Some("abc"));
        assert_eq!(env.get("CIRCLE_TOKEN"), None);
    }

    #[test]
    fn test_from_args() {
        use clap::Parser;
        let args = Args::try_parse_from([
            "ruby_release_tag",
            "--repo",
            "googleapis/google-cloud-ruby",
            "--poll-interval",
            "3",
        ])
        .expect("parses");
        let config = TagConfig::from(&args);
        assert_eq!(
            config.upstream_repo,
            Some(Repository::new("googleapis", "google-cloud-ruby"))
        );
        assert_eq!(config.poll_interval, Duration::from_secs(3));
    }
}
