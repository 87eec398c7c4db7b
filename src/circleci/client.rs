//! CircleCI v1.1 REST client.

use super::{Build, CiService};
use crate::error::{CircleCiError, CliError, ReleaseError, Result};
use crate::github::Repository;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use std::time::Duration;

/// Public CircleCI API root
pub const DEFAULT_API_URL: &str = "https://circleci.com/api/v1.1";

/// Delay between build status requests
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Requests made while waiting for CircleCI to queue a tag build
pub const DEFAULT_LOOKUP_ATTEMPTS: u32 = 15;

/// Client scoped to one GitHub-hosted project
#[derive(Debug, Clone)]
pub struct CircleCiClient {
    http: reqwest::Client,
    project_url: String,
    poll_interval: Duration,
    lookup_attempts: u32,
}

impl CircleCiClient {
    /// Create a client for `repository`; `token` is only needed for private projects
    pub fn new(repository: &Repository, api_url: &str, token: Option<&str>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = token {
            let value = HeaderValue::from_str(token).map_err(|e| {
                ReleaseError::Cli(CliError::ExecutionFailed {
                    command: "circleci_client_init".to_string(),
                    reason: format!("CIRCLE_TOKEN is not a valid header value: {}", e),
                })
            })?;
            headers.insert("circle-token", value);
        }

        let http = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            http,
            project_url: format!(
                "{}/project/github/{}",
                api_url.trim_end_matches('/'),
                repository
            ),
            poll_interval: DEFAULT_POLL_INTERVAL,
            lookup_attempts: DEFAULT_LOOKUP_ATTEMPTS,
        })
    }

    /// Override the delay between status requests
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Override how many times the tag build lookup is attempted
    pub fn with_lookup_attempts(mut self, attempts: u32) -> Self {
        self.lookup_attempts = attempts.max(1);
        self
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str, operation: &str) -> Result<T> {
        log::debug!("GET {}", url);
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CircleCiError::Api {
                operation: operation.to_string(),
                status: status.as_u16(),
                message,
            }
            .into());
        }
        Ok(response.json::<T>().await?)
    }
}

/// First build in `builds` triggered by `tag`
fn find_build_by_tag(builds: Vec<Build>, tag: &str) -> Option<Build> {
    builds
        .into_iter()
        .find(|build| build.vcs_tag.as_deref() == Some(tag))
}

impl CiService for CircleCiClient {
    async fn get_latest_build_by_tag(&self, tag: &str) -> Result<Option<Build>> {
        // Recent builds come back newest first. The tag build shows up a few
        // seconds after the tag is pushed, so keep looking with a growing delay.
        for attempt in 1..=self.lookup_attempts {
            let builds: Vec<Build> = self.get_json(&self.project_url, "list recent builds").await?;
            if let Some(build) = find_build_by_tag(builds, tag) {
                return Ok(Some(build));
            }

            log::debug!(
                "no build for tag {} yet (attempt {}/{})",
                tag,
                attempt,
                self.lookup_attempts
            );
            if attempt < self.lookup_attempts {
                tokio::time::sleep(Duration::from_secs(u64::from(attempt))).await;
            }
        }

        Ok(None)
    }

    async fn get_build(&self, build_num: u64) -> Result<Build> {
        let url = format!("{}/{}", self.project_url, build_num);
        self.get_json(&url, &format!("get build {}", build_num)).await
    }

    fn poll_interval(&self) -> Duration {
        self.poll_interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged(build_num: u64, tag: Option<&str>) -> Build {
        Build {
            build_num,
            build_url: String::new(),
            status: Some("queued".to_string()),
            lifecycle: Some("queued".to_string()),
            vcs_tag: tag.map(str::to_string),
        }
    }

    #[test]
    fn test_find_build_by_tag_takes_newest_match() {
        let builds = vec![
            tagged(12, None),
            tagged(11, Some("google-cloud-storage/v1.2.3")),
            tagged(10, Some("google-cloud-storage/v1.2.3")),
        ];
        let found = find_build_by_tag(builds, "google-cloud-storage/v1.2.3").expect("match");
        assert_eq!(found.build_num, 11);
    }

    #[test]
    fn test_find_build_by_tag_requires_exact_tag() {
        let builds = vec![tagged(3, Some("1.2.3")), tagged(2, Some("google-cloud-storage/v1.2.30"))];
        assert!(find_build_by_tag(builds, "google-cloud-storage/v1.2.3").is_none());
    }

    #[test]
    fn test_project_url() {
        let repo = Repository::new("googleapis", "google-cloud-ruby");
        let client = CircleCiClient::new(&repo, "https://circleci.com/api/v1.1/", None)
            .expect("client builds")
            .with_lookup_attempts(0);
        assert_eq!(
            client.project_url,
            "https://circleci.com/api/v1.1/project/github/googleapis/google-cloud-ruby"
        );
        assert_eq!(client.lookup_attempts, 1);
        assert_eq!(client.poll_interval(), DEFAULT_POLL_INTERVAL);
    }

    #[test]
    fn test_rejects_malformed_token() {
        let repo = Repository::new("googleapis", "google-cloud-ruby");
        let err = CircleCiClient::new(&repo, DEFAULT_API_URL, Some("abc\ndef")).unwrap_err();
        assert!(matches!(
            err,
            ReleaseError::Cli(CliError::ExecutionFailed { ref reason, .. }) if reason.contains("CIRCLE_TOKEN")
        ));
    }

    #[test]
    fn test_accepts_token() {
        let repo = Repository::new("googleapis", "google-cloud-ruby");
        assert!(CircleCiClient::new(&repo, DEFAULT_API_URL, Some("0123abcd")).is_ok());
    }
}
