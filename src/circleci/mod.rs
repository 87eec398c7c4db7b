//! CircleCI integration: locating the build a release tag triggered and
//! following it to completion.

mod client;
mod status;

pub use client::{CircleCiClient, DEFAULT_API_URL, DEFAULT_LOOKUP_ATTEMPTS, DEFAULT_POLL_INTERVAL};
pub use status::BuildStatusPoller;

use crate::error::Result;
use serde::Deserialize;
use std::time::Duration;

/// A CircleCI build summary (v1.1 API)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Build {
    /// Project-scoped build number
    pub build_num: u64,
    /// Web URL
    #[serde(default)]
    pub build_url: String,
    /// Outcome or progress, e.g. `queued`, `running`, `success`, `failed`
    #[serde(default)]
    pub status: Option<String>,
    /// `queued`, `scheduled`, `not_run`, `not_running`, `running` or `finished`
    #[serde(default)]
    pub lifecycle: Option<String>,
    /// Tag that triggered the build, if any
    #[serde(default)]
    pub vcs_tag: Option<String>,
}

impl Build {
    /// Whether CircleCI has stopped working on this build
    pub fn is_finished(&self) -> bool {
        self.lifecycle.as_deref().is_none_or(|l| l == "finished")
    }
}

/// CI operations the release flow depends on.
#[allow(async_fn_in_trait)]
pub trait CiService: Sized {
    /// Most recent build triggered by `tag`, or `None` when CI never queued one
    async fn get_latest_build_by_tag(&self, tag: &str) -> Result<Option<Build>>;

    /// Fetch a single build
    async fn get_build(&self, build_num: u64) -> Result<Build>;

    /// Delay between two status requests
    fn poll_interval(&self) -> Duration;

    /// Lazy sequence of build statuses that ends once the build finishes
    fn get_build_status_generator(&self, build_num: u64) -> BuildStatusPoller<'_, Self> {
        BuildStatusPoller::new(self, build_num, self.poll_interval())
    }
}
