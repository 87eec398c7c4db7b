//! Polling a build until CircleCI reports it finished.

use super::CiService;
use crate::error::Result;
use std::time::Duration;

/// Lazy, finite sequence of status strings for one build.
///
/// Every call to [`next`](Self::next) fetches the build once, sleeping the poll
/// interval beforehand unless it is the first fetch. The status of a finished
/// build is yielded once more and then the sequence ends.
pub struct BuildStatusPoller<'a, C> {
    ci: &'a C,
    build_num: u64,
    interval: Duration,
    polled: bool,
    done: bool,
}

impl<'a, C: CiService> BuildStatusPoller<'a, C> {
    /// Create a poller for `build_num`
    pub fn new(ci: &'a C, build_num: u64, interval: Duration) -> Self {
        Self {
            ci,
            build_num,
            interval,
            polled: false,
            done: false,
        }
    }

    /// Next status, or `None` once the build has finished
    pub async fn next(&mut self) -> Result<Option<String>> {
        if self.done {
            return Ok(None);
        }

        if self.polled {
            tokio::time::sleep(self.interval).await;
        }
        self.polled = true;

        let build = self.ci.get_build(self.build_num).await?;
        log::debug!(
            "build {} status={:?} lifecycle={:?}",
            self.build_num,
            build.status,
            build.lifecycle
        );

        if build.is_finished() {
            self.done = true;
        }

        Ok(Some(build.status.unwrap_or_else(|| "unknown".to_string())))
    }
}
