//! State accumulated while tagging a release.

use crate::error::{CliError, Result};
use crate::github::{PullRequest, Release};
use crate::release::ReleaseTag;
use semver::Version;

/// Everything the tagging steps have determined so far.
///
/// Created empty, filled in step by step, dropped when the session ends.
/// Package name, version and tag all come from the single [`ReleaseTag`], so
/// they cannot drift apart.
#[derive(Debug, Default)]
pub struct ReleaseContext {
    /// The merged pull request being released
    pub release_pr: Option<PullRequest>,
    /// Package and version being released
    pub release_tag: Option<ReleaseTag>,
    /// Changelog excerpt, empty when the changelog has no section for the version
    pub release_notes: String,
    /// Release object created on GitHub
    pub github_release: Option<Release>,
}

impl ReleaseContext {
    /// Package name, e.g. `google-cloud-storage`
    pub fn package_name(&self) -> Option<&str> {
        self.release_tag.as_ref().map(ReleaseTag::package_name)
    }

    /// Release version, e.g. `1.2.3`
    pub fn release_version(&self) -> Option<&Version> {
        self.release_tag.as_ref().map(ReleaseTag::version)
    }

    pub(super) fn require_pr(&self, step: &str) -> Result<&PullRequest> {
        self.release_pr.as_ref().ok_or_else(|| {
            CliError::StepOutOfOrder {
                step: step.to_string(),
                missing: "the release pull request".to_string(),
            }
            .into()
        })
    }

    pub(super) fn require_tag(&self, step: &str) -> Result<&ReleaseTag> {
        self.release_tag.as_ref().ok_or_else(|| {
            CliError::StepOutOfOrder {
                step: step.to_string(),
                missing: "the release tag".to_string(),
            }
            .into()
        })
    }
}
