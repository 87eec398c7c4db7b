use crate::error::TagError;
use regex::Regex;
use semver::Version;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Release branches are named `release-<package>-v<major>.<minor>.<patch>`
static HEAD_REF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^release-([a-z-]+)-v([0-9]\.[0-9]\.[0-9])$").expect("head ref regex is valid")
});

/// Tags are spelled `<package>/v<major>.<minor>.<patch>`
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-z-]+)/v([0-9]\.[0-9]\.[0-9])$").expect("release tag regex is valid")
});

/// A package name and version, rendered as `<package>/v<version>`.
///
/// Version components are single digits; that is what the release tooling for
/// these repositories produces and the CI tag filters expect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseTag {
    package: String,
    version: Version,
}

impl ReleaseTag {
    /// Build a tag from its parts
    pub fn new(package: impl Into<String>, version: Version) -> Self {
        Self {
            package: package.into(),
            version,
        }
    }

    /// Derive the tag from a release pull request's head branch.
    ///
    /// Returns `None` when the branch does not follow the release naming scheme.
    pub fn from_head_ref(head_ref: &str) -> Option<Self> {
        let caps = HEAD_REF_RE.captures(head_ref)?;
        Self::from_parts(&caps[1], &caps[2])
    }

    fn from_parts(package: &str, version: &str) -> Option<Self> {
        Version::parse(version)
            .ok()
            .map(|version| Self::new(package, version))
    }

    /// Package name, e.g. `google-cloud-storage`
    pub fn package_name(&self) -> &str {
        &self.package
    }

    /// Release version, e.g. `1.2.3`
    pub fn version(&self) -> &Version {
        &self.version
    }
}

impl FromStr for ReleaseTag {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TAG_RE
            .captures(s)
            .and_then(|caps| Self::from_parts(&caps[1], &caps[2]))
            .ok_or_else(|| TagError::InvalidTag { tag: s.to_string() })
    }
}

impl fmt::Display for ReleaseTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/v{}", self.package, self.version)
    }
}
