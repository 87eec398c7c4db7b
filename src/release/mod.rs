//! Release naming rules: which pull requests look like releases, how a
//! release tag is spelled, and where its notes live in the changelog.

mod changelog;
mod pulls;
mod tag;

pub use changelog::{ChangelogEntry, find_changelog_entry, find_release_notes};
pub use pulls::{MAX_RELEASE_CANDIDATES, release_candidates};
pub use tag::ReleaseTag;
