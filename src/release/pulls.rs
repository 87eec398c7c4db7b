use crate::github::PullRequest;

/// Most pull requests offered for selection
pub const MAX_RELEASE_CANDIDATES: usize = 30;

/// Pull requests whose title mentions "release" (any case), in listing order,
/// capped at [`MAX_RELEASE_CANDIDATES`].
pub fn release_candidates(pulls: Vec<PullRequest>) -> Vec<PullRequest> {
    pulls
        .into_iter()
        .filter(|pull| pull.title.to_lowercase().contains("release"))
        .take(MAX_RELEASE_CANDIDATES)
        .collect()
}
