use super::{ReleaseContext, ReleaseSession};
use crate::circleci::{Build, CiService};
use crate::cli::{Prompter, RuntimeConfig};
use crate::error::{CliError, GitHubError, ReleaseError, Result, TagError};
use crate::github::{NewRelease, PullRequest, PullRequestHead, Release, Repository, SourceHost};
use bytes::Bytes;
use std::io::Cursor;
use std::sync::Mutex;
use std::time::Duration;

const CHANGELOG: &str = "# Release History\n\n\
    ### 1.2.3 / 2020-01-01\n\
    Fixed a bug.\n\
    ### 1.2.2 / 2019-12-01\n\
    * Older fix\n";

#[derive(Default)]
struct FakeGitHub {
    pulls: Vec<PullRequest>,
    files: Vec<(String, String, String)>,
    releases: Mutex<Vec<NewRelease>>,
    comments: Mutex<Vec<(u64, String)>>,
}

impl SourceHost for FakeGitHub {
    async fn list_pull_requests(&self, _repo: &Repository, state: &str) -> Result<Vec<PullRequest>> {
        assert_eq!(state, "closed");
        Ok(self.pulls.clone())
    }

    async fn get_contents(&self, _repo: &Repository, path: &str, git_ref: &str) -> Result<Bytes> {
        self.files
            .iter()
            .find(|(p, r, _)| p == path && r == git_ref)
            .map(|(_, _, body)| Bytes::from(body.clone()))
            .ok_or_else(|| {
                GitHubError::Api {
                    operation: format!("get contents of {}", path),
                    status: 404,
                    message: "Not Found".to_string(),
                }
                .into()
            })
    }

    async fn create_release(&self, repo: &Repository, release: &NewRelease) -> Result<Release> {
        self.releases.lock().expect("lock").push(release.clone());
        Ok(Release {
            id: 99,
            html_url: format!("https://github.com/{}/releases/tag/{}", repo, release.tag_name),
            tag_name: release.tag_name.clone(),
        })
    }

    async fn create_pull_request_comment(
        &self,
        _repo: &Repository,
        number: u64,
        body: &str,
    ) -> Result<()> {
        self.comments
            .lock()
            .expect("lock")
            .push((number, body.to_string()));
        Ok(())
    }
}

#[derive(Default)]
struct FakeCi {
    tagged_build: Option<Build>,
    progress: Mutex<Vec<Build>>,
    looked_up: Mutex<Vec<String>>,
    builds_fetched: Mutex<usize>,
}

impl CiService for FakeCi {
    async fn get_latest_build_by_tag(&self, tag: &str) -> Result<Option<Build>> {
        self.looked_up.lock().expect("lock").push(tag.to_string());
        Ok(self.tagged_build.clone())
    }

    async fn get_build(&self, _build_num: u64) -> Result<Build> {
        *self.builds_fetched.lock().expect("lock") += 1;
        Ok(self.progress.lock().expect("lock").remove(0))
    }

    fn poll_interval(&self) -> Duration {
        Duration::ZERO
    }
}

fn pull(number: u64, title: &str, head_ref: &str) -> PullRequest {
    PullRequest {
        number,
        title: title.to_string(),
        head: PullRequestHead {
            ref_name: head_ref.to_string(),
        },
        merge_commit_sha: Some(format!("sha{}", number)),
        html_url: String::new(),
    }
}

fn build(status: &str, lifecycle: &str) -> Build {
    Build {
        build_num: 1187,
        build_url: "https://circleci.com/gh/googleapis/google-cloud-ruby/1187".to_string(),
        status: Some(status.to_string()),
        lifecycle: Some(lifecycle.to_string()),
        vcs_tag: Some("google-cloud-storage/v1.2.3".to_string()),
    }
}

fn storage_github() -> FakeGitHub {
    FakeGitHub {
        pulls: vec![
            pull(10, "feat: add bucket lock", "bucket-lock"),
            pull(11, "Release google-cloud-storage 1.2.3", "release-google-cloud-storage-v1.2.3"),
            pull(12, "chore: release foo-bar", "autorelease-pending"),
        ],
        files: vec![
            (
                "google-cloud-storage/CHANGELOG.md".to_string(),
                "sha11".to_string(),
                CHANGELOG.to_string(),
            ),
            (
                "foo-bar/CHANGELOG.md".to_string(),
                "sha12".to_string(),
                "### 2.0.0 / 2020-02-02\nNothing for 2.0.1 here.\n".to_string(),
            ),
        ],
        ..FakeGitHub::default()
    }
}

async fn run_session(github: &FakeGitHub, ci: &FakeCi, input: &str) -> Result<ReleaseContext> {
    let repo = Repository::new("googleapis", "google-cloud-ruby");
    let config = RuntimeConfig::default();
    let mut session = ReleaseSession::new(
        github,
        ci,
        &repo,
        &config,
        Prompter::new(Cursor::new(input.to_string())),
    );
    session.run().await
}

#[tokio::test]
async fn test_release_branch_end_to_end() {
    let github = storage_github();
    let ci = FakeCi {
        tagged_build: Some(build("queued", "queued")),
        progress: Mutex::new(vec![
            build("queued", "queued"),
            build("running", "running"),
            build("success", "finished"),
        ]),
        ..FakeCi::default()
    };

    // First listed candidate is #11; #10 is filtered out
    let ctx = run_session(&github, &ci, "1\n").await.expect("session succeeds");

    assert_eq!(ctx.release_pr.as_ref().map(|p| p.number), Some(11));
    assert_eq!(ctx.package_name(), Some("google-cloud-storage"));
    assert_eq!(ctx.release_version().map(|v| v.to_string()).as_deref(), Some("1.2.3"));
    assert_eq!(ctx.release_notes, "Fixed a bug.");

    let releases = github.releases.lock().expect("lock");
    assert_eq!(
        releases.as_slice(),
        &[NewRelease {
            tag_name: "1.2.3".to_string(),
            target_commitish: "sha11".to_string(),
            name: "Release google-cloud-storage 1.2.3".to_string(),
            body: "Fixed a bug.".to_string(),
        }]
    );

    let comments = github.comments.lock().expect("lock");
    assert_eq!(
        comments.as_slice(),
        &[(
            11,
            "Release is at https://github.com/googleapis/google-cloud-ruby/releases/tag/1.2.3"
                .to_string()
        )]
    );

    assert_eq!(
        ci.looked_up.lock().expect("lock").as_slice(),
        &["google-cloud-storage/v1.2.3".to_string()]
    );
    assert_eq!(*ci.builds_fetched.lock().expect("lock"), 3);
    assert_eq!(
        ctx.github_release.map(|r| r.html_url).as_deref(),
        Some("https://github.com/googleapis/google-cloud-ruby/releases/tag/1.2.3")
    );
}

#[tokio::test]
async fn test_typed_tag_when_branch_is_not_a_release_branch() {
    let github = storage_github();
    let ci = FakeCi::default();

    let ctx = run_session(&github, &ci, "2\n\nfoo-bar/v2.0.1\n")
        .await
        .expect("session succeeds");

    assert_eq!(ctx.package_name(), Some("foo-bar"));
    assert_eq!(ctx.release_version().map(|v| v.to_string()).as_deref(), Some("2.0.1"));
    assert_eq!(ctx.release_notes, "");
    assert_eq!(
        github.releases.lock().expect("lock")[0].name,
        "Release foo-bar 2.0.1"
    );
    assert_eq!(
        ci.looked_up.lock().expect("lock").as_slice(),
        &["foo-bar/v2.0.1".to_string()]
    );
}

#[tokio::test]
async fn test_malformed_typed_tag_aborts() {
    let github = storage_github();
    let ci = FakeCi::default();

    let err = run_session(&github, &ci, "2\nfoo-bar 2.0.1\n").await.unwrap_err();

    assert!(matches!(err, ReleaseError::Tag(TagError::InvalidTag { .. })));
    assert!(github.releases.lock().expect("lock").is_empty());
}

#[tokio::test]
async fn test_out_of_range_selection_fails() {
    for input in ["3\n", "0\n", "-1\n"] {
        let github = storage_github();
        let ci = FakeCi::default();

        let err = run_session(&github, &ci, input).await.unwrap_err();

        assert!(
            matches!(
                err,
                ReleaseError::Cli(CliError::InvalidSelection { available: 2, .. })
            ),
            "{input:?} should be rejected"
        );
    }
}

#[tokio::test]
async fn test_non_numeric_selection_reprompts() {
    let github = storage_github();
    let ci = FakeCi::default();

    let ctx = run_session(&github, &ci, "first\n1\n").await.expect("session succeeds");

    assert_eq!(ctx.release_pr.map(|p| p.number), Some(11));
}

#[tokio::test]
async fn test_no_ci_build_skips_polling() {
    let github = storage_github();
    let ci = FakeCi::default();

    let ctx = run_session(&github, &ci, "1\n").await.expect("session succeeds");

    assert!(ctx.github_release.is_some());
    assert_eq!(ci.looked_up.lock().expect("lock").len(), 1);
    assert_eq!(*ci.builds_fetched.lock().expect("lock"), 0);
}

#[tokio::test]
async fn test_no_release_pull_requests() {
    let github = FakeGitHub {
        pulls: vec![pull(1, "fix: typo", "typo")],
        ..FakeGitHub::default()
    };
    let ci = FakeCi::default();

    let err = run_session(&github, &ci, "1\n").await.unwrap_err();

    assert!(matches!(
        err,
        ReleaseError::Cli(CliError::NoReleasePullRequests { .. })
    ));
}

#[tokio::test]
async fn test_missing_changelog_aborts_before_release() {
    let mut github = storage_github();
    github.files.clear();
    let ci = FakeCi::default();

    let err = run_session(&github, &ci, "1\n").await.unwrap_err();

    assert!(matches!(
        err,
        ReleaseError::GitHub(GitHubError::Api { status: 404, .. })
    ));
    assert!(github.releases.lock().expect("lock").is_empty());
    assert!(ci.looked_up.lock().expect("lock").is_empty());
}

#[tokio::test]
async fn test_unmerged_pull_request_aborts() {
    let mut github = storage_github();
    github.pulls[1].merge_commit_sha = None;
    let ci = FakeCi::default();

    let err = run_session(&github, &ci, "1\n").await.unwrap_err();

    assert!(matches!(
        err,
        ReleaseError::GitHub(GitHubError::MissingMergeCommit { number: 11 })
    ));
}

#[tokio::test]
async fn test_closed_input_aborts() {
    let github = storage_github();
    let ci = FakeCi::default();

    let err = run_session(&github, &ci, "").await.unwrap_err();

    assert!(matches!(err, ReleaseError::Cli(CliError::InputClosed { .. })));
}

#[tokio::test]
async fn test_steps_out_of_order() {
    let github = storage_github();
    let ci = FakeCi::default();
    let repo = Repository::new("googleapis", "google-cloud-ruby");
    let config = RuntimeConfig::default();
    let mut session = ReleaseSession::new(
        &github,
        &ci,
        &repo,
        &config,
        Prompter::new(Cursor::new(String::new())),
    );

    let mut ctx = ReleaseContext::default();
    let err = session.get_release_notes(&mut ctx).await.unwrap_err();

    assert!(matches!(err, ReleaseError::Cli(CliError::StepOutOfOrder { .. })));
}
