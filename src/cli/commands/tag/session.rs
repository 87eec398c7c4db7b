//! The tagging steps, run in order against one [`ReleaseContext`].

use super::ReleaseContext;
use crate::circleci::CiService;
use crate::cli::{Prompter, RuntimeConfig};
use crate::error::{CliError, GitHubError, Result};
use crate::github::{NewRelease, Repository, SourceHost};
use crate::release::{ReleaseTag, find_release_notes, release_candidates};
use std::io::BufRead;

/// One interactive tagging session.
///
/// Holds the collaborators each step talks to. No step retries; the first
/// error ends the session.
pub struct ReleaseSession<'a, G, C, R> {
    github: &'a G,
    circleci: &'a C,
    upstream_repo: &'a Repository,
    config: &'a RuntimeConfig,
    prompter: Prompter<R>,
}

impl<'a, G, C, R> ReleaseSession<'a, G, C, R>
where
    G: SourceHost,
    C: CiService,
    R: BufRead,
{
    /// Create a session against `upstream_repo`
    pub fn new(
        github: &'a G,
        circleci: &'a C,
        upstream_repo: &'a Repository,
        config: &'a RuntimeConfig,
        prompter: Prompter<R>,
    ) -> Self {
        Self {
            github,
            circleci,
            upstream_repo,
            config,
            prompter,
        }
    }

    /// Run every step and hand back what was determined
    pub async fn run(&mut self) -> Result<ReleaseContext> {
        let mut ctx = ReleaseContext::default();

        self.determine_release_pr(&mut ctx).await?;
        self.determine_release_tag(&mut ctx)?;
        self.get_release_notes(&mut ctx).await?;

        self.create_release(&mut ctx).await?;
        self.wait_on_circle(&ctx).await?;

        Ok(ctx)
    }

    /// Offer recently closed release pull requests and store the one picked
    pub async fn determine_release_pr(&mut self, ctx: &mut ReleaseContext) -> Result<()> {
        self.config
            .step_println("> Let's figure out which pull request corresponds to your release.")?;

        let pulls = self
            .github
            .list_pull_requests(self.upstream_repo, "closed")
            .await?;
        let candidates = release_candidates(pulls);
        if candidates.is_empty() {
            return Err(CliError::NoReleasePullRequests {
                repository: self.upstream_repo.to_string(),
            }
            .into());
        }

        self.config
            .println("> Please pick one of the following PRs:\n")?;
        for (n, pull) in candidates.iter().enumerate() {
            self.config
                .println(&format!("\t{}: {} ({})", n + 1, pull.title, pull.number))?;
        }

        let available = candidates.len();
        let selection = self
            .prompter
            .integer("\nWhich one do you want to tag and release?")?;
        let index = usize::try_from(selection)
            .ok()
            .filter(|n| (1..=available).contains(n))
            .ok_or(CliError::InvalidSelection {
                selection,
                available,
            })?;

        ctx.release_pr = candidates.into_iter().nth(index - 1);
        Ok(())
    }

    /// Derive package, version and tag from the head branch, asking the user
    /// when the branch is not a release branch
    pub fn determine_release_tag(&mut self, ctx: &mut ReleaseContext) -> Result<()> {
        self.config.step_println("> Determining the release tag.")?;

        let head_ref = ctx.require_pr("determine release tag")?.head.ref_name.clone();
        self.config
            .println(&format!("PR head ref is {}", head_ref))?;

        let tag = match ReleaseTag::from_head_ref(&head_ref) {
            Some(tag) => tag,
            None => {
                self.config.error_println(&format!(
                    "I couldn't determine what the release tag should be from the PR's head ref {}.",
                    head_ref
                ));
                let typed = self.prompter.line(
                    "What should the release tag be (for example, google-cloud-storage/v1.2.3)?",
                )?;
                self.determine_package_name_and_version(&typed)?
            }
        };

        self.config
            .println(&format!("Package name is {}", tag.package_name()))?;
        self.config
            .println(&format!("Package version is {}", tag.version()))?;
        self.config.println(&format!("Release tag is {}", tag))?;

        ctx.release_tag = Some(tag);
        Ok(())
    }

    fn determine_package_name_and_version(&self, typed_tag: &str) -> Result<ReleaseTag> {
        self.config.step_println(
            "> Determining the package name and version from your release tag.",
        )?;
        Ok(typed_tag.parse::<ReleaseTag>()?)
    }

    /// Pull the version's section out of `<package>/CHANGELOG.md` at the merge commit
    pub async fn get_release_notes(&mut self, ctx: &mut ReleaseContext) -> Result<()> {
        self.config.step_println("> Grabbing the release notes.")?;

        let pr = ctx.require_pr("get release notes")?;
        let tag = ctx.require_tag("get release notes")?;
        let merge_sha = pr
            .merge_commit_sha
            .as_deref()
            .ok_or(GitHubError::MissingMergeCommit { number: pr.number })?;

        let path = format!("{}/CHANGELOG.md", tag.package_name());
        let contents = self
            .github
            .get_contents(self.upstream_repo, &path, merge_sha)
            .await?;
        let changelog = std::str::from_utf8(&contents).map_err(|e| GitHubError::InvalidContent {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        let notes = find_release_notes(changelog, tag.version());
        self.config
            .println(&format!("Here's the release notes:\n\n{}\n", notes))?;

        ctx.release_notes = notes;
        Ok(())
    }

    /// Create the GitHub release and link it from the pull request
    pub async fn create_release(&mut self, ctx: &mut ReleaseContext) -> Result<()> {
        self.config.println("> Creating the release.")?;

        let pr = ctx.require_pr("create release")?;
        let tag = ctx.require_tag("create release")?;
        let merge_sha = pr
            .merge_commit_sha
            .clone()
            .ok_or(GitHubError::MissingMergeCommit { number: pr.number })?;
        let pr_number = pr.number;

        // The GitHub tag is the bare version; CI is matched on `<package>/v<version>`
        let new_release = NewRelease {
            tag_name: tag.version().to_string(),
            target_commitish: merge_sha,
            name: format!("Release {} {}", tag.package_name(), tag.version()),
            body: ctx.release_notes.clone(),
        };
        let release = self
            .github
            .create_release(self.upstream_repo, &new_release)
            .await?;

        let release_location = format!("Release is at {}", release.html_url);
        self.config.println(&release_location)?;
        self.config
            .println("CI will handle publishing the package to Rubygems.")?;

        self.github
            .create_pull_request_comment(self.upstream_repo, pr_number, &release_location)
            .await?;

        ctx.github_release = Some(release);
        Ok(())
    }

    /// Follow the CircleCI build for the tag until it finishes, if there is one
    pub async fn wait_on_circle(&mut self, ctx: &ReleaseContext) -> Result<()> {
        self.config
            .println("> Waiting for CircleCI to queue a release build")?;

        let tag_name = ctx.require_tag("wait on CircleCI")?.to_string();
        let Some(build) = self.circleci.get_latest_build_by_tag(&tag_name).await? else {
            self.config
                .println(&format!("CircleCI Build not found for tag {}...", tag_name))?;
            return Ok(());
        };

        self.config
            .println(&format!("CircleCI Build: {}", build.build_url))?;
        self.config
            .println("> Monitoring CircleCI for completion of release")?;
        self.config.println("")?;

        let mut statuses = self.circleci.get_build_status_generator(build.build_num);
        while let Some(state) = statuses.next().await? {
            self.config
                .status_line(&format!("CircleCI Build State: {}", state))?;
        }
        self.config.end_status_line()?;

        Ok(())
    }
}
