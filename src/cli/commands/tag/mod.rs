//! Tag command: turn a merged release pull request into a GitHub release and
//! watch the CircleCI build that publishes the gem.

mod context;
mod session;

#[cfg(test)]
mod tests;

pub use context::ReleaseContext;
pub use session::ReleaseSession;

use super::helpers::{current_user, setup_github_context};
use crate::EnvConfig;
use crate::circleci::CircleCiClient;
use crate::cli::{Args, Prompter, RuntimeConfig};
use crate::config::TagConfig;
use crate::error::Result;
use crate::github::GitHubClient;

/// Execute the tag command
pub(super) async fn execute_tag(
    args: &Args,
    config: &RuntimeConfig,
    env_config: &EnvConfig,
) -> Result<()> {
    let tag_config = TagConfig::from(args);

    config.banner_println(&format!(
        "o/ Hey, {}, let's tag a Ruby release!",
        current_user(env_config)
    ))?;

    let github_context = setup_github_context(&tag_config, env_config).await?;
    config.verbose_println(&format!(
        "Upstream repository: {}",
        github_context.upstream_repo
    ))?;

    let github = GitHubClient::new(&github_context.token, &tag_config.github_api_url)?;
    let circleci = CircleCiClient::new(
        &github_context.upstream_repo,
        &tag_config.circleci_api_url,
        env_config.get("CIRCLE_TOKEN").as_deref(),
    )?
    .with_poll_interval(tag_config.poll_interval)
    .with_lookup_attempts(tag_config.lookup_attempts);

    let mut session = ReleaseSession::new(
        &github,
        &circleci,
        &github_context.upstream_repo,
        config,
        Prompter::stdin(),
    );
    let ctx = session.run().await?;

    if let Some(release) = &ctx.github_release {
        log::info!("Tagged {} at {}", release.tag_name, release.html_url);
    }
    config.banner_println("\\o/ All done!")?;
    Ok(())
}
