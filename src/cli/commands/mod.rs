//! Command execution.
//!
//! There is a single command: tag a release. Errors propagate to `main`, which
//! prints them with recovery suggestions.

mod helpers;
mod tag;

use crate::EnvConfig;
use crate::cli::{Args, RuntimeConfig};
use crate::error::Result;

use tag::execute_tag;

pub use tag::{ReleaseContext, ReleaseSession};

/// Execute the tagging session described by parsed arguments
pub async fn execute_command(args: Args) -> Result<i32> {
    // Validate arguments
    if let Err(validation_error) = args.validate() {
        let output = super::OutputManager::new(false);
        output.error(&format!("Invalid arguments: {}", validation_error));
        return Ok(1);
    }

    let config = RuntimeConfig::from(&args);
    let env_config = EnvConfig::from_env();

    execute_tag(&args, &config, &env_config).await?;
    Ok(0)
}
