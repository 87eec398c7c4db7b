//! Command line interface for ruby_release_tag.
//!
//! Argument parsing, terminal output and prompts, and the tagging command itself.

mod args;
pub mod commands;
mod output;
mod prompt;

pub use args::{Args, RuntimeConfig};
pub use commands::execute_command;
pub use output::OutputManager;
pub use prompt::Prompter;

use crate::error::Result;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    execute_command(args).await
}
