//! `passforge` — thin command-line shell over `passforge-core` and
//! `passforge-presets`.
//!
//! The only place that reads the environment, initializes logging, and
//! touches the filesystem. Generated values go to stdout; logs and errors go
//! to stderr.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod cli;
pub mod commands;
pub mod logging;
pub mod paths;

use std::io;

use cli::{Cli, Commands};
use commands::Context;

/// Execute a parsed command line.
///
/// # Errors
///
/// Propagates the failing command's error for the caller to report.
pub fn run(cli: &Cli) -> anyhow::Result<()> {
    let ctx = Context::new(paths::data_dir(cli.data_dir.as_deref())?);
    tracing::debug!(data_dir = %ctx.data_dir.display(), "resolved data directory");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match &cli.command {
        Commands::Generate(args) => commands::generate::run(&ctx, args, &mut out),
        Commands::Score(args) => commands::score::run(args, &mut io::stdin().lock(), &mut out),
        Commands::Alphabet(args) => commands::alphabet::run(&ctx, args, &mut out),
        Commands::Preset(command) => commands::preset::run(&ctx, command, &mut out),
    }
}
