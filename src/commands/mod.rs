//! Command implementations for classdiff.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations, plus the shared resolver construction used by all of
//! them.

mod branch;
mod classes;
mod publish;

use crate::cli::Command;
use crate::config::Config;
use crate::error::{ClassDiffError, Result};
use crate::resolver::DiffResolver;
use std::env;
use std::path::PathBuf;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Publish(args) => publish::cmd_publish(args),
        Command::Branch(args) => branch::cmd_branch(args),
        Command::Classes(args) => classes::cmd_classes(args),
    }
}

/// Build a resolver from the shared `--dir`/`--config` arguments.
///
/// With no `--dir`, the current working directory is used. With no
/// `--config`, a `classdiff.yaml` in the directory is honored when present
/// and built-in defaults apply otherwise.
pub(crate) fn build_resolver(
    dir: Option<PathBuf>,
    config: Option<PathBuf>,
) -> Result<DiffResolver> {
    let cwd = match dir {
        Some(dir) => dir,
        None => env::current_dir().map_err(|e| {
            ClassDiffError::User(format!("failed to get current working directory: {}", e))
        })?,
    };

    let config = match config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(&cwd)?,
    };

    DiffResolver::new(cwd, config)
}
