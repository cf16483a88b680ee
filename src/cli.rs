//! CLI argument parsing for classdiff.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Classdiff: maps sources changed against the default branch to compiled class names.
///
/// Intended as a build-time helper: `publish` emits a single
/// `git.diff.classes=<comma-joined list>` property for a build process to
/// consume, scoping test or analysis runs to impacted classes.
#[derive(Parser, Debug)]
#[command(name = "classdiff")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for classdiff.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute the changed-class list and publish it as a property.
    ///
    /// Never fails the calling build: pipeline errors are logged as fatal
    /// and the property is simply not published.
    Publish(PublishArgs),

    /// Print the resolved default branch.
    Branch(BranchArgs),

    /// Print the changed-class identifiers, one per line.
    Classes(ClassesArgs),
}

/// Arguments for the `publish` command.
#[derive(Parser, Debug)]
pub struct PublishArgs {
    /// Repository directory to run in (defaults to the current directory).
    #[arg(short = 'C', long = "dir", value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Config file to use (defaults to classdiff.yaml in DIR when present).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Append the key=value property to this file instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `branch` command.
#[derive(Parser, Debug)]
pub struct BranchArgs {
    /// Repository directory to run in (defaults to the current directory).
    #[arg(short = 'C', long = "dir", value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Config file to use (defaults to classdiff.yaml in DIR when present).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Arguments for the `classes` command.
#[derive(Parser, Debug)]
pub struct ClassesArgs {
    /// Repository directory to run in (defaults to the current directory).
    #[arg(short = 'C', long = "dir", value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Config file to use (defaults to classdiff.yaml in DIR when present).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Diff against this ref instead of resolving the remote default branch.
    #[arg(long, value_name = "REF")]
    pub branch: Option<String>,

    /// Print the identifiers as a JSON array.
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
