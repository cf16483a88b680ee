//! Implementation of the `classdiff classes` command.
//!
//! Prints the changed-class identifiers, one per line or as a JSON array.
//! Errors propagate to the exit code; `--branch` skips default-branch
//! resolution entirely.

use crate::cli::ClassesArgs;
use crate::commands::build_resolver;
use crate::error::{ClassDiffError, Result};
use crate::host::ConsoleLog;

/// Execute the `classdiff classes` command.
pub fn cmd_classes(args: ClassesArgs) -> Result<()> {
    let resolver = build_resolver(args.dir, args.config)?;
    let log = ConsoleLog;

    let branch = match args.branch {
        Some(branch) => branch,
        None => resolver.default_branch(&log)?,
    };
    let classes = resolver.diff_classes(&branch, &log)?;

    if args.json {
        let rendered = serde_json::to_string(&classes).map_err(|e| {
            ClassDiffError::User(format!("failed to render class list as JSON: {}", e))
        })?;
        println!("{}", rendered);
    } else {
        for class in &classes {
            println!("{}", class);
        }
    }

    Ok(())
}
