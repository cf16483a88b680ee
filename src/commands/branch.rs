//! Implementation of the `classdiff branch` command.
//!
//! Prints the resolved default branch. Unlike `publish`, resolution
//! failures propagate to the exit code, since the caller asked for the
//! value directly.

use crate::cli::BranchArgs;
use crate::commands::build_resolver;
use crate::error::Result;
use crate::host::ConsoleLog;

/// Execute the `classdiff branch` command.
pub fn cmd_branch(args: BranchArgs) -> Result<()> {
    let resolver = build_resolver(args.dir, args.config)?;
    let branch = resolver.default_branch(&ConsoleLog)?;

    // Print just the ref (for scripting); anomalies went to stderr.
    println!("{}", branch);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClassDiffError;
    use crate::test_support::{create_java_repo, create_java_repo_with_remote_head};

    #[test]
    fn branch_resolves_in_repo_with_remote_head() {
        let temp_dir = create_java_repo_with_remote_head();
        let args = BranchArgs {
            dir: Some(temp_dir.path().to_path_buf()),
            config: None,
        };
        assert!(cmd_branch(args).is_ok());
    }

    #[test]
    fn branch_fails_without_remote_head() {
        let temp_dir = create_java_repo();
        let args = BranchArgs {
            dir: Some(temp_dir.path().to_path_buf()),
            config: None,
        };
        let result = cmd_branch(args);
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), ClassDiffError::Resolution(_)));
    }
}
