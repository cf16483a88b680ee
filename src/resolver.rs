//! Default-branch resolution and diff filtering.
//!
//! This is the core of classdiff: resolve the remote HEAD to a default
//! branch, run a name-status diff of the working tree against it, and map
//! the surviving production-source paths to compiled class names.
//!
//! The filter pipeline is deliberately naive: it transforms paths, it does
//! not understand source code. Nested classes and package renames are not
//! resolved, and rename diff entries are only status-filtered.

use crate::config::Config;
use crate::error::{ClassDiffError, Result};
use crate::exec::{ExecOutput, exec_lines};
use crate::host::BuildLog;
use globset::GlobSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// One parsed line of `git diff --name-status` output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffEntry<'a> {
    /// Status token (`A`, `M`, `D`, `R100`, ...).
    pub status: &'a str,
    /// Everything after the first tab.
    pub path: &'a str,
}

impl<'a> DiffEntry<'a> {
    /// Parse a `<status>\t<path>` line. Lines without a tab yield `None`.
    pub fn parse(line: &'a str) -> Option<Self> {
        let (status, path) = line.split_once('\t')?;
        Some(Self {
            status: status.trim(),
            path,
        })
    }

    /// True when the status token marks the file as deleted.
    pub fn is_deletion(&self) -> bool {
        self.status.starts_with('D')
    }
}

/// Resolves the default branch and computes the changed-class list.
///
/// One resolver serves one invocation: it holds the working directory and
/// the configuration and has no other state.
#[derive(Debug)]
pub struct DiffResolver {
    cwd: PathBuf,
    config: Config,
    excludes: GlobSet,
}

impl DiffResolver {
    /// Create a resolver rooted at `cwd`.
    ///
    /// # Returns
    ///
    /// * `Ok(DiffResolver)` - Config is usable
    /// * `Err(ClassDiffError::User)` - An exclude glob does not compile
    pub fn new<P: AsRef<Path>>(cwd: P, config: Config) -> Result<Self> {
        let excludes = config.exclude_globset()?;
        Ok(Self {
            cwd: cwd.as_ref().to_path_buf(),
            config,
            excludes,
        })
    }

    /// The configuration this resolver runs with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Resolve the remote default branch.
    ///
    /// Runs `git symbolic-ref <remote_head_ref>` and returns the first
    /// output line. More than one line is an anomaly: the first line is
    /// used and a warning is logged.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - Resolved ref name, e.g. `refs/remotes/origin/main`
    /// * `Err(ClassDiffError::Resolution)` - The command produced no output
    /// * `Err(ClassDiffError::Process)` - The command could not be run
    pub fn default_branch(&self, log: &dyn BuildLog) -> Result<String> {
        let cmd = format!("git symbolic-ref {}", self.config.remote_head_ref);
        let output = self.run(&cmd, log)?;
        Self::branch_from_lines(&cmd, &output.lines, log)
    }

    fn branch_from_lines(cmd: &str, lines: &[String], log: &dyn BuildLog) -> Result<String> {
        let Some(first) = lines.first() else {
            return Err(ClassDiffError::Resolution(format!(
                "no output from '{}' (is a remote HEAD configured? try: git remote set-head origin --auto)",
                cmd
            )));
        };
        if lines.len() > 1 {
            log.warn(&format!(
                "'{}' produced {} lines of output; using the first",
                cmd,
                lines.len()
            ));
        }
        Ok(first.clone())
    }

    /// Compute the changed-class identifiers relative to `default_branch`.
    ///
    /// Runs `git diff --name-status <default_branch>` against the working
    /// tree and applies the filter pipeline to each line. Output order is
    /// diff order; duplicates are preserved; the result may be empty.
    pub fn diff_classes(&self, default_branch: &str, log: &dyn BuildLog) -> Result<Vec<String>> {
        let cmd = format!("git diff --name-status {}", default_branch);
        let output = self.run(&cmd, log)?;
        Ok(self.classes_from_lines(output.lines.iter().map(String::as_str), log))
    }

    /// Apply the filter/transform pipeline to raw name-status lines.
    ///
    /// Kept separate from the subprocess call so the contract can be
    /// exercised against simulated diff output.
    pub fn classes_from_lines<'a, I>(&self, lines: I, log: &dyn BuildLog) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        lines
            .into_iter()
            .filter_map(|line| self.class_for_line(line, log))
            .collect()
    }

    /// Map one diff line to a class identifier, or drop it.
    ///
    /// Drops: non-source extensions, deletions, test-root paths, exclude
    /// matches, and paths missing the production-source root (the last is
    /// logged, since it usually means a layout the config does not cover).
    fn class_for_line(&self, line: &str, log: &dyn BuildLog) -> Option<String> {
        let entry = DiffEntry::parse(line)?;
        if !entry.path.ends_with(&self.config.source_extension) {
            return None;
        }
        if entry.is_deletion() {
            return None;
        }
        if entry.path.contains(&self.config.test_root) {
            return None;
        }
        if self.excludes.is_match(entry.path) {
            return None;
        }

        let Some(at) = entry.path.find(&self.config.source_root) else {
            log.warn(&format!(
                "changed source '{}' is outside '{}'; skipping",
                entry.path, self.config.source_root
            ));
            return None;
        };
        let relative = &entry.path[at + self.config.source_root.len()..];
        let stem = relative.strip_suffix(&self.config.source_extension)?;
        Some(format!("{}{}", stem, self.config.class_extension))
    }

    /// Run a command in the resolver's working directory.
    ///
    /// A non-zero exit is logged as an anomaly, not treated as an error:
    /// the pipeline consumes stdout lines only, and an unknown ref simply
    /// yields none.
    fn run(&self, cmd: &str, log: &dyn BuildLog) -> Result<ExecOutput> {
        let timeout = self.config.command_timeout_secs.map(Duration::from_secs);
        let output = exec_lines(&self.cwd, cmd, timeout)?;
        if !output.status.success() {
            log.warn(&format!("'{}' exited with {}", cmd, output.status));
        }
        Ok(output)
    }
}
