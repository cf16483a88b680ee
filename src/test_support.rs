use crate::error::Result;
use crate::host::{BuildLog, PropertySink};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::{LazyLock, Mutex, MutexGuard};
use tempfile::TempDir;

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // Changing the process current working directory is global and not
        // thread-safe. Lock it so tests don't race even if a #[serial]
        // annotation is missed.
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

/// Log fake that records every message per severity channel.
#[derive(Default)]
pub(crate) struct RecordingLog {
    pub infos: RefCell<Vec<String>>,
    pub warnings: RefCell<Vec<String>>,
    pub fatals: RefCell<Vec<String>>,
}

impl BuildLog for RecordingLog {
    fn info(&self, message: &str) {
        self.infos.borrow_mut().push(message.to_string());
    }

    fn warn(&self, message: &str) {
        self.warnings.borrow_mut().push(message.to_string());
    }

    fn fatal_error(&self, message: &str, cause: &dyn std::error::Error) {
        self.fatals.borrow_mut().push(format!("{}: {}", message, cause));
    }
}

/// Property sink fake backed by a map.
#[derive(Default)]
pub(crate) struct MemoryProperties {
    pub values: BTreeMap<String, String>,
}

impl PropertySink for MemoryProperties {
    fn put(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Create a repo with a committed Java source layout and no remote.
pub(crate) fn create_java_repo() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path();

    git(path, &["init"]);
    // Deterministic default branch name across environments: point HEAD at
    // an unborn `main` branch before the first commit.
    git(path, &["symbolic-ref", "HEAD", "refs/heads/main"]);
    git(path, &["config", "user.email", "test@example.com"]);
    git(path, &["config", "user.name", "Test User"]);

    write_source(path, "src/main/java/se/ugli/App.java", "class App {}\n");
    write_source(path, "src/main/java/se/ugli/Gone.java", "class Gone {}\n");
    write_source(
        path,
        "src/test/java/se/ugli/AppTest.java",
        "class AppTest {}\n",
    );
    std::fs::write(path.join("README.md"), "# Test\n").unwrap();

    git(path, &["add", "."]);
    git(path, &["commit", "-m", "Initial commit"]);

    temp_dir
}

/// Create a Java repo whose `origin` remote HEAD resolves to `main`.
///
/// The remote points back at the repo itself, which is enough for
/// `git symbolic-ref refs/remotes/origin/HEAD` to resolve.
pub(crate) fn create_java_repo_with_remote_head() -> TempDir {
    let temp_dir = create_java_repo();
    let path = temp_dir.path();

    let path_str = path.to_string_lossy().to_string();
    git(path, &["remote", "add", "origin", &path_str]);
    git(path, &["fetch", "origin"]);
    git(
        path,
        &[
            "symbolic-ref",
            "refs/remotes/origin/HEAD",
            "refs/remotes/origin/main",
        ],
    );

    temp_dir
}

/// Write a source file under the repo, creating parent directories.
pub(crate) fn write_source(repo: &Path, relative: &str, content: &str) {
    let target = repo.join(relative);
    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(target, content).unwrap();
}

/// Write a new source file and stage it, so it shows up in the diff as `A`.
pub(crate) fn stage_file(repo: &Path, relative: &str, content: &str) {
    write_source(repo, relative, content);
    git(repo, &["add", relative]);
}

pub(crate) fn git(repo_dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .current_dir(repo_dir)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to execute git {}: {}", args.join(" "), e));

    if !output.status.success() {
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!(
            "git {} failed (exit code {:?})\nstdout:\n{}\nstderr:\n{}",
            args.join(" "),
            output.status.code(),
            stdout,
            stderr
        );
    }
}
