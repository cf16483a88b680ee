//! Subprocess runner for classdiff.
//!
//! Commands are given as single strings (the way they appear in build logs),
//! parsed with shell-words, and executed with stdout captured line by line.
//! Stderr is inherited so diagnostics from git flow through to the host
//! console. The child handle is reaped on every exit path, including read
//! failures and timeouts.

use crate::error::{ClassDiffError, Result};
use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Captured result of a completed subprocess.
#[derive(Debug)]
pub struct ExecOutput {
    /// Stdout split into lines, in emission order.
    pub lines: Vec<String>,
    /// Exit status of the process. A non-zero status is not an error here;
    /// callers decide whether it matters.
    pub status: ExitStatus,
}

/// Reaps the child process when dropped.
///
/// Kills the child first if it is still running, so a read failure or panic
/// cannot leak a subprocess.
struct ChildGuard(Arc<Mutex<Child>>);

impl Drop for ChildGuard {
    fn drop(&mut self) {
        let mut child = lock_child(&self.0);
        if let Ok(None) = child.try_wait() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

fn lock_child(child: &Arc<Mutex<Child>>) -> MutexGuard<'_, Child> {
    child.lock().unwrap_or_else(|poison| poison.into_inner())
}

/// Run a command and capture its stdout as lines.
///
/// Blocks the calling thread until the process exits. Stdout is read on the
/// calling thread while the process runs, so large output cannot fill the
/// pipe buffer and stall the child.
///
/// # Arguments
///
/// * `cwd` - Working directory for the command
/// * `command` - Full command string, e.g. `git diff --name-status origin/main`
/// * `timeout` - Optional wall-clock limit; the child is killed when exceeded
///
/// # Returns
///
/// * `Ok(ExecOutput)` - Process exited (any exit status) and stdout was read
/// * `Err(ClassDiffError::Process)` - Parse, spawn, read, or timeout failure
pub fn exec_lines<P: AsRef<Path>>(
    cwd: P,
    command: &str,
    timeout: Option<Duration>,
) -> Result<ExecOutput> {
    let argv = shell_words::split(command).map_err(|e| {
        ClassDiffError::Process(format!("failed to parse command '{}': {}", command, e))
    })?;
    let (program, args) = argv.split_first().ok_or_else(|| {
        ClassDiffError::Process(format!("command is empty after parsing: '{}'", command))
    })?;

    let mut child = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|e| {
            ClassDiffError::Process(format!(
                "failed to execute '{}': {} (is '{}' installed and on PATH?)",
                command, e, program
            ))
        })?;

    let mut stdout = child
        .stdout
        .take()
        .ok_or_else(|| ClassDiffError::Process(format!("no stdout pipe for '{}'", command)))?;

    let child = Arc::new(Mutex::new(child));
    let _guard = ChildGuard(Arc::clone(&child));
    let (done_tx, watchdog) = spawn_watchdog(&child, timeout);

    let mut buf = String::new();
    let read_result = stdout.read_to_string(&mut buf);
    let _ = done_tx.send(());

    read_result.map_err(|e| {
        ClassDiffError::Process(format!("failed to read output of '{}': {}", command, e))
    })?;

    let timed_out = match watchdog {
        Some(handle) => handle.join().unwrap_or(false),
        None => false,
    };
    if timed_out {
        let secs = timeout.map(|limit| limit.as_secs()).unwrap_or_default();
        return Err(ClassDiffError::Process(format!(
            "'{}' timed out after {}s",
            command, secs
        )));
    }

    let status = lock_child(&child)
        .wait()
        .map_err(|e| ClassDiffError::Process(format!("failed to wait for '{}': {}", command, e)))?;

    let lines = buf.lines().map(str::to_string).collect();
    Ok(ExecOutput { lines, status })
}

/// Spawn the timeout watchdog, if a limit is set.
///
/// The watchdog kills the child when the limit elapses before the sender
/// signals completion. The returned handle yields true when a kill happened.
fn spawn_watchdog(
    child: &Arc<Mutex<Child>>,
    timeout: Option<Duration>,
) -> (mpsc::Sender<()>, Option<JoinHandle<bool>>) {
    let (done_tx, done_rx) = mpsc::channel();
    let handle = timeout.map(|limit| {
        let child = Arc::clone(child);
        thread::spawn(move || match done_rx.recv_timeout(limit) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => false,
            Err(RecvTimeoutError::Timeout) => {
                let _ = lock_child(&child).kill();
                true
            }
        })
    });
    (done_tx, handle)
}
