//! Build-host capability traits and their CLI-side implementations.
//!
//! The resolver never talks to a build tool directly. It sees two narrow
//! collaborators, both injected explicitly: a key-value property sink it
//! writes one value into, and a logging sink with the severity channels a
//! build host exposes. The CLI implements both for scripting use.

use crate::error::{ClassDiffError, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Write-only key-value configuration sink supplied by the build host.
pub trait PropertySink {
    /// Publish `value` under `key`.
    fn put(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Logging sink supplied by the build host.
pub trait BuildLog {
    /// Routine progress messages.
    fn info(&self, message: &str);

    /// Anomalies that do not stop processing.
    fn warn(&self, message: &str);

    /// Unrecoverable failure, with its underlying cause.
    fn fatal_error(&self, message: &str, cause: &dyn std::error::Error);
}

/// Console logger: info to stdout, warnings and fatal errors to stderr.
pub struct ConsoleLog;

impl BuildLog for ConsoleLog {
    fn info(&self, message: &str) {
        println!("[INFO] {}", message);
    }

    fn warn(&self, message: &str) {
        eprintln!("[WARNING] {}", message);
    }

    fn fatal_error(&self, message: &str, cause: &dyn std::error::Error) {
        eprintln!("[FATAL] {}: {}", message, cause);
    }
}

/// Property sink that prints `key=value` to stdout.
pub struct StdoutProperties;

impl PropertySink for StdoutProperties {
    fn put(&mut self, key: &str, value: &str) -> Result<()> {
        println!("{}={}", key, value);
        Ok(())
    }
}

/// Property sink that appends `key=value` lines to a file.
///
/// Append mode lets several tools share one properties file, the same way
/// CI output files are accumulated.
pub struct PropertiesFile {
    path: PathBuf,
}

impl PropertiesFile {
    /// Create a sink writing to `path`. The file is created on first `put`.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

impl PropertySink for PropertiesFile {
    fn put(&mut self, key: &str, value: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                ClassDiffError::User(format!(
                    "failed to open properties file '{}': {}",
                    self.path.display(),
                    e
                ))
            })?;

        writeln!(file, "{}={}", key, value).map_err(|e| {
            ClassDiffError::User(format!(
                "failed to write properties file '{}': {}",
                self.path.display(),
                e
            ))
        })
    }
}
