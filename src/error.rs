//! Error types for the classdiff CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for classdiff operations.
///
/// Each variant maps to a specific exit code. The `publish` command
/// deliberately swallows `Resolution` and `Process` errors at the
/// orchestration boundary so a calling build is never aborted; the
/// direct-query commands (`branch`, `classes`) propagate them.
#[derive(Error, Debug)]
pub enum ClassDiffError {
    /// User provided invalid arguments or an unusable configuration.
    #[error("{0}")]
    User(String),

    /// Default-branch resolution produced no usable output.
    #[error("Default branch resolution failed: {0}")]
    Resolution(String),

    /// A subprocess could not be started, read, or finished in time.
    #[error("Subprocess failed: {0}")]
    Process(String),
}

impl ClassDiffError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            ClassDiffError::User(_) => exit_codes::USER_ERROR,
            ClassDiffError::Resolution(_) => exit_codes::RESOLUTION_FAILURE,
            ClassDiffError::Process(_) => exit_codes::PROCESS_FAILURE,
        }
    }
}

/// Result type alias for classdiff operations.
pub type Result<T> = std::result::Result<T, ClassDiffError>;
