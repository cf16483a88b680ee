//! Exit code constants for the classdiff CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, unusable config)
//! - 2: Default-branch resolution failure
//! - 3: Subprocess failure

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments or an unreadable/invalid configuration.
pub const USER_ERROR: i32 = 1;

/// Default-branch resolution failure: no remote HEAD output.
pub const RESOLUTION_FAILURE: i32 = 2;

/// Subprocess failure: spawn, output read, or timeout.
pub const PROCESS_FAILURE: i32 = 3;
