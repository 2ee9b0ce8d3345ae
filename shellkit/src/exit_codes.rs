//! Exit codes for the `shellkit` binary.
//!
//! `shellkit run` exits with the child's own code instead.

/// Command succeeded.
pub const OK: i32 = 0;
/// Command failed (bad arguments, missing paths, spawn failures).
pub const FAILURE: i32 = 1;
/// Child process was terminated by a signal and has no exit code.
pub const SIGNALED: i32 = 128;
