//! Shell-like file and process operations for scripts and REPL sessions.
//!
//! Every operation takes positional arguments plus optional modifier flags,
//! either as a typed options struct or as a slice of [`Opt`] tags:
//!
//! ```no_run
//! use shellkit::{Opt, list_with, run_with};
//!
//! let sources = list_with(None, &[Opt::Pattern("**/*.rs".into())])?;
//! let lines = run_with("sort", &[Opt::Silent], &["b", "a"])?.lines;
//! # Ok::<(), shellkit::ShellError>(())
//! ```
//!
//! - **[`core`]**: pure option resolution and command-line splitting.
//! - **[`io`]**: listing, file operations, process execution, launcher and
//!   configuration.

pub mod core;
pub mod error;
pub mod exit_codes;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use crate::core::args::ProcessSpec;
pub use crate::core::options::{
    CopyOptions, EntryFilter, ListOptions, MoveOptions, Opt, RemoveOptions, RunOptions,
};
pub use crate::error::{Result, ShellError};
pub use crate::io::fs_ops::{
    append_lines, append_text, cd, copy, copy_with, mkdir, move_path, move_with, pwd, read_lines,
    read_text, remove, remove_with, touch, write_lines, write_text,
};
pub use crate::io::listing::{PatternMatcher, list, list_with};
pub use crate::io::open::{open, open_with};
pub use crate::io::process::{RunOutput, run, run_with, run_with_echo};
