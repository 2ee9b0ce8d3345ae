//! Pure option resolution and command parsing. No I/O.

pub mod args;
pub mod options;
