//! Side-effecting operations: file system, processes and configuration.

pub mod config;
pub mod fs_ops;
pub mod listing;
pub mod open;
pub mod process;
