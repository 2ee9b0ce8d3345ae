//! Modifier flags accepted by shellkit operations.
//!
//! Callers can either fill in a typed options struct directly or pass a slice
//! of [`Opt`] tags and let the operation resolve them. Resolution is
//! deterministic:
//!
//! - scalar tags (`Depth`, `PathOverride`) are last-specified-wins
//! - list tags (`Pattern`, `Exclude`, `ExtraArgs`) accumulate in order
//! - `FileOnly` together with `DirectoryOnly` is rejected, unless a `Pattern`
//!   or `Exclude` puts the listing in pattern mode where both are ignored
//! - tags an operation does not use are ignored

use std::path::PathBuf;

use crate::error::{Result, ShellError};

/// A single modifier flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Opt {
    Recurse,
    Depth(usize),
    DirectoryOnly,
    FileOnly,
    Force,
    Pattern(String),
    Exclude(String),
    PathOverride(PathBuf),
    Silent,
    NoCapture,
    ExtraArgs(Vec<String>),
}

/// Which entry kinds a listing reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EntryFilter {
    #[default]
    Both,
    FilesOnly,
    DirectoriesOnly,
}

impl EntryFilter {
    pub fn includes_dirs(self) -> bool {
        matches!(self, EntryFilter::Both | EntryFilter::DirectoriesOnly)
    }

    pub fn includes_files(self) -> bool {
        matches!(self, EntryFilter::Both | EntryFilter::FilesOnly)
    }
}

/// Resolved listing request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Root override; wins over the root passed positionally.
    pub path: Option<PathBuf>,
    pub patterns: Vec<String>,
    pub excludes: Vec<String>,
    pub filter: EntryFilter,
    pub recurse: bool,
    /// Extra levels to descend when `recurse` is set. `None` is unbounded.
    pub depth: Option<usize>,
}

impl ListOptions {
    pub fn from_opts(opts: &[Opt]) -> Result<Self> {
        let mut out = ListOptions::default();
        let mut files_only = false;
        let mut dirs_only = false;
        for opt in opts {
            match opt {
                Opt::Recurse => out.recurse = true,
                Opt::Depth(n) => out.depth = Some(*n),
                Opt::DirectoryOnly => dirs_only = true,
                Opt::FileOnly => files_only = true,
                Opt::Pattern(glob) => out.patterns.push(glob.clone()),
                Opt::Exclude(glob) => out.excludes.push(glob.clone()),
                Opt::PathOverride(path) => out.path = Some(path.clone()),
                Opt::Force | Opt::Silent | Opt::NoCapture | Opt::ExtraArgs(_) => {}
            }
        }
        // Pattern mode ignores the type filters, so there is nothing to conflict.
        if !out.uses_patterns() {
            out.filter = resolve_filter(files_only, dirs_only)?;
        }
        Ok(out)
    }

    /// Patterns take over the whole request when any include or exclude is set.
    pub fn uses_patterns(&self) -> bool {
        !self.patterns.is_empty() || !self.excludes.is_empty()
    }
}

fn resolve_filter(files_only: bool, dirs_only: bool) -> Result<EntryFilter> {
    match (files_only, dirs_only) {
        (true, true) => Err(ShellError::invalid_option(
            "FileOnly and DirectoryOnly are mutually exclusive",
        )),
        (true, false) => Ok(EntryFilter::FilesOnly),
        (false, true) => Ok(EntryFilter::DirectoriesOnly),
        (false, false) => Ok(EntryFilter::Both),
    }
}

/// Options for running a child process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Do not echo captured lines to the console.
    pub silent: bool,
    /// Pipe and collect stdout. When false the child inherits stdout and
    /// `silent` has nothing to act on.
    pub capture: bool,
    /// Explicit argv. When non-empty the command text is the program verbatim.
    pub extra_args: Vec<String>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            silent: false,
            capture: true,
            extra_args: Vec::new(),
        }
    }
}

impl RunOptions {
    pub fn from_opts(opts: &[Opt]) -> Result<Self> {
        let mut out = RunOptions::default();
        for opt in opts {
            match opt {
                Opt::Silent => out.silent = true,
                Opt::NoCapture => out.capture = false,
                Opt::ExtraArgs(values) => out.extra_args.extend(values.iter().cloned()),
                _ => {}
            }
        }
        Ok(out)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyOptions {
    /// Required to copy a directory tree.
    pub recurse: bool,
    /// Overwrite existing destination files.
    pub force: bool,
}

impl CopyOptions {
    pub fn from_opts(opts: &[Opt]) -> Result<Self> {
        Ok(Self {
            recurse: opts.contains(&Opt::Recurse),
            force: opts.contains(&Opt::Force),
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemoveOptions {
    pub recurse: bool,
    pub force: bool,
}

impl RemoveOptions {
    pub fn from_opts(opts: &[Opt]) -> Result<Self> {
        Ok(Self {
            recurse: opts.contains(&Opt::Recurse),
            force: opts.contains(&Opt::Force),
        })
    }

    /// Directories are removed with their contents.
    pub fn deletes_contents(&self) -> bool {
        self.recurse || self.force
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveOptions {
    /// Replace an existing destination.
    pub force: bool,
}

impl MoveOptions {
    pub fn from_opts(opts: &[Opt]) -> Result<Self> {
        Ok(Self {
            force: opts.contains(&Opt::Force),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_opts_resolve_to_defaults() {
        let opts = ListOptions::from_opts(&[]).expect("resolve");
        assert_eq!(opts, ListOptions::default());
        assert!(!opts.uses_patterns());
    }

    #[test]
    fn last_depth_wins() {
        let opts = ListOptions::from_opts(&[Opt::Recurse, Opt::Depth(5), Opt::Depth(1)])
            .expect("resolve");
        assert!(opts.recurse);
        assert_eq!(opts.depth, Some(1));
    }

    #[test]
    fn last_path_override_wins() {
        let opts = ListOptions::from_opts(&[
            Opt::PathOverride(PathBuf::from("/a")),
            Opt::PathOverride(PathBuf::from("/b")),
        ])
        .expect("resolve");
        assert_eq!(opts.path, Some(PathBuf::from("/b")));
    }

    #[test]
    fn file_and_directory_only_conflict() {
        let err = ListOptions::from_opts(&[Opt::FileOnly, Opt::DirectoryOnly])
            .expect_err("conflict");
        assert!(matches!(err, ShellError::InvalidOption { .. }));
    }

    #[test]
    fn filter_conflict_is_ignored_in_pattern_mode() {
        let opts = ListOptions::from_opts(&[
            Opt::FileOnly,
            Opt::DirectoryOnly,
            Opt::Pattern("**/*.txt".to_string()),
        ])
        .expect("resolve");
        assert!(opts.uses_patterns());
        assert_eq!(opts.filter, EntryFilter::Both);
    }

    #[test]
    fn patterns_and_excludes_accumulate_in_order() {
        let opts = ListOptions::from_opts(&[
            Opt::Pattern("*.rs".to_string()),
            Opt::Exclude("target/**".to_string()),
            Opt::Pattern("*.toml".to_string()),
        ])
        .expect("resolve");
        assert_eq!(opts.patterns, vec!["*.rs", "*.toml"]);
        assert_eq!(opts.excludes, vec!["target/**"]);
        assert!(opts.uses_patterns());
    }

    #[test]
    fn exclude_alone_switches_to_patterns() {
        let opts = ListOptions::from_opts(&[Opt::Exclude("*.log".to_string())]).expect("resolve");
        assert!(opts.uses_patterns());
    }

    #[test]
    fn run_options_capture_by_default() {
        let opts = RunOptions::from_opts(&[]).expect("resolve");
        assert!(opts.capture);
        assert!(!opts.silent);
    }

    #[test]
    fn run_options_collect_flags() {
        let opts = RunOptions::from_opts(&[
            Opt::Silent,
            Opt::NoCapture,
            Opt::ExtraArgs(vec!["a".to_string()]),
            Opt::ExtraArgs(vec!["b c".to_string()]),
            Opt::Recurse,
        ])
        .expect("resolve");
        assert!(opts.silent);
        assert!(!opts.capture);
        assert_eq!(opts.extra_args, vec!["a", "b c"]);
    }

    #[test]
    fn remove_force_deletes_contents() {
        let opts = RemoveOptions::from_opts(&[Opt::Force]).expect("resolve");
        assert!(opts.deletes_contents());
        assert!(!RemoveOptions::default().deletes_contents());
    }
}
