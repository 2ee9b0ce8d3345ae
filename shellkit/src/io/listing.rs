//! Directory listing: filtered, depth-bounded tree walks and glob matching.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use tracing::{debug, instrument};
use walkdir::WalkDir;

use crate::core::options::{ListOptions, Opt};
use crate::error::{Result, ShellError};

/// List entries under `root` (or the current directory) as absolute paths.
///
/// Each directory contributes its subdirectories first and then its files,
/// both sorted by name. When recursing, a subtree's entries follow the entries
/// of the level above it. Glob patterns, when present, replace the tree walk
/// entirely and `recurse`, `depth` and `filter` have no effect.
#[instrument(skip_all, fields(recurse = opts.recurse, depth = ?opts.depth, patterns = opts.uses_patterns()))]
pub fn list(root: Option<&Path>, opts: &ListOptions) -> Result<Vec<PathBuf>> {
    let root = resolve_root(root, opts)?;
    let metadata = fs::metadata(&root).map_err(|e| ShellError::from_io(&root, e))?;
    if !metadata.is_dir() {
        return Err(ShellError::io(
            format!("not a directory: {}", root.display()),
            io::Error::other("not a directory"),
        ));
    }

    let entries = if opts.uses_patterns() {
        PatternMatcher::new(&opts.patterns, &opts.excludes)?.collect(&root)?
    } else {
        walk_tree(&root, opts)?
    };
    debug!(root = %root.display(), count = entries.len(), "listing finished");
    Ok(entries)
}

/// [`list`] with options resolved from flag tags.
pub fn list_with(root: Option<&Path>, opts: &[Opt]) -> Result<Vec<PathBuf>> {
    list(root, &ListOptions::from_opts(opts)?)
}

fn resolve_root(root: Option<&Path>, opts: &ListOptions) -> Result<PathBuf> {
    let chosen = match (opts.path.as_deref(), root) {
        (Some(path), _) | (None, Some(path)) => path.to_path_buf(),
        (None, None) => {
            std::env::current_dir().map_err(|e| ShellError::io("read current directory", e))?
        }
    };
    std::path::absolute(&chosen).map_err(|e| ShellError::from_io(&chosen, e))
}

/// Pre-order walk over an explicit stack of `(dir, remaining_depth)`.
fn walk_tree(root: &Path, opts: &ListOptions) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    let mut stack = vec![(root.to_path_buf(), opts.depth)];

    while let Some((dir, remaining)) = stack.pop() {
        let (dirs, files) = read_children(&dir)?;
        if opts.filter.includes_dirs() {
            out.extend(dirs.iter().cloned());
        }
        if opts.filter.includes_files() {
            out.extend(files);
        }

        if !opts.recurse || remaining == Some(0) {
            continue;
        }
        let next = remaining.map(|n| n - 1);
        // Reversed so the first subdirectory is popped first.
        for sub in dirs.into_iter().rev() {
            stack.push((sub, next));
        }
    }
    Ok(out)
}

/// Immediate children of `dir`, split into (directories, files), each sorted.
fn read_children(dir: &Path) -> Result<(Vec<PathBuf>, Vec<PathBuf>)> {
    let mut dirs = Vec::new();
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| ShellError::from_io(dir, e))? {
        let entry = entry.map_err(|e| ShellError::from_io(dir, e))?;
        let path = entry.path();
        // Follows symlinks; a dangling link is reported as a file.
        let is_dir = fs::metadata(&path).is_ok_and(|m| m.is_dir());
        if is_dir {
            dirs.push(path);
        } else {
            files.push(path);
        }
    }
    dirs.sort();
    files.sort();
    Ok((dirs, files))
}

/// Include/exclude glob sets matched against root-relative paths.
///
/// `/` is a literal separator, so `*.txt` only matches top-level entries while
/// `**/*.txt` matches at any depth.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    includes: GlobSet,
    excludes: GlobSet,
}

impl PatternMatcher {
    /// An empty include list matches everything.
    pub fn new(patterns: &[String], excludes: &[String]) -> Result<Self> {
        let includes = if patterns.is_empty() {
            build_set(&["**".to_string()])?
        } else {
            build_set(patterns)?
        };
        Ok(Self {
            includes,
            excludes: build_set(excludes)?,
        })
    }

    pub fn is_match(&self, relative: &Path) -> bool {
        self.includes.is_match(relative) && !self.excludes.is_match(relative)
    }

    /// All matching entries below `root`, in name-sorted walk order.
    pub fn collect(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let mut out = Vec::new();
        let walker = WalkDir::new(root)
            .min_depth(1)
            .follow_links(true)
            .sort_by_file_name();
        for entry in walker {
            let entry = entry.map_err(|e| walk_error(root, e))?;
            let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
            if self.is_match(relative) {
                out.push(entry.into_path());
            }
        }
        Ok(out)
    }
}

fn build_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|source| ShellError::Pattern {
                pattern: pattern.clone(),
                source,
            })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| ShellError::Pattern {
        pattern: patterns.join(", "),
        source,
    })
}

pub(crate) fn walk_error(root: &Path, err: walkdir::Error) -> ShellError {
    let path = err.path().unwrap_or(root).to_path_buf();
    match err.into_io_error() {
        Some(io_err) => ShellError::from_io(&path, io_err),
        None => ShellError::io(
            format!("filesystem loop at {}", path.display()),
            io::Error::other("filesystem loop"),
        ),
    }
}
