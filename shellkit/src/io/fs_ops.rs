//! Pass-through file operations: copy, remove, move, touch and file contents.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::{debug, instrument};
use walkdir::WalkDir;

use crate::core::options::{CopyOptions, MoveOptions, Opt, RemoveOptions};
use crate::error::{Result, ShellError};
use crate::io::listing::walk_error;

/// Copy a file, or a directory tree when `recurse` is set.
///
/// A file copied onto an existing directory lands inside it under its own
/// name. A directory copy creates `dst` if needed and merges the source tree
/// into it. Existing files are only replaced with `force`.
#[instrument(skip_all, fields(src = %src.display(), dst = %dst.display()))]
pub fn copy(src: &Path, dst: &Path, opts: &CopyOptions) -> Result<()> {
    let metadata = fs::metadata(src).map_err(|e| ShellError::from_io(src, e))?;
    if metadata.is_dir() {
        if !opts.recurse {
            return Err(ShellError::invalid_option(format!(
                "{} is a directory; copying it requires Recurse",
                src.display()
            )));
        }
        return copy_tree(src, dst, opts.force);
    }

    let target = if dst.is_dir() {
        dst.join(file_name(src)?)
    } else {
        dst.to_path_buf()
    };
    copy_file(src, &target, opts.force)
}

pub fn copy_with(src: &Path, dst: &Path, opts: &[Opt]) -> Result<()> {
    copy(src, dst, &CopyOptions::from_opts(opts)?)
}

fn copy_file(src: &Path, dst: &Path, force: bool) -> Result<()> {
    if dst.exists() {
        if !force {
            return Err(ShellError::AlreadyExists {
                path: dst.to_path_buf(),
            });
        }
        // `fs::copy` truncates the destination before reading the source.
        reject_same_file(src, dst)?;
    }
    let bytes = fs::copy(src, dst).map_err(|e| ShellError::from_io(dst, e))?;
    debug!(src = %src.display(), dst = %dst.display(), bytes, "copied file");
    Ok(())
}

fn copy_tree(src: &Path, dst: &Path, force: bool) -> Result<()> {
    let src_abs = std::path::absolute(src).map_err(|e| ShellError::from_io(src, e))?;
    let dst_abs = std::path::absolute(dst).map_err(|e| ShellError::from_io(dst, e))?;
    if dst_abs.starts_with(&src_abs) {
        return Err(ShellError::invalid_option(format!(
            "cannot copy {} into itself",
            src.display()
        )));
    }

    fs::create_dir_all(dst).map_err(|e| ShellError::from_io(dst, e))?;
    for entry in WalkDir::new(src).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| walk_error(src, e))?;
        let relative = entry.path().strip_prefix(src).unwrap_or(entry.path());
        let target = dst.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| ShellError::from_io(&target, e))?;
        } else {
            copy_file(entry.path(), &target, force)?;
        }
    }
    Ok(())
}

/// Remove a file or directory.
///
/// Directories are removed with their contents only when `recurse` or `force`
/// is set; otherwise a non-empty directory is an error.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn remove(path: &Path, opts: &RemoveOptions) -> Result<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| ShellError::from_io(path, e))?;
    let result = if metadata.is_dir() {
        if opts.deletes_contents() {
            fs::remove_dir_all(path)
        } else {
            fs::remove_dir(path)
        }
    } else {
        fs::remove_file(path)
    };
    result.map_err(|e| ShellError::from_io(path, e))?;
    debug!(dir = metadata.is_dir(), "removed");
    Ok(())
}

pub fn remove_with(path: &Path, opts: &[Opt]) -> Result<()> {
    remove(path, &RemoveOptions::from_opts(opts)?)
}

/// Move or rename `src`. Moving onto an existing directory moves into it.
#[instrument(skip_all, fields(src = %src.display(), dst = %dst.display()))]
pub fn move_path(src: &Path, dst: &Path, opts: &MoveOptions) -> Result<()> {
    fs::symlink_metadata(src).map_err(|e| ShellError::from_io(src, e))?;
    let target = if dst.is_dir() {
        dst.join(file_name(src)?)
    } else {
        dst.to_path_buf()
    };

    if fs::symlink_metadata(&target).is_ok() {
        if !opts.force {
            return Err(ShellError::AlreadyExists { path: target });
        }
        reject_same_file(src, &target)?;
        debug!(target = %target.display(), "replacing existing destination");
        remove(
            &target,
            &RemoveOptions {
                recurse: true,
                force: true,
            },
        )?;
    }
    fs::rename(src, &target).map_err(|e| ShellError::from_io(&target, e))?;
    Ok(())
}

pub fn move_with(src: &Path, dst: &Path, opts: &[Opt]) -> Result<()> {
    move_path(src, dst, &MoveOptions::from_opts(opts)?)
}

/// Create an empty file, or bump the modification time of an existing one.
pub fn touch(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| ShellError::from_io(path, e))?;
    file.set_modified(SystemTime::now()).map_err(|e| ShellError::from_io(path, e))
}

/// Create a directory and any missing parents.
pub fn mkdir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| ShellError::from_io(path, e))
}

pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| ShellError::from_io(path, e))
}

/// File contents split into lines without terminators.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    Ok(read_text(path)?.lines().map(str::to_string).collect())
}

pub fn write_text(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).map_err(|e| ShellError::from_io(path, e))
}

/// Write lines, each terminated with `\n`.
pub fn write_lines<S: AsRef<str>>(path: &Path, lines: &[S]) -> Result<()> {
    write_text(path, &join_lines(lines))
}

pub fn append_text(path: &Path, text: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| ShellError::from_io(path, e))?;
    file.write_all(text.as_bytes()).map_err(|e| ShellError::from_io(path, e))
}

pub fn append_lines<S: AsRef<str>>(path: &Path, lines: &[S]) -> Result<()> {
    append_text(path, &join_lines(lines))
}

fn join_lines<S: AsRef<str>>(lines: &[S]) -> String {
    let mut buf = String::new();
    for line in lines {
        buf.push_str(line.as_ref());
        buf.push('\n');
    }
    buf
}

/// Change the process-wide current directory. There is no way back other
/// than calling `cd` again.
pub fn cd(path: &Path) -> Result<()> {
    std::env::set_current_dir(path).map_err(|e| ShellError::from_io(path, e))?;
    debug!(path = %path.display(), "changed directory");
    Ok(())
}

pub fn pwd() -> Result<PathBuf> {
    std::env::current_dir().map_err(|e| ShellError::io("read current directory", e))
}

fn reject_same_file(src: &Path, dst: &Path) -> Result<()> {
    if same_file(src, dst) {
        return Err(ShellError::invalid_option(format!(
            "{} and {} are the same file",
            src.display(),
            dst.display()
        )));
    }
    Ok(())
}

/// Both paths exist and resolve to one file (symlinks and hard links included).
#[cfg(unix)]
fn same_file(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;

    match (fs::metadata(a), fs::metadata(b)) {
        (Ok(a), Ok(b)) => a.dev() == b.dev() && a.ino() == b.ino(),
        _ => false,
    }
}

#[cfg(not(unix))]
fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn file_name(path: &Path) -> Result<&std::ffi::OsStr> {
    path.file_name().ok_or_else(|| {
        ShellError::invalid_option(format!("{} has no file name", path.display()))
    })
}
