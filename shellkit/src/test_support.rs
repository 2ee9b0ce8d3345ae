//! Test-only helpers for building throwaway directory trees.

use std::fs;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

/// A temporary directory tree removed on drop.
pub struct TestTree {
    dir: TempDir,
}

impl TestTree {
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("create tempdir")?;
        Ok(Self { dir })
    }

    /// The reference layout used across listing tests:
    ///
    /// ```text
    /// a.txt
    /// sub/
    /// ├── b.txt
    /// └── sub2/
    ///     └── c.txt
    /// ```
    pub fn project() -> Result<Self> {
        let tree = Self::new()?;
        tree.file("a.txt", "a\n")?;
        tree.file("sub/b.txt", "b\n")?;
        tree.file("sub/sub2/c.txt", "c\n")?;
        Ok(tree)
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn abs(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    /// Write a file, creating parent directories as needed.
    pub fn file(&self, rel: &str, contents: &str) -> Result<PathBuf> {
        let path = self.abs(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create {}", parent.display()))?;
        }
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
        Ok(path)
    }

    pub fn dir(&self, rel: &str) -> Result<PathBuf> {
        let path = self.abs(rel);
        fs::create_dir_all(&path).with_context(|| format!("create {}", path.display()))?;
        Ok(path)
    }

    /// `path` relative to the tree root, `/`-separated on every platform.
    pub fn relative(&self, path: &Path) -> String {
        let rel = path.strip_prefix(self.dir.path()).unwrap_or(path);
        rel.components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/")
    }
}
