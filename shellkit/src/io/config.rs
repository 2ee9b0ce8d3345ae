//! CLI defaults stored in `.shellkit.toml`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

use crate::core::options::RunOptions;

pub const DEFAULT_CONFIG_FILE: &str = ".shellkit.toml";

/// Shellkit configuration (TOML).
///
/// Missing fields fall back to the same defaults the library uses.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ShellConfig {
    /// Do not echo captured process output.
    pub silent: bool,

    /// Capture process stdout. When false the child writes to the terminal.
    pub capture: bool,

    /// Launcher argv for `open` (e.g. `["code", "--reuse-window"]`).
    /// Empty means the platform default.
    pub launcher: Vec<String>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            silent: false,
            capture: true,
            launcher: Vec::new(),
        }
    }
}

impl ShellConfig {
    pub fn validate(&self) -> Result<()> {
        if self.launcher.first().is_some_and(|p| p.trim().is_empty()) {
            return Err(anyhow!("launcher program must not be blank"));
        }
        Ok(())
    }

    /// Baseline run options before command-line flags are applied.
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            silent: self.silent,
            capture: self.capture,
            extra_args: Vec::new(),
        }
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `ShellConfig::default()`.
pub fn load_config(path: &Path) -> Result<ShellConfig> {
    if !path.exists() {
        return Ok(ShellConfig::default());
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: ShellConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}
