//! Opening a path with the platform's associated application.

use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};

use tracing::{debug, error, warn};

use crate::error::{Result, ShellError};

/// Launcher argv (without the path) for the current platform.
pub fn default_launcher() -> Vec<String> {
    if cfg!(target_os = "windows") {
        vec![
            "cmd".to_string(),
            "/C".to_string(),
            "start".to_string(),
            String::new(),
        ]
    } else if cfg!(target_os = "macos") {
        vec!["open".to_string()]
    } else {
        vec!["xdg-open".to_string()]
    }
}

/// Open `path` with its associated program. Does not wait for it to exit.
pub fn open(path: &Path) -> Result<()> {
    open_with(path, &default_launcher())
}

/// Open `path` with an explicit launcher argv; an empty one means the default.
pub fn open_with(path: &Path, launcher: &[String]) -> Result<()> {
    if !path.exists() {
        return Err(ShellError::PathNotFound {
            path: path.to_path_buf(),
        });
    }
    let default;
    let launcher: &[String] = if launcher.is_empty() {
        default = default_launcher();
        &default
    } else {
        launcher
    };
    let (program, args) = launcher
        .split_first()
        .ok_or_else(|| ShellError::invalid_option("launcher must not be empty"))?;

    launch(program, args, path)?;
    Ok(())
}

/// Spawn the launcher and reap it on a detached thread so it never lingers as
/// a zombie. The handle yields the exit status once the launcher is done.
fn launch(
    program: &str,
    args: &[String],
    path: &Path,
) -> Result<JoinHandle<Option<ExitStatus>>> {
    debug!(program = %program, path = %path.display(), "opening with launcher");
    let mut child = Command::new(program)
        .args(args)
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| {
            error!(program = %program, err = %e, "failed to spawn launcher");
            ShellError::ProcessStart {
                program: program.to_string(),
                source: e,
            }
        })?;

    let program = program.to_string();
    Ok(thread::spawn(move || match child.wait() {
        Ok(status) => {
            debug!(program = %program, ?status, "launcher exited");
            Some(status)
        }
        Err(e) => {
            warn!(program = %program, err = %e, "failed to wait for launcher");
            None
        }
    }))
}
