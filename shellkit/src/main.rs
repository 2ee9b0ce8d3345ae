//! `shellkit`: shell-like file and process operations from the command line.

use std::io::BufRead;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use shellkit::io::config::{DEFAULT_CONFIG_FILE, load_config};
use shellkit::{
    CopyOptions, EntryFilter, ListOptions, MoveOptions, RemoveOptions, exit_codes, logging,
};
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "shellkit",
    version,
    about = "Shell-like file and process operations"
)]
struct Cli {
    /// Config file with defaults (missing file = built-in defaults).
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Change to this directory before running the command.
    #[arg(short = 'C', global = true, value_name = "DIR")]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List directory entries as absolute paths.
    Ls {
        path: Option<PathBuf>,
        /// Descend into subdirectories.
        #[arg(short, long)]
        recurse: bool,
        /// Extra levels to descend when recursing.
        #[arg(long)]
        depth: Option<usize>,
        /// Only report directories.
        #[arg(short = 'd', long = "dirs", conflicts_with = "files")]
        dirs: bool,
        /// Only report files.
        #[arg(short = 'f', long = "files")]
        files: bool,
        /// Include glob (repeatable). Overrides recursion and type filters.
        #[arg(short = 'p', long = "pattern", value_name = "GLOB")]
        patterns: Vec<String>,
        /// Exclude glob (repeatable).
        #[arg(short = 'x', long = "exclude", value_name = "GLOB")]
        excludes: Vec<String>,
        /// Print a JSON array instead of one path per line.
        #[arg(long)]
        json: bool,
    },
    /// Copy a file, or a directory with `-r`.
    Cp {
        src: PathBuf,
        dst: PathBuf,
        #[arg(short, long)]
        recurse: bool,
        /// Overwrite existing files.
        #[arg(long)]
        force: bool,
    },
    /// Remove a file or directory.
    Rm {
        path: PathBuf,
        /// Remove directory contents.
        #[arg(short, long)]
        recurse: bool,
        /// Same as `-r` for directories.
        #[arg(long)]
        force: bool,
    },
    /// Move or rename.
    Mv {
        src: PathBuf,
        dst: PathBuf,
        /// Replace an existing destination.
        #[arg(long)]
        force: bool,
    },
    /// Create an empty file or update its modification time.
    Touch { path: PathBuf },
    /// Create a directory and its parents.
    Mkdir { path: PathBuf },
    /// Print a file's lines.
    Cat { path: PathBuf },
    /// Write text to a file.
    Write {
        path: PathBuf,
        text: String,
        /// Append instead of replacing.
        #[arg(long)]
        append: bool,
    },
    /// Run a program, echoing its output live. Exits with the child's code.
    Run {
        /// Program, optionally followed by its arguments in one string.
        command: String,
        /// Capture output without echoing it.
        #[arg(short, long)]
        silent: bool,
        /// Let the child write to the terminal directly.
        #[arg(long)]
        no_capture: bool,
        /// Feed this file's lines to stdin (`-` reads shellkit's own stdin).
        #[arg(long, value_name = "FILE")]
        stdin_file: Option<PathBuf>,
        /// Explicit arguments; the command is then used as the program verbatim.
        #[arg(last = true)]
        args: Vec<String>,
    },
    /// Print the current directory.
    Pwd,
    /// Open a path with its associated application.
    Open { path: PathBuf },
}

fn main() {
    logging::init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::FAILURE);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    if let Some(dir) = &cli.dir {
        shellkit::cd(dir).with_context(|| format!("change directory to {}", dir.display()))?;
    }
    let config = load_config(&cli.config)?;
    debug!(?config, "config loaded");

    match cli.command {
        Command::Ls {
            path,
            recurse,
            depth,
            dirs,
            files,
            patterns,
            excludes,
            json,
        } => {
            let opts = ListOptions {
                path: None,
                patterns,
                excludes,
                filter: entry_filter(dirs, files),
                recurse,
                depth,
            };
            cmd_ls(path.as_deref(), &opts, json)
        }
        Command::Cp {
            src,
            dst,
            recurse,
            force,
        } => {
            shellkit::copy(&src, &dst, &CopyOptions { recurse, force })
                .with_context(|| format!("copy {} to {}", src.display(), dst.display()))?;
            Ok(exit_codes::OK)
        }
        Command::Rm {
            path,
            recurse,
            force,
        } => {
            shellkit::remove(&path, &RemoveOptions { recurse, force })
                .with_context(|| format!("remove {}", path.display()))?;
            Ok(exit_codes::OK)
        }
        Command::Mv { src, dst, force } => {
            shellkit::move_path(&src, &dst, &MoveOptions { force })
                .with_context(|| format!("move {} to {}", src.display(), dst.display()))?;
            Ok(exit_codes::OK)
        }
        Command::Touch { path } => {
            shellkit::touch(&path).with_context(|| format!("touch {}", path.display()))?;
            Ok(exit_codes::OK)
        }
        Command::Mkdir { path } => {
            shellkit::mkdir(&path).with_context(|| format!("mkdir {}", path.display()))?;
            Ok(exit_codes::OK)
        }
        Command::Cat { path } => {
            let lines =
                shellkit::read_lines(&path).with_context(|| format!("read {}", path.display()))?;
            for line in lines {
                println!("{line}");
            }
            Ok(exit_codes::OK)
        }
        Command::Write { path, text, append } => {
            let result = if append {
                shellkit::append_text(&path, &text)
            } else {
                shellkit::write_text(&path, &text)
            };
            result.with_context(|| format!("write {}", path.display()))?;
            Ok(exit_codes::OK)
        }
        Command::Run {
            command,
            silent,
            no_capture,
            stdin_file,
            args,
        } => {
            let mut opts = config.run_options();
            opts.silent |= silent;
            opts.capture &= !no_capture;
            opts.extra_args = args;
            let stdin_lines = match stdin_file {
                Some(path) => read_stdin_source(&path)?,
                None => Vec::new(),
            };
            cmd_run(&command, &opts, &stdin_lines)
        }
        Command::Pwd => {
            println!("{}", shellkit::pwd()?.display());
            Ok(exit_codes::OK)
        }
        Command::Open { path } => {
            shellkit::open_with(&path, &config.launcher)
                .with_context(|| format!("open {}", path.display()))?;
            Ok(exit_codes::OK)
        }
    }
}

fn entry_filter(dirs: bool, files: bool) -> EntryFilter {
    if dirs {
        EntryFilter::DirectoriesOnly
    } else if files {
        EntryFilter::FilesOnly
    } else {
        EntryFilter::Both
    }
}

fn cmd_ls(path: Option<&Path>, opts: &ListOptions, json: bool) -> Result<i32> {
    let entries = shellkit::list(path, opts).context("list directory")?;
    if json {
        let names: Vec<String> = entries
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&names).context("serialize listing")?
        );
    } else {
        for entry in &entries {
            println!("{}", entry.display());
        }
    }
    Ok(exit_codes::OK)
}

fn cmd_run(command: &str, opts: &shellkit::RunOptions, stdin_lines: &[String]) -> Result<i32> {
    let output = shellkit::run(command, opts, stdin_lines)
        .with_context(|| format!("run {command}"))?;
    Ok(output.code().unwrap_or(exit_codes::SIGNALED))
}

fn read_stdin_source(path: &Path) -> Result<Vec<String>> {
    if path == Path::new("-") {
        return std::io::stdin()
            .lock()
            .lines()
            .collect::<std::io::Result<Vec<_>>>()
            .context("read stdin");
    }
    shellkit::read_lines(path).with_context(|| format!("read {}", path.display()))
}
