//! Running child processes with line-oriented stdin and live stdout capture.
//!
//! Stdin is written and stdout is drained on separate scoped threads, so a
//! child that produces a lot of output before consuming all of its input
//! cannot deadlock the call.

use std::io::{self, BufRead, BufReader, Read, Write};
use std::process::{ChildStdin, Command, ExitStatus, Stdio};
use std::thread::{self, ScopedJoinHandle};

use tracing::{debug, error, instrument, warn};

use crate::core::args::ProcessSpec;
use crate::core::options::{Opt, RunOptions};
use crate::error::{Result, ShellError};

/// Result of a finished child process.
///
/// A non-zero exit is reported through `status` and is not an error.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Captured stdout lines without terminators. Empty when capture is off.
    pub lines: Vec<String>,
    pub status: ExitStatus,
}

impl RunOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Exit code, or `None` when the child was killed by a signal.
    pub fn code(&self) -> Option<i32> {
        self.status.code()
    }
}

/// Run `command`, echoing captured lines to stdout unless `silent`.
pub fn run<S: AsRef<str> + Sync>(
    command: &str,
    opts: &RunOptions,
    stdin_lines: &[S],
) -> Result<RunOutput> {
    run_with_echo(command, opts, stdin_lines, io::stdout())
}

/// [`run`] with options resolved from flag tags.
pub fn run_with<S: AsRef<str> + Sync>(
    command: &str,
    opts: &[Opt],
    stdin_lines: &[S],
) -> Result<RunOutput> {
    run(command, &RunOptions::from_opts(opts)?, stdin_lines)
}

/// Run `command`, mirroring each captured line to `echo` as it arrives.
///
/// Blocks until the child exits and both pipe workers are finished. Stdin is
/// piped only when `stdin_lines` is non-empty; stdout only when capturing.
/// Stderr is always inherited.
#[instrument(skip_all, fields(command = %command, capture = opts.capture, silent = opts.silent, stdin_lines = stdin_lines.len()))]
pub fn run_with_echo<S, W>(
    command: &str,
    opts: &RunOptions,
    stdin_lines: &[S],
    echo: W,
) -> Result<RunOutput>
where
    S: AsRef<str> + Sync,
    W: Write + Send,
{
    let spec = ProcessSpec::resolve(command, &opts.extra_args)?;
    let redirect_input = !stdin_lines.is_empty();
    let redirect_output = opts.capture;

    let mut cmd = Command::new(&spec.program);
    cmd.args(&spec.args)
        .stdin(if redirect_input {
            Stdio::piped()
        } else {
            Stdio::inherit()
        })
        .stdout(if redirect_output {
            Stdio::piped()
        } else {
            Stdio::inherit()
        })
        .stderr(Stdio::inherit());

    debug!(program = %spec.program, args = %spec.argument_string(), "spawning child process");
    let mut child = match cmd.spawn() {
        Ok(c) => c,
        Err(e) => {
            error!(program = %spec.program, err = %e, "failed to spawn command");
            return Err(ShellError::ProcessStart {
                program: spec.program,
                source: e,
            });
        }
    };

    let stdin = child.stdin.take();
    let stdout = child.stdout.take();
    // Nothing to silence when stdout is inherited.
    let echo = (!opts.silent).then_some(echo);

    let (status, lines) = thread::scope(|scope| -> Result<(ExitStatus, Vec<String>)> {
        let writer = stdin.map(|pipe| scope.spawn(move || write_stdin(pipe, stdin_lines)));
        let reader = stdout.map(|pipe| scope.spawn(move || read_stdout_tee(pipe, echo)));

        let status = child
            .wait()
            .map_err(|e| ShellError::io("wait for child process", e))?;

        if let Some(handle) = writer {
            join_worker(handle, "stdin writer")?;
        }
        let lines = match reader {
            Some(handle) => join_worker(handle, "stdout reader")?,
            None => Vec::new(),
        };
        Ok((status, lines))
    })?;

    debug!(exit_code = ?status.code(), lines = lines.len(), "command finished");
    Ok(RunOutput { lines, status })
}

fn join_worker<T>(handle: ScopedJoinHandle<'_, Result<T>>, name: &str) -> Result<T> {
    match handle.join() {
        Ok(result) => result,
        Err(_) => Err(ShellError::io(
            format!("{name} thread panicked"),
            io::Error::other("worker panicked"),
        )),
    }
}

/// Write one newline-terminated line per write, then drop the pipe for EOF.
fn write_stdin<S: AsRef<str>>(mut pipe: ChildStdin, lines: &[S]) -> Result<()> {
    for line in lines {
        let mut buf = String::with_capacity(line.as_ref().len() + 1);
        buf.push_str(line.as_ref());
        buf.push('\n');
        if let Err(e) = pipe.write_all(buf.as_bytes()) {
            return tolerate_broken_pipe(e);
        }
    }
    pipe.flush()
        .or_else(tolerate_io_broken_pipe)
        .map_err(|e| ShellError::io("flush child stdin", e))
}

fn tolerate_broken_pipe(err: io::Error) -> Result<()> {
    tolerate_io_broken_pipe(err).map_err(|e| ShellError::io("write child stdin", e))
}

fn tolerate_io_broken_pipe(err: io::Error) -> io::Result<()> {
    if err.kind() == io::ErrorKind::BrokenPipe {
        warn!("child closed stdin before all input was written");
        Ok(())
    } else {
        Err(err)
    }
}

/// Read lines until EOF, mirroring each one to `echo` (flushed per line).
fn read_stdout_tee<R: Read, W: Write>(reader: R, mut echo: Option<W>) -> Result<Vec<String>> {
    let mut buf_reader = BufReader::new(reader);
    let mut lines = Vec::new();
    let mut raw = Vec::new();

    loop {
        raw.clear();
        let n = buf_reader
            .read_until(b'\n', &mut raw)
            .map_err(|e| ShellError::io("read child stdout", e))?;
        if n == 0 {
            break;
        }
        let line = String::from_utf8_lossy(trim_line_ending(&raw)).into_owned();

        if let Some(sink) = echo.as_mut()
            && let Err(e) = writeln!(sink, "{line}").and_then(|()| sink.flush())
        {
            warn!(err = %e, "failed to echo child output, echo disabled");
            echo = None;
        }
        lines.push(line);
    }
    Ok(lines)
}

fn trim_line_ending(raw: &[u8]) -> &[u8] {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    raw.strip_suffix(b"\r").unwrap_or(raw)
}
