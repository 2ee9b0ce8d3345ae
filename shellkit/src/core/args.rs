//! Turning command text into a program and its argv.

use crate::error::{Result, ShellError};

/// Program plus arguments, ready to hand to `std::process::Command`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl ProcessSpec {
    /// Resolve a command the way `run` does.
    ///
    /// Explicit `extra_args` make `command` the program verbatim. Otherwise the
    /// command is split on its first space and the remainder is parsed as an
    /// argument string.
    pub fn resolve(command: &str, extra_args: &[String]) -> Result<Self> {
        let command = command.trim();
        if command.is_empty() {
            return Err(ShellError::invalid_option("command must not be empty"));
        }
        if !extra_args.is_empty() {
            return Ok(Self {
                program: command.to_string(),
                args: extra_args.to_vec(),
            });
        }
        match command.split_once(' ') {
            Some((program, rest)) => Ok(Self {
                program: program.to_string(),
                args: split_args(rest)?,
            }),
            None => Ok(Self {
                program: command.to_string(),
                args: Vec::new(),
            }),
        }
    }

    /// Every argument double-quoted and joined by spaces.
    pub fn argument_string(&self) -> String {
        self.args
            .iter()
            .map(|arg| quote(arg))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn quote(arg: &str) -> String {
    let mut out = String::with_capacity(arg.len() + 2);
    out.push('"');
    for ch in arg.chars() {
        if ch == '"' || ch == '\\' {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('"');
    out
}

/// Split an argument string into argv.
///
/// Whitespace separates arguments. Double quotes group and honor `\"` and
/// `\\`; single quotes group literally; a backslash outside quotes escapes the
/// next character.
pub fn split_args(input: &str) -> Result<Vec<String>> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_arg = false;
    let mut chars = input.chars();

    while let Some(ch) = chars.next() {
        match ch {
            c if c.is_whitespace() => {
                if in_arg {
                    args.push(std::mem::take(&mut current));
                    in_arg = false;
                }
            }
            '"' => {
                in_arg = true;
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(next @ ('"' | '\\')) => current.push(next),
                            Some(next) => {
                                current.push('\\');
                                current.push(next);
                            }
                            None => return Err(unterminated(input)),
                        },
                        Some(c) => current.push(c),
                        None => return Err(unterminated(input)),
                    }
                }
            }
            '\'' => {
                in_arg = true;
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(c) => current.push(c),
                        None => return Err(unterminated(input)),
                    }
                }
            }
            '\\' => {
                in_arg = true;
                match chars.next() {
                    Some(next) => current.push(next),
                    None => current.push('\\'),
                }
            }
            c => {
                in_arg = true;
                current.push(c);
            }
        }
    }
    if in_arg {
        args.push(current);
    }
    Ok(args)
}

fn unterminated(input: &str) -> ShellError {
    ShellError::invalid_option(format!("unterminated quote in arguments: {input}"))
}
