use std::fmt;
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

use thiserror::Error;

use crate::core::style;

/// Whether a non-zero exit is a failure of the enclosing step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckPolicy {
    /// Non-zero exit (or a failure to start) aborts the step with a diagnostic.
    Guarded,
    /// Any exit code is returned as a normal result; the caller inspects it.
    BestEffort,
}

/// Whether stdout/stderr are captured as text or passed through to the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture {
    Inherit,
    Text,
}

/// A single external command: program plus arguments, never re-parsed by a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// True if the argument vector starts with `prefix`.
    pub fn has_args(&self, prefix: &[&str]) -> bool {
        self.args.len() >= prefix.len() && self.args.iter().zip(prefix).all(|(a, p)| a == p)
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", quote(arg))?;
        }
        Ok(())
    }
}

fn quote(word: &str) -> String {
    let plain = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:@,+".contains(c));
    if plain {
        word.to_string()
    } else {
        format!("\"{}\"", word.replace('\\', "\\\\").replace('"', "\\\""))
    }
}

/// Exit code plus whatever text was captured.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// `None` when the process was killed by a signal.
    pub code: Option<i32>,
    pub stdout: Option<String>,
    pub stderr: Option<String>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Captured stdout with surrounding whitespace removed; empty when nothing was captured.
    pub fn stdout_trimmed(&self) -> &str {
        self.stdout.as_deref().map(str::trim).unwrap_or("")
    }
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` exited with {}{}", exit_label(.code), stderr_suffix(.stderr))]
    Failed {
        command: String,
        code: Option<i32>,
        stderr: Option<String>,
    },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("status {}", c),
        None => "a signal".to_string(),
    }
}

fn stderr_suffix(stderr: &Option<String>) -> String {
    match stderr.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => format!(": {}", text),
        _ => String::new(),
    }
}

/// Executes external commands. Implementors only run the process; the
/// check policy is applied by [`run`].
pub trait Runner {
    fn execute(&mut self, dir: &Path, invocation: &Invocation, capture: Capture)
    -> io::Result<CommandOutput>;
}

/// Runs commands as real subprocesses, blocking until they exit.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl Runner for SystemRunner {
    fn execute(
        &mut self,
        dir: &Path,
        invocation: &Invocation,
        capture: Capture,
    ) -> io::Result<CommandOutput> {
        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args).current_dir(dir);

        match capture {
            Capture::Inherit => {
                let status = cmd
                    .stdin(Stdio::inherit())
                    .stdout(Stdio::inherit())
                    .stderr(Stdio::inherit())
                    .status()?;
                Ok(CommandOutput {
                    code: status.code(),
                    stdout: None,
                    stderr: None,
                })
            }
            Capture::Text => {
                let output = cmd.stdin(Stdio::inherit()).output()?;
                Ok(CommandOutput {
                    code: output.status.code(),
                    stdout: Some(String::from_utf8_lossy(&output.stdout).into_owned()),
                    stderr: Some(String::from_utf8_lossy(&output.stderr).into_owned()),
                })
            }
        }
    }
}

/// Run `invocation` in `dir` under the given policy.
///
/// A guarded run that cannot start or exits non-zero prints the failing
/// command line and its error text, then returns `Err`. A best-effort run
/// only fails when the process cannot be started, and prints nothing.
pub fn run<R: Runner + ?Sized>(
    runner: &mut R,
    dir: &Path,
    invocation: &Invocation,
    policy: CheckPolicy,
    capture: Capture,
) -> Result<CommandOutput, CommandError> {
    let command = invocation.to_string();
    tracing::debug!(%command, ?policy, ?capture, "running");

    let output = match runner.execute(dir, invocation, capture) {
        Ok(output) => output,
        Err(source) => {
            tracing::debug!(%command, error = %source, "could not start");
            if policy == CheckPolicy::Guarded {
                print_diagnostic(&command, &source.to_string());
            }
            return Err(CommandError::Spawn { command, source });
        }
    };

    tracing::debug!(%command, code = ?output.code, "finished");

    if policy == CheckPolicy::Guarded && !output.success() {
        let detail = match output.stderr.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => format!("command exited with {}", exit_label(&output.code)),
        };
        print_diagnostic(&command, &detail);
        return Err(CommandError::Failed {
            command,
            code: output.code,
            stderr: output.stderr,
        });
    }

    Ok(output)
}

fn print_diagnostic(command: &str, detail: &str) {
    println!("{}", style::error(&format!("Error executing command: {}", command)));
    println!("  {}", style::hint(detail));
}
