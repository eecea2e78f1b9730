//! Blocking subprocess execution with captured output.

use std::io;
use std::path::Path;
use std::process::Command;

use thiserror::Error;

/// External tool failures.
#[derive(Debug, Error)]
pub enum ExternalError {
    #[error("failed to launch `{program}`: {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` exited with {status}\n{stdout}\n{stderr}", status = exit_code_label(.code))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },
}

fn exit_code_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

/// Captured result of a finished subprocess.
#[derive(Debug)]
pub struct ToolOutput {
    /// Exit code, if the process exited normally.
    pub code: Option<i32>,
    /// Captured standard output, decoded lossily.
    pub stdout: String,
    /// Captured standard error, decoded lossily.
    pub stderr: String,
}

impl ToolOutput {
    /// Whether the process exited with code zero.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Run `program` with `args`, blocking until it exits. A nonzero exit is
/// NOT an error here; callers that cannot tolerate failure use
/// [`run_checked`].
pub fn run(
    program: &str,
    args: &[&str],
    cwd: Option<&Path>,
) -> Result<ToolOutput, ExternalError> {
    tracing::debug!(program, ?args, "running external command");
    let mut command = Command::new(program);
    command.args(args);
    if let Some(dir) = cwd {
        command.current_dir(dir);
    }
    let output = command.output().map_err(|source| ExternalError::Launch {
        program: program.to_string(),
        source,
    })?;
    Ok(ToolOutput {
        code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    })
}

/// Run `program` with `args` and fail on nonzero exit, carrying the
/// captured output streams in the error.
pub fn run_checked(
    program: &str,
    args: &[&str],
    cwd: Option<&Path>,
) -> Result<ToolOutput, ExternalError> {
    let output = run(program, args, cwd)?;
    if output.success() {
        Ok(output)
    } else {
        Err(ExternalError::CommandFailed {
            command: render_command(program, args),
            code: output.code,
            stdout: output.stdout.trim_end().to_string(),
            stderr: output.stderr.trim_end().to_string(),
        })
    }
}

fn render_command(program: &str, args: &[&str]) -> String {
    let mut rendered = String::from(program);
    for arg in args {
        rendered.push(' ');
        rendered.push_str(arg);
    }
    rendered
}
