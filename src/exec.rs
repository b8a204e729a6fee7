//! Subprocess execution shared by the build-graph, git, and release
//! delegations.
//!
//! Every external capability this tool uses is another CLI. Commands
//! run synchronously, exactly once, with no timeout: a hung subprocess
//! blocks the whole run, by design.
use log::*;
use std::process::Command;
use thiserror::Error;

/// Failure modes of a delegated command.
#[derive(Error, Debug)]
pub enum ExecError {
    #[error("failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {code}: {stderr}")]
    NonZeroExit {
        program: String,
        code: i32,
        stderr: String,
    },

    #[error("{program} produced non-utf8 output")]
    InvalidOutput { program: String },
}

impl ExecError {
    /// First line of the underlying error text, for compact reporting.
    pub fn first_line(&self) -> String {
        self.to_string()
            .lines()
            .next()
            .unwrap_or_default()
            .to_string()
    }
}

/// Run a command to completion and return its stdout.
///
/// Stderr is captured and folded into the error on non-zero exit. A
/// missing exit code (signal termination) is reported as -1.
pub fn run(program: &str, args: &[&str]) -> Result<String, ExecError> {
    debug!("running: {} {}", program, args.join(" "));

    let output =
        Command::new(program)
            .args(args)
            .output()
            .map_err(|source| ExecError::Launch {
                program: program.to_string(),
                source,
            })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(ExecError::NonZeroExit {
            program: program.to_string(),
            code: output.status.code().unwrap_or(-1),
            stderr,
        });
    }

    let stdout = String::from_utf8(output.stdout).map_err(|_| {
        ExecError::InvalidOutput {
            program: program.to_string(),
        }
    })?;

    debug!("{} stdout: {}", program, stdout.trim_end());

    Ok(stdout)
}
