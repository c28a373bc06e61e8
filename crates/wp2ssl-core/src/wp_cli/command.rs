//! Blocking child-process runner for the external tools.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::capability::CommandOutput;
use crate::error::{MigrationError, Result, Step};

/// One external command invocation, built up argument by argument.
#[derive(Debug, Clone, Default)]
pub struct ExternalCommand {
    program: String,
    args: Vec<String>,
    cwd: Option<PathBuf>,
}

impl ExternalCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Default::default()
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn cwd(mut self, path: impl Into<PathBuf>) -> Self {
        self.cwd = Some(path.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    /// Command line for logs.
    pub fn display(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }

    /// Run to completion and capture both streams. A non-zero exit is not an
    /// error here; failing to start the program is.
    pub fn run_capture(&self, step: Step) -> Result<CommandOutput> {
        tracing::debug!(%step, "running: {}", self.display());

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }
        // Never block on an interactive prompt.
        cmd.stdin(Stdio::null());

        let output = cmd.output().map_err(|e| {
            MigrationError::external(step, format!("failed to start {}: {e}", self.display()))
        })?;

        let out = CommandOutput {
            // Killed by a signal: no code.
            return_code: output.status.code().unwrap_or(1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        tracing::debug!(%step, code = out.return_code, "finished: {}", self.program);
        Ok(out)
    }
}
