use std::borrow::Cow;
use std::env;
use std::fs;
use std::process::Command;

use thiserror::Error;

use crate::errors::SplitError;

#[derive(Debug, Error)]
pub enum CmdError {
    #[error("failed to spawn: {error}")]
    ErrSpawn { error: std::io::Error },

    #[error("exited with non-zero status {code}: {stderr}")]
    ErrExitStatus { code: i32, stderr: String },

    #[error("terminated by signal")]
    ErrSignal,
}

/// Captured result of a command that was spawned successfully.
/// `code` is None if the process was killed by a signal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CmdOutput {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Runs external programs. All collaborators that shell out
/// go through a `Runner`, so tests can swap in a recording fake.
pub trait Runner {
    /// Spawns `cmd` and waits for it. Only spawn failures are errors,
    /// exit statuses are left for the caller to interpret.
    fn output(&self, cmd: &str, args: &[&str]) -> Result<CmdOutput, SplitError>;

    /// Like [`Runner::output`], but non-zero exits are errors.
    /// Returns stdout.
    fn exec(&self, cmd: &str, args: &[&str]) -> Result<String, SplitError> {
        let output = self.output(cmd, args)?;
        let context = format!("command `{}` failed", render(cmd, args));

        match output.code {
            Some(0) => Ok(output.stdout),
            Some(code) => Err(SplitError::CmdFailed {
                error: CmdError::ErrExitStatus {
                    code,
                    stderr: output.stderr.trim().to_string(),
                },
                context,
            }),
            None => Err(SplitError::CmdFailed {
                error: CmdError::ErrSignal,
                context,
            }),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ShellRunner;

impl Runner for ShellRunner {
    fn output(&self, cmd: &str, args: &[&str]) -> Result<CmdOutput, SplitError> {
        log::debug!("exec: {}", render(cmd, args));

        let output = Command::new(cmd).args(args).output().map_err(|err| {
            SplitError::CmdFailed {
                error: CmdError::ErrSpawn { error: err },
                context: format!("command {cmd} failed to spawn"),
            }
        })?;

        Ok(CmdOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Renders a command line the way a shell user would type it
pub fn render(cmd: &str, args: &[&str]) -> String {
    let mut line = String::from(cmd);
    for arg in args {
        line.push(' ');
        line.push_str(&shlex::try_quote(arg).unwrap_or(Cow::Borrowed(*arg)));
    }

    line
}

pub fn in_path(program: &str) -> bool {
    if let Ok(path) = env::var("PATH") {
        for p in path.split(':') {
            let p_str = format!("{}/{}", p, program);
            if fs::metadata(p_str).is_ok() {
                return true;
            }
        }
    }

    false
}
