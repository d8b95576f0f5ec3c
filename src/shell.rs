//! Runs command lines typed into the terminal.
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, warn};

use crate::error::TerminalError;

/// Exit status and combined output of one command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    /// `-1` when the process was terminated by a signal.
    pub exit_code: i32,
    /// Standard output followed by standard error.
    pub output: String,
}

impl CommandOutcome {
    /// Whether the command exited with status zero.
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs command lines through `<shell> -c` inside a fixed working directory.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    workdir: PathBuf,
    shell: String,
}

impl ShellRunner {
    pub fn new(workdir: impl Into<PathBuf>, shell: impl Into<String>) -> Self {
        Self {
            workdir: workdir.into(),
            shell: shell.into(),
        }
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Runs `command_line` to completion and collects what it printed.
    ///
    /// # Errors
    ///
    /// Returns [`TerminalError::Spawn`] when the shell cannot be started. A
    /// non-zero exit status is not an error.
    pub async fn run(&self, command_line: &str) -> Result<CommandOutcome, TerminalError> {
        debug!(shell = %self.shell, workdir = %self.workdir.display(), "running: {}", command_line);

        let output = Command::new(&self.shell)
            .arg("-c")
            .arg(command_line)
            .current_dir(&self.workdir)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| TerminalError::Spawn {
                command: command_line.to_string(),
                source,
            })?;

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));

        let outcome = CommandOutcome {
            exit_code: output.status.code().unwrap_or(-1),
            output: text,
        };
        if !outcome.success() {
            warn!(exit_code = outcome.exit_code, "command exited with failure: {}", command_line);
        }

        Ok(outcome)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn runner(dir: &std::path::Path) -> ShellRunner {
        ShellRunner::new(dir, "sh")
    }

    #[tokio::test]
    async fn captures_stdout_and_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = runner(dir.path()).run("echo hello; echo world").await.unwrap();
        assert!(outcome.success());
        assert_eq!(outcome.output, "hello\nworld\n");
    }

    #[tokio::test]
    async fn runs_in_the_working_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("foo.txt"), "").unwrap();

        let outcome = runner(dir.path()).run("ls").await.unwrap();
        assert!(outcome.output.contains("foo.txt"));
    }

    #[tokio::test]
    async fn failed_commands_still_report_output() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = runner(dir.path())
            .run("echo oops >&2; exit 3")
            .await
            .unwrap();
        assert_eq!(outcome.exit_code, 3);
        assert_eq!(outcome.output, "oops\n");
    }

    #[tokio::test]
    async fn missing_shell_is_a_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = ShellRunner::new(dir.path(), "/definitely/not/a/shell")
            .run("true")
            .await;
        assert!(matches!(result, Err(TerminalError::Spawn { .. })));
    }
}
