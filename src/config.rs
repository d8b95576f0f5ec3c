//! File-based configuration.
//!
//! The config file is JSON; every field is optional. Command-line flags are
//! applied on top of it by `app::setup`.
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::TerminalError;
use crate::ui::Prompt;

/// Settings for one terminal session.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct TerminalConfig {
    /// User, host and directory shown in the prompt.
    pub prompt: Prompt,
    /// Directory commands run in. Defaults to the process working directory.
    pub workdir: Option<PathBuf>,
    /// Program invoked as `<shell> -c <line>`.
    pub shell: String,
    /// Serve the session web transport on this port.
    pub web_port: Option<u16>,
    /// Render into an in-memory scrollback and read commands from stdin.
    pub headless: bool,
    /// Completed lines kept by the headless scrollback.
    pub scrollback: usize,
    /// Filter directive used when `AGENT_TERM_LOG` is unset.
    pub log_level: String,
    /// Also write plain-text logs to this file.
    pub log_file: Option<PathBuf>,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            prompt: Prompt::default(),
            workdir: None,
            shell: "sh".to_string(),
            web_port: None,
            headless: false,
            scrollback: 10_000,
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

impl TerminalConfig {
    /// Reads a JSON config file. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Fails with [`TerminalError::Io`] when the file cannot be read and with
    /// [`TerminalError::Config`] when it is not valid config JSON.
    pub fn load(path: &Path) -> Result<Self, TerminalError> {
        let text = std::fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(|source| TerminalError::Config {
            path: path.display().to_string(),
            source,
        })
    }
}
