//! Error types shared across the crate.
use thiserror::Error;

/// Errors raised by the terminal widget, the shell runner and configuration loading.
#[derive(Debug, Error)]
pub enum TerminalError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("terminal widget is not open")]
    NotOpen,

    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{path}': {source}")]
    Config {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors raised while decoding an action envelope.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("action envelope is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("action must be a JSON object")]
    NotAnObject,

    #[error("'action' key is not found in envelope")]
    MissingAction,

    #[error("'action' must be a string")]
    ActionNotString,

    #[error("action '{0}' is not defined")]
    UnknownAction(String),

    #[error("action '{action}' has the wrong arguments: {source}")]
    WrongArguments {
        action: String,
        #[source]
        source: serde_json::Error,
    },
}
