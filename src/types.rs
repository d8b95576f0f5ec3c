use serde::{Deserialize, Serialize};

/// Whether a command record was typed into the terminal or produced by it.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    Input,
    Output,
}

/// A single entry of the command log.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Command {
    /// Serialized as `type`, e.g. `{"type":"input","content":"ls"}`.
    #[serde(rename = "type")]
    pub kind: CommandKind,
    /// Text exactly as typed or printed. May be empty.
    pub content: String,
}

impl Command {
    /// A record of text typed at the prompt.
    pub fn input(content: impl Into<String>) -> Self {
        Self {
            kind: CommandKind::Input,
            content: content.into(),
        }
    }

    /// A record of text the session printed.
    pub fn output(content: impl Into<String>) -> Self {
        Self {
            kind: CommandKind::Output,
            content: content.into(),
        }
    }

    pub fn is_input(&self) -> bool {
        self.kind == CommandKind::Input
    }
}

/// A record appended to the log, tagged with its position.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct CommandDelta {
    pub index: usize,
    pub command: Command,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_serializes_with_type_tag() {
        let json = serde_json::to_string(&Command::input("ls -la")).unwrap();
        assert_eq!(json, r#"{"type":"input","content":"ls -la"}"#);

        let parsed: Command = serde_json::from_str(r#"{"type":"output","content":""}"#).unwrap();
        assert_eq!(parsed, Command::output(""));
    }
}
