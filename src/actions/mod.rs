//! Actions sent to and received from a backend session.
//!
//! On the wire an action is an envelope `{"action": <TYPE>, "args": {...}}`.
mod decode;
mod dispatcher;

pub use decode::action_from_str;
pub use dispatcher::{browse_envelope, ActionDispatcher};

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    Browse,
    BrowseInteractive,
    Run,
    Message,
    Null,
}

impl ActionType {
    /// Looks up an action type by its wire name, e.g. `"BROWSE"`.
    pub fn from_name(name: &str) -> Option<Self> {
        serde_json::from_value(Value::String(name.to_string())).ok()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct BrowseArgs {
    pub url: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct BrowseInteractiveArgs {
    pub browser_actions: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RunArgs {
    pub command: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct MessageArgs {
    pub content: String,
    #[serde(default)]
    pub wait_for_response: bool,
}

/// An action together with its arguments.
///
/// Serializes to the wire envelope. Variant names must stay in step with
/// [`ActionType`].
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "action", content = "args", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    Browse(BrowseArgs),
    BrowseInteractive(BrowseInteractiveArgs),
    Run(RunArgs),
    Message(MessageArgs),
    Null,
}

impl Action {
    pub fn browse(url: impl Into<String>) -> Self {
        Action::Browse(BrowseArgs { url: url.into() })
    }

    pub fn action_type(&self) -> ActionType {
        match self {
            Action::Browse(_) => ActionType::Browse,
            Action::BrowseInteractive(_) => ActionType::BrowseInteractive,
            Action::Run(_) => ActionType::Run,
            Action::Message(_) => ActionType::Message,
            Action::Null => ActionType::Null,
        }
    }

    /// Builds the `{"action", "args"}` envelope for this action.
    ///
    /// `NULL` carries no arguments, so its envelope has no `args` key.
    pub fn to_envelope(&self) -> Value {
        json!(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_names_match_action_types() {
        let actions = [
            Action::browse("http://example.com"),
            Action::BrowseInteractive(BrowseInteractiveArgs {
                browser_actions: "goto('http://example.com')".to_string(),
            }),
            Action::Run(RunArgs {
                command: "ls".to_string(),
            }),
            Action::Message(MessageArgs {
                content: "hi".to_string(),
                wait_for_response: false,
            }),
            Action::Null,
        ];
        for action in actions {
            let envelope = action.to_envelope();
            let name = envelope["action"].as_str().unwrap();
            assert_eq!(ActionType::from_name(name), Some(action.action_type()));
        }
        assert_eq!(ActionType::from_name("browse"), None);
    }

    #[test]
    fn null_envelope_has_no_args() {
        assert_eq!(Action::Null.to_envelope().to_string(), r#"{"action":"NULL"}"#);
    }

    #[test]
    fn run_envelope_decodes_back() {
        let action = Action::Run(RunArgs {
            command: "echo Hello".to_string(),
        });
        let text = action.to_envelope().to_string();
        assert_eq!(text, r#"{"action":"RUN","args":{"command":"echo Hello"}}"#);
        assert_eq!(action_from_str(&text).unwrap(), action);
    }

    #[test]
    fn message_envelope_carries_all_args() {
        let action = Action::Message(MessageArgs {
            content: "hi".to_string(),
            wait_for_response: true,
        });
        assert_eq!(
            action.to_envelope().to_string(),
            r#"{"action":"MESSAGE","args":{"content":"hi","wait_for_response":true}}"#
        );
    }
}
