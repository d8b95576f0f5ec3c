use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

use super::{Action, ActionType};
use crate::error::ActionError;

/// Parses a serialized action envelope.
pub fn action_from_str(text: &str) -> Result<Action, ActionError> {
    let value: Value = serde_json::from_str(text).map_err(ActionError::InvalidJson)?;
    action_from_value(value)
}

/// Decodes an action envelope. A missing `args` key is treated as `{}`.
pub fn action_from_value(value: Value) -> Result<Action, ActionError> {
    let Value::Object(mut envelope) = value else {
        return Err(ActionError::NotAnObject);
    };

    let name = match envelope.remove("action") {
        Some(Value::String(name)) => name,
        Some(_) => return Err(ActionError::ActionNotString),
        None => return Err(ActionError::MissingAction),
    };
    let action_type =
        ActionType::from_name(&name).ok_or_else(|| ActionError::UnknownAction(name.clone()))?;
    let args = envelope
        .remove("args")
        .unwrap_or_else(|| Value::Object(Map::new()));

    let action = match action_type {
        ActionType::Browse => Action::Browse(parse_args(&name, args)?),
        ActionType::BrowseInteractive => Action::BrowseInteractive(parse_args(&name, args)?),
        ActionType::Run => Action::Run(parse_args(&name, args)?),
        ActionType::Message => Action::Message(parse_args(&name, args)?),
        ActionType::Null => Action::Null,
    };

    debug!(action = %name, "decoded action envelope");
    Ok(action)
}

fn parse_args<T: DeserializeOwned>(name: &str, args: Value) -> Result<T, ActionError> {
    serde_json::from_value(args).map_err(|source| ActionError::WrongArguments {
        action: name.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{MessageArgs, RunArgs};
    use serde_json::json;

    #[test]
    fn decodes_envelopes_produced_by_the_dispatcher() {
        let action = action_from_str(r#"{"action":"BROWSE","args":{"url":"http://example.com"}}"#)
            .unwrap();
        assert_eq!(action, Action::browse("http://example.com"));
    }

    #[test]
    fn missing_args_default_to_empty() {
        assert_eq!(action_from_value(json!({"action": "NULL"})).unwrap(), Action::Null);

        let message =
            action_from_value(json!({"action": "MESSAGE", "args": {"content": "hello"}})).unwrap();
        assert_eq!(
            message,
            Action::Message(MessageArgs {
                content: "hello".to_string(),
                wait_for_response: false,
            })
        );
    }

    #[test]
    fn rejects_malformed_envelopes() {
        assert!(matches!(
            action_from_str("not json"),
            Err(ActionError::InvalidJson(_))
        ));
        assert!(matches!(
            action_from_value(json!(["RUN"])),
            Err(ActionError::NotAnObject)
        ));
        assert!(matches!(
            action_from_value(json!({"args": {}})),
            Err(ActionError::MissingAction)
        ));
        assert!(matches!(
            action_from_value(json!({"action": 7})),
            Err(ActionError::ActionNotString)
        ));
        assert!(matches!(
            action_from_value(json!({"action": "FLY"})),
            Err(ActionError::UnknownAction(name)) if name == "FLY"
        ));
    }

    #[test]
    fn rejects_wrong_arguments() {
        let missing = action_from_value(json!({"action": "RUN", "args": {}}));
        assert!(matches!(
            missing,
            Err(ActionError::WrongArguments { ref action, .. }) if action == "RUN"
        ));

        let unexpected =
            action_from_value(json!({"action": "RUN", "args": {"command": "ls", "cwd": "/"}}));
        assert!(matches!(unexpected, Err(ActionError::WrongArguments { .. })));

        let ok = action_from_value(json!({"action": "RUN", "args": {"command": "ls"}})).unwrap();
        assert_eq!(
            ok,
            Action::Run(RunArgs {
                command: "ls".to_string()
            })
        );
    }
}
