//! The shell-style prompt written after the scrollback.
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies the simulated user, host and working directory of the session.
///
/// Renders as `<user>@<host>:<cwd> $ ` with a single trailing space and no
/// line break, so the next write continues on the same visual line.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct Prompt {
    pub user: String,
    pub host: String,
    pub cwd: String,
}

impl Prompt {
    pub fn new(user: impl Into<String>, host: impl Into<String>, cwd: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            host: host.into(),
            cwd: cwd.into(),
        }
    }
}

impl Default for Prompt {
    fn default() -> Self {
        Self::new("user", "host", "/workspace")
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}:{} $ ", self.user, self.host, self.cwd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_prompt_matches_workspace_convention() {
        assert_eq!(Prompt::default().to_string(), "user@host:/workspace $ ");
    }

    #[test]
    fn custom_prompt_has_single_trailing_space() {
        let prompt = Prompt::new("opendevin", "docker-desktop", "/workspace");
        let rendered = prompt.to_string();
        assert_eq!(rendered, "opendevin@docker-desktop:/workspace $ ");
        assert!(!rendered.ends_with('\n'));
        assert!(!rendered.ends_with("  "));
    }
}
