use tokio::sync::broadcast;
use tracing::debug;

use super::Action;

/// Serializes a request to navigate the session's browser tab to `url`.
///
/// The URL is passed through as given; it is not validated.
pub fn browse_envelope(url: &str) -> String {
    Action::browse(url).to_envelope().to_string()
}

/// Packages actions into envelopes and hands them to the session transport.
///
/// Without an attached transport the dispatcher only serializes.
#[derive(Clone, Default)]
pub struct ActionDispatcher {
    session: Option<broadcast::Sender<String>>,
}

impl ActionDispatcher {
    /// A dispatcher with no transport. Envelopes are built and logged only.
    pub fn new() -> Self {
        Self::default()
    }

    /// A dispatcher that broadcasts every envelope to the session's clients.
    pub fn with_session(session: broadcast::Sender<String>) -> Self {
        Self {
            session: Some(session),
        }
    }

    /// Serializes `action` and forwards it to the session, returning the envelope.
    ///
    /// Having no connected client is not an error; the envelope is dropped.
    pub fn dispatch(&self, action: &Action) -> String {
        self.forward(action.to_envelope().to_string())
    }

    /// Asks the session's browser tab to navigate to `url`.
    ///
    /// # Arguments
    ///
    /// * `url` - Passed through unchanged, see [`browse_envelope`].
    pub fn update_browser_tab_url(&self, url: &str) -> String {
        self.forward(browse_envelope(url))
    }

    fn forward(&self, envelope: String) -> String {
        match &self.session {
            Some(session) => match session.send(envelope.clone()) {
                Ok(receivers) => debug!(receivers, "action envelope sent: {}", envelope),
                Err(_) => debug!("No session client connected, dropping: {}", envelope),
            },
            None => debug!("No session transport attached: {}", envelope),
        }

        envelope
    }
}
