use tracing::{debug, error};

use crate::error::TerminalError;
use crate::state::CommandLog;
use crate::ui::prompt::Prompt;
use crate::ui::widget::TerminalWidget;

use super::TerminalView;

impl<W: TerminalWidget> TerminalView<W> {
    /// Opens `widget`, replays the whole log into it and writes the prompt.
    ///
    /// Appends made after this call are delivered through the view's
    /// subscription and rendered by [`pump`](Self::pump) or
    /// [`next`](Self::next).
    pub fn mount(
        log: &CommandLog,
        mut widget: W,
        prompt: &Prompt,
        size: (u16, u16),
    ) -> Result<Self, TerminalError> {
        widget.open(size)?;

        let (snapshot, subscription) = log.subscribe();
        let mut view = Self {
            widget: Some(widget),
            subscription: Some(subscription),
            prompt: prompt.to_string(),
            rendered: 0,
        };

        view.replay(&snapshot)?;
        debug!(replayed = snapshot.len(), "terminal view mounted");
        Ok(view)
    }

    /// Deregisters from the log and disposes the widget.
    ///
    /// Deltas still queued are dropped. Returns the disposed widget the first
    /// time and `None` afterwards.
    pub fn unmount(&mut self) -> Result<Option<W>, TerminalError> {
        if let Some(mut subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }

        match self.widget.take() {
            Some(mut widget) => {
                widget.dispose()?;
                debug!(rendered = self.rendered, "terminal view unmounted");
                Ok(Some(widget))
            }
            None => Ok(None),
        }
    }
}

impl<W: TerminalWidget> Drop for TerminalView<W> {
    fn drop(&mut self) {
        if let Err(e) = self.unmount() {
            error!("Failed to release terminal widget: {}", e);
        }
    }
}
