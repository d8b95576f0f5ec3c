use std::future::Future;

use tracing::debug;

use crate::error::TerminalError;
use crate::state::Subscription;
use crate::types::CommandDelta;
use crate::ui::widget::TerminalWidget;

/// Renders a [`CommandLog`](crate::state::CommandLog) into a terminal widget.
///
/// The view owns its widget from [`mount`](Self::mount) until
/// [`unmount`](Self::unmount) (or drop) and holds a single subscription to the
/// log in between. `rendered` is the number of records already written, so
/// every record reaches the widget exactly once.
pub struct TerminalView<W: TerminalWidget> {
    pub(super) widget: Option<W>,
    pub(super) subscription: Option<Subscription>,
    pub(super) prompt: String,
    pub(super) rendered: usize,
}

impl<W: TerminalWidget> TerminalView<W> {
    /// Renders every delta already queued, without waiting.
    ///
    /// Returns how many records were written.
    pub fn pump(&mut self) -> Result<usize, TerminalError> {
        let mut written = 0;
        while let Some(delta) = self.subscription.as_mut().and_then(Subscription::try_next) {
            if self.render_delta(delta)? {
                written += 1;
            }
        }
        Ok(written)
    }

    /// Waits for the next appended record without rendering it.
    ///
    /// Returns `None` once the view is unmounted or the log is gone.
    pub async fn recv(&mut self) -> Option<CommandDelta> {
        match self.subscription.as_mut() {
            Some(subscription) => subscription.next().await,
            None => None,
        }
    }

    /// Waits for the next appended record and renders it.
    ///
    /// Returns `false` once the view is unmounted or the log is gone.
    pub async fn next(&mut self) -> Result<bool, TerminalError> {
        let delta = self.recv().await;
        match delta {
            Some(delta) => {
                self.render_delta(delta)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Keeps rendering appends until `shutdown` resolves or the log is gone.
    pub async fn run_until<F>(&mut self, shutdown: F) -> Result<(), TerminalError>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    debug!("terminal view shutting down");
                    break;
                }
                more = self.next() => {
                    if !more? {
                        break;
                    }
                }
            }
        }
        Ok(())
    }

    /// Number of log records written to the widget so far.
    pub fn rendered(&self) -> usize {
        self.rendered
    }

    /// The widget, or `None` once unmounted.
    pub fn widget(&self) -> Option<&W> {
        self.widget.as_ref()
    }

    pub fn widget_mut(&mut self) -> Option<&mut W> {
        self.widget.as_mut()
    }
}
