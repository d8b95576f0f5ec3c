use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use super::{CrosstermWidget, EditOutcome, LineEditor, TerminalView, TerminalWidget, UIEvent};
use crate::error::TerminalError;
use crate::session::Session;
use crate::types::CommandDelta;

/// Runs the interactive terminal on stdout until `exit`, Ctrl+C or Ctrl+D.
pub async fn run_terminal(session: Arc<Session>) -> Result<()> {
    let size = CrosstermWidget::current_size();
    let mut view = TerminalView::mount(&session.log, CrosstermWidget::stdout(), &session.prompt, size)?;
    let mut editor = LineEditor::new();
    let mut shutdown = session.shutdown_signal();

    info!(session = %session.id, "Starting interactive terminal");

    let (ui_event_tx, mut ui_event_rx) = mpsc::unbounded_channel::<UIEvent>();
    tokio::task::spawn_blocking(move || loop {
        if !event::poll(Duration::from_millis(100)).unwrap_or(false) {
            if ui_event_tx.is_closed() {
                break;
            }
            continue;
        }
        let ui_event = match event::read() {
            Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => UIEvent::KeyPress(key),
            Ok(Event::Resize(width, height)) => UIEvent::Resize(width, height),
            Ok(_) => continue,
            Err(e) => {
                error!("Failed to read terminal event: {}", e);
                break;
            }
        };
        if ui_event_tx.send(ui_event).is_err() {
            break;
        }
    });

    loop {
        tokio::select! {
            _ = shutdown.changed() => break,
            ui_event = ui_event_rx.recv() => {
                let Some(ui_event) = ui_event else { break };
                match ui_event {
                    UIEvent::KeyPress(key) => match editor.handle_key(key) {
                        EditOutcome::Submit(line) => {
                            redraw_pending(&mut view, "", 0);
                            let session = session.clone();
                            tokio::spawn(async move {
                                session.execute(&line).await;
                            });
                        }
                        EditOutcome::Exit => break,
                        EditOutcome::Changed => {
                            redraw_pending(&mut view, editor.buffer(), editor.cursor());
                        }
                        EditOutcome::Ignored => {}
                    },
                    UIEvent::Resize(width, height) => {
                        if let Some(widget) = view.widget_mut() {
                            widget.resize((width, height));
                        }
                    }
                }
            }
            delta = view.recv() => {
                let Some(delta) = delta else { break };
                render_incoming(&mut view, delta, &editor)?;
            }
        }
    }

    drop(ui_event_rx);
    view.unmount()?;
    println!();
    debug!("Interactive terminal stopped");
    Ok(())
}

/// Renders `delta` and anything queued behind it underneath the line being
/// typed, then redraws that line after the new prompt.
///
/// Returns how many records were written.
fn render_incoming<W: Write>(
    view: &mut TerminalView<CrosstermWidget<W>>,
    delta: CommandDelta,
    editor: &LineEditor,
) -> Result<usize, TerminalError> {
    redraw_pending(view, "", 0);
    let mut written = usize::from(view.render_delta(delta)?);
    written += view.pump()?;
    redraw_pending(view, editor.buffer(), editor.cursor());
    Ok(written)
}

fn redraw_pending<W: Write>(
    view: &mut TerminalView<CrosstermWidget<W>>,
    pending: &str,
    cursor: usize,
) {
    if let Some(widget) = view.widget_mut() {
        if let Err(e) = widget.redraw_pending(pending, cursor) {
            debug!("Failed to redraw input line: {}", e);
        }
    }
}
