//! Headless mode: commands come from stdin and the scrollback is printed at the end.
use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::oneshot;
use tracing::{debug, info};

use crate::session::Session;
use crate::ui::widget::DEFAULT_SIZE;
use crate::ui::{ScrollbackWidget, TerminalView};

/// Runs stdin lines through the session until EOF or `exit`, then prints the
/// scrollback.
pub async fn run(session: Arc<Session>, scrollback: usize) -> Result<()> {
    let mut view = TerminalView::mount(
        &session.log,
        ScrollbackWidget::new(scrollback),
        &session.prompt,
        DEFAULT_SIZE,
    )?;

    info!(session = %session.id, "Starting headless terminal");

    let (done_tx, done_rx) = oneshot::channel::<()>();
    let feed = async {
        let result = feed_stdin(&session).await;
        let _ = done_tx.send(());
        result
    };
    let render = view.run_until(async {
        let _ = done_rx.await;
    });

    let (fed, rendered) = tokio::join!(feed, render);
    fed?;
    rendered?;
    view.pump()?;

    if session.log.is_empty() {
        debug!("No commands were entered");
    }
    info!(records = view.rendered(), "Headless terminal stopped");
    if let Some(widget) = view.widget() {
        println!("{}", widget.contents());
    }
    view.unmount()?;
    Ok(())
}

async fn feed_stdin(session: &Session) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut shutdown = session.shutdown_signal();

    while !session.exit_requested() {
        tokio::select! {
            _ = shutdown.changed() => break,
            line = lines.next_line() => match line? {
                Some(line) => session.execute(&line).await,
                None => break,
            },
        }
    }
    Ok(())
}
