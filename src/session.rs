//! One terminal session: the command log plus everything that appends to it.
use std::sync::Arc;

use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::actions::ActionDispatcher;
use crate::logging::LogBuffer;
use crate::shell::ShellRunner;
use crate::state::CommandLog;
use crate::ui::Prompt;

const DEFAULT_LOG_LINES: usize = 20;

/// State shared by the terminal, the web transport and running commands.
pub struct Session {
    /// Identifies the session to web clients.
    pub id: Uuid,
    /// Everything typed and printed, in terminal order.
    pub log: CommandLog,
    pub prompt: Prompt,
    pub dispatcher: ActionDispatcher,
    runner: ShellRunner,
    log_buffer: Arc<LogBuffer>,
    /// Held for the whole of one command, input record to last output record.
    executing: Mutex<()>,
    shutdown: watch::Sender<bool>,
}

impl Session {
    /// Creates a session with an empty command log.
    ///
    /// # Arguments
    ///
    /// * `prompt` - Rendered after every input record.
    /// * `runner` - Runs everything that is not a built-in.
    /// * `dispatcher` - Receives `browse` requests.
    /// * `log_buffer` - Read by the `logs` built-in.
    pub fn new(
        prompt: Prompt,
        runner: ShellRunner,
        dispatcher: ActionDispatcher,
        log_buffer: Arc<LogBuffer>,
    ) -> Self {
        let (shutdown, _) = watch::channel(false);
        let id = Uuid::new_v4();
        debug!(session = %id, workdir = %runner.workdir().display(), "session created");
        Self {
            id,
            log: CommandLog::new(),
            prompt,
            dispatcher,
            runner,
            log_buffer,
            executing: Mutex::new(()),
            shutdown,
        }
    }

    /// Resolves once `exit` has been requested.
    pub fn shutdown_signal(&self) -> watch::Receiver<bool> {
        self.shutdown.subscribe()
    }

    pub fn request_exit(&self) {
        self.shutdown.send_replace(true);
    }

    pub fn exit_requested(&self) -> bool {
        *self.shutdown.borrow()
    }

    /// Records `line` as input, then runs it and records what it produced.
    ///
    /// Built-ins: `exit`, `browse <url>` and `logs [count]`. Everything else
    /// goes to the shell. Commands run one at a time in call order, so a
    /// command's output is always logged before the next command's input.
    pub async fn execute(&self, line: &str) {
        let _running = self.executing.lock().await;
        self.log.append_input(line);

        let mut parts = line.split_whitespace();
        match parts.next() {
            None => {}
            Some("exit") => {
                info!("Exit requested");
                self.request_exit();
            }
            Some("browse") => match parts.next() {
                Some(url) => {
                    let envelope = self.dispatcher.update_browser_tab_url(url);
                    self.log.append_output(format!("{}\n", envelope));
                }
                None => {
                    self.log.append_output("usage: browse <url>\n");
                }
            },
            Some("logs") if self.log_buffer.is_empty() => {
                self.log.append_output("no log entries\n");
            }
            Some("logs") => {
                let count = parts
                    .next()
                    .and_then(|n| n.parse().ok())
                    .unwrap_or(DEFAULT_LOG_LINES);
                let text: String = self
                    .log_buffer
                    .recent(count)
                    .iter()
                    .map(|entry| format!("{}\n", entry))
                    .collect();
                if !text.is_empty() {
                    self.log.append_output(text);
                }
            }
            Some(_) => match self.runner.run(line).await {
                Ok(outcome) => {
                    if !outcome.output.is_empty() {
                        self.log.append_output(outcome.output);
                    }
                }
                Err(e) => {
                    warn!("Failed to run command: {}", e);
                    self.log.append_output(format!("{}\n", e));
                }
            },
        }
    }
}
