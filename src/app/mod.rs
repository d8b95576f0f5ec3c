pub mod args;
mod headless;
mod interactive;
mod setup;

pub use args::AppArgs;

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::broadcast;
use tracing::error;

use crate::actions::ActionDispatcher;
use crate::session::Session;
use crate::shell::ShellRunner;
use crate::web::{self, WebState};

pub async fn launch() -> Result<()> {
    launch_with_args(AppArgs::from_cli()).await
}

pub async fn launch_with_args(args: AppArgs) -> Result<()> {
    let setup::PreparedApp {
        config,
        workdir,
        log_buffer,
    } = setup::prepare(args)?;

    let (actions_tx, _) = broadcast::channel::<String>(100);
    let dispatcher = match config.web_port {
        Some(_) => ActionDispatcher::with_session(actions_tx.clone()),
        None => ActionDispatcher::new(),
    };

    let session = Arc::new(Session::new(
        config.prompt.clone(),
        ShellRunner::new(workdir, config.shell.clone()),
        dispatcher,
        log_buffer,
    ));

    if let Some(port) = config.web_port {
        let state = WebState {
            session: session.clone(),
            actions_tx,
        };
        tokio::spawn(async move {
            if let Err(e) = web::start_server(state, port).await {
                error!("Web transport stopped: {:#}", e);
            }
        });
    }

    if config.headless {
        headless::run(session, config.scrollback).await
    } else {
        interactive::run(session).await
    }
}
