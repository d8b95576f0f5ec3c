//! The main entry point for agent-term.
mod actions;
mod app;
mod config;
mod error;
mod logging;
mod session;
mod shell;
mod state;
mod types;
mod ui;
mod web;

use anyhow::Result;

/// Parses the command line and runs the terminal, interactively or headless.
#[tokio::main]
async fn main() -> Result<()> {
    app::launch().await
}
