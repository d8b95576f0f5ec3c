use std::sync::Arc;

use anyhow::Result;

use crate::session::Session;
use crate::ui::run_terminal;

pub async fn run(session: Arc<Session>) -> Result<()> {
    println!("💻 Interactive mode (type `exit` or press Ctrl+C to quit)");
    println!();
    run_terminal(session).await
}
