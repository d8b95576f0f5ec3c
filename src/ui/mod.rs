pub mod input;
pub mod prompt;
pub mod runner;
pub mod terminal;
pub mod widget;

mod event;

pub use event::UIEvent;
pub use input::{EditOutcome, LineEditor};
pub use prompt::Prompt;
pub use runner::run_terminal;
pub use terminal::TerminalView;
pub use widget::{CrosstermWidget, ScrollbackWidget, TerminalWidget};
