//! The terminal widget the view renders into.
//!
//! A widget is an exclusively owned resource: it is opened once when a view is
//! mounted and disposed once when the view goes away.
mod console;
mod scrollback;

pub use console::CrosstermWidget;
pub use scrollback::ScrollbackWidget;

use crate::error::TerminalError;

/// Fallback size used when the real terminal size cannot be queried.
pub const DEFAULT_SIZE: (u16, u16) = (80, 24);

/// Where a [`TerminalView`](crate::ui::TerminalView) writes the log.
pub trait TerminalWidget {
    /// Acquires the widget. A zero width must be accepted.
    fn open(&mut self, size: (u16, u16)) -> Result<(), TerminalError>;

    /// Writes `text` without forcing a line break.
    fn write(&mut self, text: &str) -> Result<(), TerminalError>;

    /// Writes `text` as a completed line.
    fn writeln(&mut self, text: &str) -> Result<(), TerminalError>;

    /// Releases the widget.
    fn dispose(&mut self) -> Result<(), TerminalError>;

    /// Called when the terminal is resized. Ignored by default.
    fn resize(&mut self, _size: (u16, u16)) {}
}
