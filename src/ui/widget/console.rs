use std::io::{stdout, Stdout, Write};

use crossterm::{
    cursor, queue,
    style::Print,
    terminal::{self, Clear, ClearType},
};
use tracing::debug;
use unicode_width::UnicodeWidthStr;

use super::{TerminalWidget, DEFAULT_SIZE};
use crate::error::TerminalError;

/// Renders the scrollback straight into a real terminal.
///
/// Line feeds are translated to `\r\n` because the terminal runs in raw mode
/// while the widget is open. The widget tracks the column the last write left
/// the cursor on so pending input can be redrawn after the prompt.
pub struct CrosstermWidget<W: Write = Stdout> {
    out: W,
    raw_mode: bool,
    is_open: bool,
    column: usize,
    size: (u16, u16),
}

impl CrosstermWidget<Stdout> {
    /// A widget on the process's stdout. Opening it enables raw mode.
    pub fn stdout() -> Self {
        Self {
            raw_mode: true,
            ..Self::with_writer(stdout())
        }
    }

    /// Queries the terminal size, falling back to 80x24 when stdout is not a tty.
    pub fn current_size() -> (u16, u16) {
        terminal::size().unwrap_or(DEFAULT_SIZE)
    }
}

impl<W: Write> CrosstermWidget<W> {
    /// A widget over an arbitrary writer. Raw mode is left untouched.
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            raw_mode: false,
            is_open: false,
            column: 0,
            size: DEFAULT_SIZE,
        }
    }

    #[cfg(test)]
    pub fn column(&self) -> usize {
        self.column
    }

    #[cfg(test)]
    pub fn writer(&self) -> &W {
        &self.out
    }

    fn put(&mut self, text: &str) -> Result<(), TerminalError> {
        if !self.is_open {
            return Err(TerminalError::NotOpen);
        }

        for (i, segment) in text.split('\n').enumerate() {
            if i > 0 {
                queue!(self.out, Print("\r\n"))?;
                self.column = 0;
            }
            if segment.is_empty() {
                continue;
            }
            queue!(self.out, Print(segment))?;
            self.column = match segment.rfind('\r') {
                Some(pos) => UnicodeWidthStr::width(&segment[pos + 1..]),
                None => self.column + UnicodeWidthStr::width(segment),
            };
        }

        self.out.flush()?;
        Ok(())
    }

    fn screen_column(&self, column: usize) -> u16 {
        let width = self.size.0 as usize;
        if width == 0 {
            0
        } else {
            (column % width) as u16
        }
    }

    /// Redraws the not yet submitted input after the last written text and
    /// places the cursor `cursor` characters into it.
    pub fn redraw_pending(&mut self, pending: &str, cursor: usize) -> Result<(), TerminalError> {
        if !self.is_open {
            return Err(TerminalError::NotOpen);
        }

        let before_cursor: usize = pending
            .chars()
            .take(cursor)
            .map(|c| unicode_width::UnicodeWidthChar::width(c).unwrap_or(0))
            .sum();

        let start = self.screen_column(self.column);
        let end = self.screen_column(self.column + before_cursor);
        queue!(
            self.out,
            cursor::MoveToColumn(start),
            Clear(ClearType::UntilNewLine),
            Print(pending),
            cursor::MoveToColumn(end)
        )?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> TerminalWidget for CrosstermWidget<W> {
    fn open(&mut self, size: (u16, u16)) -> Result<(), TerminalError> {
        if self.is_open {
            return Ok(());
        }
        if self.raw_mode {
            terminal::enable_raw_mode()?;
        }
        self.size = size;
        self.is_open = true;
        debug!(width = size.0, height = size.1, "terminal widget opened");
        Ok(())
    }

    fn write(&mut self, text: &str) -> Result<(), TerminalError> {
        self.put(text)
    }

    fn writeln(&mut self, text: &str) -> Result<(), TerminalError> {
        self.put(text)?;
        self.put("\n")
    }

    fn dispose(&mut self) -> Result<(), TerminalError> {
        if !self.is_open {
            return Ok(());
        }
        self.is_open = false;
        self.out.flush()?;
        if self.raw_mode {
            terminal::disable_raw_mode()?;
        }
        debug!("terminal widget disposed");
        Ok(())
    }

    fn resize(&mut self, size: (u16, u16)) {
        self.size = size;
    }
}
