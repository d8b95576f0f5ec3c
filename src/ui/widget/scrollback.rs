use std::collections::VecDeque;

use super::TerminalWidget;
use crate::error::TerminalError;

/// An in-memory scrollback: completed lines plus the line still being written.
///
/// Keeps at most `max_lines` completed lines, dropping the oldest first.
#[derive(Debug)]
pub struct ScrollbackWidget {
    lines: VecDeque<String>,
    current: String,
    max_lines: usize,
    is_open: bool,
}

impl ScrollbackWidget {
    pub fn new(max_lines: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            current: String::new(),
            max_lines: max_lines.max(1),
            is_open: false,
        }
    }

    /// The full scrollback as text, ending with the open line.
    pub fn contents(&self) -> String {
        let mut text = String::new();
        for line in &self.lines {
            text.push_str(line);
            text.push('\n');
        }
        text.push_str(&self.current);
        text
    }

    fn push_line(&mut self) {
        if self.lines.len() >= self.max_lines {
            self.lines.pop_front();
        }
        self.lines.push_back(std::mem::take(&mut self.current));
    }

    fn put(&mut self, text: &str) -> Result<(), TerminalError> {
        if !self.is_open {
            return Err(TerminalError::NotOpen);
        }
        for (i, segment) in text.split('\n').enumerate() {
            if i > 0 {
                self.push_line();
            }
            self.current.push_str(segment.trim_end_matches('\r'));
        }
        Ok(())
    }
}

impl Default for ScrollbackWidget {
    fn default() -> Self {
        Self::new(10_000)
    }
}

impl TerminalWidget for ScrollbackWidget {
    fn open(&mut self, _size: (u16, u16)) -> Result<(), TerminalError> {
        self.is_open = true;
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
        self.is_open = false;
        Ok(())
    }
}
