//! Line editing for the text typed after the prompt.
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

const MAX_HISTORY: usize = 500;

/// What a key press did to the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// Enter was pressed; the line is handed over and the buffer cleared.
    Submit(String),
    /// Ctrl+C or Ctrl+D on an empty line.
    Exit,
    /// The buffer or the cursor changed.
    Changed,
    Ignored,
}

/// A Unicode-safe input buffer with a character-indexed cursor and history.
#[derive(Debug, Default)]
pub struct LineEditor {
    buffer: String,
    cursor_pos: usize,
    history: Vec<String>,
    history_index: Option<usize>,
}

impl LineEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// The line typed so far.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Cursor position in characters, not bytes.
    pub fn cursor(&self) -> usize {
        self.cursor_pos
    }

    /// Applies one key press and reports what it did.
    pub fn handle_key(&mut self, key: KeyEvent) -> EditOutcome {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => EditOutcome::Exit,
            (KeyCode::Char('d'), KeyModifiers::CONTROL) if self.buffer.is_empty() => {
                EditOutcome::Exit
            }
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                self.buffer.clear();
                self.cursor_pos = 0;
                EditOutcome::Changed
            }
            (KeyCode::Enter, _) => EditOutcome::Submit(self.take_line()),
            (KeyCode::Char(c), modifiers) if !modifiers.contains(KeyModifiers::CONTROL) => {
                self.insert_char(c);
                self.history_index = None;
                EditOutcome::Changed
            }
            (KeyCode::Backspace, _) => changed(self.remove_char_before()),
            (KeyCode::Delete, _) => changed(self.remove_char_at()),
            (KeyCode::Left, _) => changed(self.cursor_left()),
            (KeyCode::Right, _) => changed(self.cursor_right()),
            (KeyCode::Home, _) => {
                self.cursor_pos = 0;
                EditOutcome::Changed
            }
            (KeyCode::End, _) => {
                self.cursor_end();
                EditOutcome::Changed
            }
            (KeyCode::Up, _) => changed(self.navigate_history(true)),
            (KeyCode::Down, _) => changed(self.navigate_history(false)),
            _ => EditOutcome::Ignored,
        }
    }

    /// Hands over the current line, recording non-blank lines in the history.
    pub fn take_line(&mut self) -> String {
        let line = std::mem::take(&mut self.buffer);
        self.cursor_pos = 0;
        self.history_index = None;

        if !line.trim().is_empty() && self.history.last() != Some(&line) {
            if self.history.len() >= MAX_HISTORY {
                self.history.remove(0);
            }
            self.history.push(line.clone());
        }
        line
    }

    fn byte_pos(&self, char_pos: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(char_pos)
            .map(|(i, _)| i)
            .unwrap_or(self.buffer.len())
    }

    pub fn insert_char(&mut self, c: char) {
        let byte_pos = self.byte_pos(self.cursor_pos);
        self.buffer.insert(byte_pos, c);
        self.cursor_pos += 1;
    }

    pub fn remove_char_before(&mut self) -> bool {
        if self.cursor_pos == 0 {
            return false;
        }
        let byte_pos = self.byte_pos(self.cursor_pos - 1);
        self.buffer.remove(byte_pos);
        self.cursor_pos -= 1;
        true
    }

    pub fn remove_char_at(&mut self) -> bool {
        if self.cursor_pos >= self.buffer.chars().count() {
            return false;
        }
        let byte_pos = self.byte_pos(self.cursor_pos);
        self.buffer.remove(byte_pos);
        true
    }

    fn cursor_left(&mut self) -> bool {
        if self.cursor_pos == 0 {
            return false;
        }
        self.cursor_pos -= 1;
        true
    }

    fn cursor_right(&mut self) -> bool {
        if self.cursor_pos >= self.buffer.chars().count() {
            return false;
        }
        self.cursor_pos += 1;
        true
    }

    fn cursor_end(&mut self) {
        self.cursor_pos = self.buffer.chars().count();
    }

    fn navigate_history(&mut self, up: bool) -> bool {
        if self.history.is_empty() {
            return false;
        }

        let new_index = if up {
            match self.history_index {
                None => Some(self.history.len() - 1),
                Some(0) => Some(0),
                Some(i) => Some(i - 1),
            }
        } else {
            match self.history_index {
                None => return false,
                Some(i) if i + 1 >= self.history.len() => None,
                Some(i) => Some(i + 1),
            }
        };

        self.history_index = new_index;
        match new_index {
            Some(index) => self.buffer = self.history[index].clone(),
            None => self.buffer.clear(),
        }
        self.cursor_end();
        true
    }
}

fn changed(did_change: bool) -> EditOutcome {
    if did_change {
        EditOutcome::Changed
    } else {
        EditOutcome::Ignored
    }
}
