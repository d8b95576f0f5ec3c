//! Events delivered to the interactive terminal loop.
use crossterm::event::KeyEvent;

#[derive(Debug)]
pub enum UIEvent {
    KeyPress(KeyEvent),
    Resize(u16, u16),
}
