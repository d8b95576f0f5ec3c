//! The terminal view: presents the command log as a live scrollback.
mod controller;
mod lifecycle;
mod render;

#[cfg(test)]
mod tests;

pub use controller::TerminalView;
