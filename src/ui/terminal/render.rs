use tracing::{trace, warn};

use crate::error::TerminalError;
use crate::types::{Command, CommandDelta, CommandKind};
use crate::ui::widget::TerminalWidget;

use super::TerminalView;

impl<W: TerminalWidget> TerminalView<W> {
    /// Writes the mount-time snapshot followed by a single prompt.
    pub(super) fn replay(&mut self, snapshot: &[Command]) -> Result<(), TerminalError> {
        for command in snapshot {
            self.write_command(command)?;
            self.rendered += 1;
        }
        self.write_prompt()
    }

    /// Writes one appended record. Inputs are followed by the prompt, outputs
    /// are not.
    ///
    /// Records at an index below the render cursor were already written and are
    /// skipped; returns whether anything was written.
    pub fn render_delta(&mut self, delta: CommandDelta) -> Result<bool, TerminalError> {
        if delta.index < self.rendered {
            trace!(index = delta.index, rendered = self.rendered, "record already rendered");
            return Ok(false);
        }
        if delta.index > self.rendered {
            warn!(
                index = delta.index,
                rendered = self.rendered,
                "command log delta arrived out of order"
            );
        }

        self.write_command(&delta.command)?;
        if delta.command.is_input() {
            self.write_prompt()?;
        }
        self.rendered = delta.index + 1;
        Ok(true)
    }

    fn write_command(&mut self, command: &Command) -> Result<(), TerminalError> {
        let widget = self.widget.as_mut().ok_or(TerminalError::NotOpen)?;
        match command.kind {
            CommandKind::Input => widget.writeln(&command.content),
            CommandKind::Output => widget.write(&command.content),
        }
    }

    fn write_prompt(&mut self) -> Result<(), TerminalError> {
        let widget = self.widget.as_mut().ok_or(TerminalError::NotOpen)?;
        widget.write(&self.prompt)
    }
}
