use std::sync::{Arc, Mutex};

use tokio::sync::oneshot;

use super::TerminalView;
use crate::error::TerminalError;
use crate::state::CommandLog;
use crate::types::{Command, CommandDelta};
use crate::ui::prompt::Prompt;
use crate::ui::widget::{ScrollbackWidget, TerminalWidget};

const PROMPT: &str = "user@host:/workspace $ ";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Open,
    Write(String),
    Writeln(String),
    Dispose,
}

fn write(text: &str) -> Call {
    Call::Write(text.to_string())
}

fn writeln(text: &str) -> Call {
    Call::Writeln(text.to_string())
}

fn prompt() -> Call {
    write(PROMPT)
}

#[derive(Clone, Default)]
struct RecordingWidget {
    calls: Arc<Mutex<Vec<Call>>>,
}

impl RecordingWidget {
    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn count(&self, call: &Call) -> usize {
        self.calls().iter().filter(|c| *c == call).count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl TerminalWidget for RecordingWidget {
    fn open(&mut self, _size: (u16, u16)) -> Result<(), TerminalError> {
        self.record(Call::Open);
        Ok(())
    }

    fn write(&mut self, text: &str) -> Result<(), TerminalError> {
        self.record(write(text));
        Ok(())
    }

    fn writeln(&mut self, text: &str) -> Result<(), TerminalError> {
        self.record(writeln(text));
        Ok(())
    }

    fn dispose(&mut self) -> Result<(), TerminalError> {
        self.record(Call::Dispose);
        Ok(())
    }
}

fn mount(log: &CommandLog) -> (TerminalView<RecordingWidget>, RecordingWidget) {
    let widget = RecordingWidget::default();
    let view = TerminalView::mount(log, widget.clone(), &Prompt::default(), (80, 24)).unwrap();
    (view, widget)
}

#[test]
fn empty_log_writes_only_the_prompt() {
    let log = CommandLog::new();
    let (view, widget) = mount(&log);

    assert_eq!(widget.calls(), vec![Call::Open, prompt()]);
    assert_eq!(view.rendered(), 0);
}

#[test]
fn mount_replays_existing_commands() {
    let log = CommandLog::new();
    log.append_input("INPUT");
    log.append_output("OUTPUT");

    let (view, widget) = mount(&log);

    assert_eq!(
        widget.calls(),
        vec![Call::Open, writeln("INPUT"), write("OUTPUT"), prompt()]
    );
    assert_eq!(view.rendered(), 2);
}

#[test]
fn appends_after_mount_are_written_incrementally() {
    let log = CommandLog::new();
    let (mut view, widget) = mount(&log);

    log.append_input("echo Hello");
    log.append_output("Hello");
    assert_eq!(view.pump().unwrap(), 2);

    assert_eq!(
        widget.calls(),
        vec![
            Call::Open,
            prompt(),
            writeln("echo Hello"),
            prompt(),
            write("Hello"),
        ]
    );

    log.append_input("echo World");
    assert_eq!(view.pump().unwrap(), 1);

    let calls = widget.calls();
    assert_eq!(&calls[5..], &[writeln("echo World"), prompt()]);
    assert_eq!(widget.count(&writeln("echo Hello")), 1);
}

#[test]
fn output_is_not_followed_by_a_prompt() {
    let log = CommandLog::new();
    let (mut view, widget) = mount(&log);

    log.append_output("no prompt after me");
    view.pump().unwrap();

    assert_eq!(widget.calls().last(), Some(&write("no prompt after me")));
    assert_eq!(widget.count(&prompt()), 1);
}

#[test]
fn loads_then_writes_without_duplicates() {
    let log = CommandLog::new();
    log.append_input("echo Hello");
    log.append_output("Hello");

    let (mut view, widget) = mount(&log);
    log.append_input("echo Hello");
    view.pump().unwrap();

    assert_eq!(
        widget.calls(),
        vec![
            Call::Open,
            writeln("echo Hello"),
            write("Hello"),
            prompt(),
            writeln("echo Hello"),
            prompt(),
        ]
    );
    assert_eq!(view.rendered(), 3);
}

#[test]
fn appends_between_mount_and_first_pump_are_not_skipped() {
    let log = CommandLog::new();
    log.append_output("a");
    let (mut view, widget) = mount(&log);

    log.append_output("b");
    log.append_input("c");
    log.append_output("d");

    assert_eq!(view.pump().unwrap(), 3);
    assert_eq!(view.pump().unwrap(), 0);

    assert_eq!(
        widget.calls(),
        vec![
            Call::Open,
            write("a"),
            prompt(),
            write("b"),
            writeln("c"),
            prompt(),
            write("d"),
        ]
    );
    assert_eq!(view.rendered(), log.len());
}

#[test]
fn stale_deltas_are_ignored() {
    let log = CommandLog::new();
    log.append_input("once");
    let (mut view, widget) = mount(&log);

    let written = view
        .render_delta(CommandDelta {
            index: 0,
            command: Command::input("once"),
        })
        .unwrap();

    assert!(!written);
    assert_eq!(widget.count(&writeln("once")), 1);
}

#[test]
fn remounting_reproduces_the_same_writes() {
    let log = CommandLog::new();
    log.append_input("ls");
    log.append_output("Cargo.toml\nsrc\n");

    let (mut first, first_widget) = mount(&log);
    log.append_input("pwd");
    log.append_output("/workspace\n");
    first.pump().unwrap();
    first.unmount().unwrap();

    let (mut second, second_widget) = mount(&log);
    second.unmount().unwrap();
    let (mut third, third_widget) = mount(&log);
    third.unmount().unwrap();

    assert_eq!(second_widget.calls(), third_widget.calls());
    assert_eq!(
        second_widget.calls(),
        vec![
            Call::Open,
            writeln("ls"),
            write("Cargo.toml\nsrc\n"),
            writeln("pwd"),
            write("/workspace\n"),
            prompt(),
            Call::Dispose,
        ]
    );
    assert_eq!(first_widget.count(&Call::Dispose), 1);
}

#[test]
fn unmount_disposes_exactly_once() {
    let log = CommandLog::new();
    let (mut view, widget) = mount(&log);
    assert_eq!(widget.count(&Call::Dispose), 0);

    assert!(view.unmount().unwrap().is_some());
    assert!(view.unmount().unwrap().is_none());
    drop(view);

    assert_eq!(widget.count(&Call::Dispose), 1);
    assert_eq!(log.subscriber_count(), 0);
}

#[test]
fn dropping_the_view_disposes_the_widget() {
    let log = CommandLog::new();
    let (view, widget) = mount(&log);
    assert_eq!(log.subscriber_count(), 1);

    drop(view);

    assert_eq!(widget.calls(), vec![Call::Open, prompt(), Call::Dispose]);
    assert_eq!(log.subscriber_count(), 0);
}

#[test]
fn pending_updates_are_dropped_on_unmount() {
    let log = CommandLog::new();
    let (mut view, widget) = mount(&log);

    log.append_input("never rendered");
    view.unmount().unwrap();

    assert_eq!(view.pump().unwrap(), 0);
    assert_eq!(widget.count(&writeln("never rendered")), 0);
    assert!(view.widget().is_none());
}

#[test]
fn zero_width_mount_succeeds() {
    let log = CommandLog::new();
    log.append_input("ls");

    let mut view =
        TerminalView::mount(&log, ScrollbackWidget::default(), &Prompt::default(), (0, 0))
            .unwrap();
    log.append_output("file.txt");
    view.pump().unwrap();

    let widget = view.unmount().unwrap().unwrap();
    assert_eq!(widget.contents(), format!("ls\n{PROMPT}file.txt"));
}

#[tokio::test]
async fn run_until_renders_until_shutdown() {
    let log = CommandLog::new();
    let (mut view, widget) = mount(&log);
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let writer = log.clone();
    tokio::spawn(async move {
        writer.append_input("echo Hello");
        writer.append_output("Hello");
        tokio::task::yield_now().await;
        let _ = shutdown_tx.send(());
    });

    assert!(view.next().await.unwrap());
    assert!(view.next().await.unwrap());
    let seen = widget.calls();

    view.run_until(async {
        let _ = shutdown_rx.await;
    })
    .await
    .unwrap();

    assert_eq!(
        seen,
        vec![
            Call::Open,
            prompt(),
            writeln("echo Hello"),
            prompt(),
            write("Hello"),
        ]
    );
    assert_eq!(view.rendered(), 2);
}

#[tokio::test]
async fn next_returns_false_after_unmount() {
    let log = CommandLog::new();
    let (mut view, _widget) = mount(&log);
    view.unmount().unwrap();
    assert!(!view.next().await.unwrap());
}
