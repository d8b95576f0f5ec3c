//! A `tracing` layer that copies events into a [`LogBuffer`].
use std::sync::Arc;

use chrono::Utc;
use tracing::{Event, Subscriber};
use tracing_subscriber::{layer::Context, registry::LookupSpan, Layer};

use super::{LogBuffer, LogEntry};

/// Stores every event that passes the filter in a shared [`LogBuffer`].
pub struct LogCollector {
    buffer: Arc<LogBuffer>,
}

impl LogCollector {
    pub fn new(buffer: Arc<LogBuffer>) -> Self {
        Self { buffer }
    }
}

impl<S> Layer<S> for LogCollector
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();

        let mut message = String::new();
        event.record(&mut MessageVisitor(&mut message));

        let module = metadata
            .module_path()
            .map(|path| path.rsplit("::").next().unwrap_or(path))
            .unwrap_or_else(|| metadata.target())
            .to_string();

        self.buffer.add_entry(LogEntry {
            timestamp: Utc::now(),
            level: *metadata.level(),
            module,
            message,
        });
    }
}

/// Flattens an event into `message key=value ...`.
struct MessageVisitor<'a>(&'a mut String);

impl MessageVisitor<'_> {
    fn set_message(&mut self, message: &str) {
        if self.0.is_empty() {
            self.0.push_str(message);
        } else {
            self.0.insert_str(0, &format!("{} ", message));
        }
    }

    fn push_field(&mut self, name: &str, value: impl std::fmt::Display) {
        if !self.0.is_empty() {
            self.0.push(' ');
        }
        self.0.push_str(&format!("{}={}", name, value));
    }
}

impl tracing::field::Visit for MessageVisitor<'_> {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.set_message(&format!("{:?}", value));
        } else {
            self.push_field(field.name(), format!("{:?}", value));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.set_message(value);
        } else {
            self.push_field(field.name(), value);
        }
    }

    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.push_field(field.name(), value);
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.push_field(field.name(), value);
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.push_field(field.name(), value);
    }
}
