//! Shared session state: the append-only command log and its observers.
mod log;
mod subscription;

pub use log::CommandLog;
pub use subscription::Subscription;
