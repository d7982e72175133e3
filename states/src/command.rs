use std::any::Any;
use std::future::Future;
use std::pin::Pin;

use crate::{CommandSnapshot, Updater};

/// Future returned by [`Command::run`]. `Send` on every target so the
/// native build can hand it to the tokio runtime.
pub type CommandFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// A manual-only side effect (network IO, persistence) triggered by the UI.
///
/// Commands never touch live state. They read the `CommandSnapshot` taken
/// when they were flushed and publish results through the `Updater`.
pub trait Command: Any {
    fn run(&self, snap: CommandSnapshot, updater: Updater) -> CommandFuture;
}
