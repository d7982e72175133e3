//! Type-keyed UI state container.
//!
//! Every piece of UI state is a [`State`] registered once in a [`StateCtx`].
//! Side effects are [`Command`]s: they run off the UI thread against a
//! [`CommandSnapshot`] and publish results through an [`Updater`], which the
//! UI applies with [`StateCtx::sync_updates`] at the start of each frame.

mod command;
mod ctx;
mod error;
mod snapshot;
mod state;
mod updater;

pub use command::{Command, CommandFuture};
pub use ctx::StateCtx;
pub use error::Error;
pub use snapshot::CommandSnapshot;
pub use state::{State, snapshot_clone};
pub use updater::Updater;
