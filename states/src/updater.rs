use std::any::{Any, TypeId, type_name};
use std::sync::Arc;

use flume::Sender;
use log::warn;

use crate::State;

pub(crate) type Mutation = Box<dyn FnOnce(&mut dyn Any) + Send>;

/// A deferred state mutation produced off the UI thread.
pub(crate) struct Update {
    pub(crate) target: TypeId,
    pub(crate) name: &'static str,
    pub(crate) apply: Mutation,
}

pub(crate) type Waker = Arc<dyn Fn() + Send + Sync>;

/// Send-safe handle used by commands to publish results.
///
/// Updates are queued and applied by [`StateCtx::sync_updates`](crate::StateCtx::sync_updates)
/// on the UI thread, in the order they were sent.
#[derive(Clone)]
pub struct Updater {
    send: Sender<Update>,
    waker: Option<Waker>,
}

impl Updater {
    pub(crate) fn new(send: Sender<Update>, waker: Option<Waker>) -> Self {
        Self { send, waker }
    }

    /// Replace the whole state value.
    pub fn set<T: State + Send>(&self, value: T) {
        self.update::<T>(move |state| *state = value);
    }

    /// Mutate the state in place once the update is applied.
    pub fn update<T: State>(&self, f: impl FnOnce(&mut T) + Send + 'static) {
        let apply: Mutation = Box::new(move |any| {
            if let Some(state) = any.downcast_mut::<T>() {
                f(state);
            }
        });

        let update = Update {
            target: TypeId::of::<T>(),
            name: type_name::<T>(),
            apply,
        };

        if self.send.send(update).is_err() {
            warn!("StateCtx dropped, discarding update for {}", type_name::<T>());
            return;
        }

        if let Some(waker) = &self.waker {
            waker();
        }
    }
}

impl std::fmt::Debug for Updater {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Updater")
            .field("queued", &self.send.len())
            .field("has_waker", &self.waker.is_some())
            .finish()
    }
}
