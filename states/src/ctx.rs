use std::any::{TypeId, type_name};
use std::collections::BTreeMap;
use std::sync::Arc;

use flume::{Receiver, Sender};
use log::{debug, error, warn};

use crate::updater::{Update, Waker};
use crate::{Command, CommandSnapshot, Error, State, Updater};

/// Owner of every registered `State` and `Command`.
///
/// The UI thread is the only writer: it mutates states directly through
/// [`state_mut`](Self::state_mut)/[`update`](Self::update), and applies
/// results produced by commands with [`sync_updates`](Self::sync_updates).
pub struct StateCtx {
    states: BTreeMap<TypeId, Box<dyn State>>,
    commands: BTreeMap<TypeId, Box<dyn Command>>,
    queued: Vec<TypeId>,

    send: Sender<Update>,
    recv: Receiver<Update>,
    waker: Option<Waker>,

    #[cfg(not(target_arch = "wasm32"))]
    tasks: tokio::task::JoinSet<()>,
}

impl Default for StateCtx {
    fn default() -> Self {
        Self::new()
    }
}

impl StateCtx {
    pub fn new() -> Self {
        let (send, recv) = flume::unbounded();

        Self {
            states: BTreeMap::new(),
            commands: BTreeMap::new(),
            queued: Vec::new(),
            send,
            recv,
            waker: None,
            #[cfg(not(target_arch = "wasm32"))]
            tasks: tokio::task::JoinSet::new(),
        }
    }

    /// Register a state. Registering the same type twice replaces the value.
    pub fn add_state<T: State>(&mut self, state: T) {
        if self.states.insert(TypeId::of::<T>(), Box::new(state)).is_some() {
            debug!("State {} replaced", type_name::<T>());
        }
    }

    pub fn record_command<C: Command>(&mut self, command: C) {
        self.commands.insert(TypeId::of::<C>(), Box::new(command));
    }

    /// Called every time an `Updater` publishes a result, typically to
    /// request a repaint.
    pub fn set_waker(&mut self, waker: impl Fn() + Send + Sync + 'static) {
        self.waker = Some(Arc::new(waker));
    }

    pub fn try_state<T: State>(&self) -> Result<&T, Error> {
        self.states
            .get(&TypeId::of::<T>())
            .and_then(|state| state.as_any().downcast_ref::<T>())
            .ok_or_else(|| Error::state_not_found::<T>("StateCtx::state"))
    }

    /// # Panics
    /// Panics if `T` was never registered with [`add_state`](Self::add_state).
    pub fn state<T: State>(&self) -> &T {
        match self.try_state::<T>() {
            Ok(state) => state,
            Err(err) => panic!("{err}"),
        }
    }

    /// # Panics
    /// Panics if `T` was never registered with [`add_state`](Self::add_state).
    pub fn state_mut<T: State>(&mut self) -> &mut T {
        match self
            .states
            .get_mut(&TypeId::of::<T>())
            .and_then(|state| state.as_any_mut().downcast_mut::<T>())
        {
            Some(state) => state,
            None => panic!("{}", Error::state_not_found::<T>("StateCtx::state_mut")),
        }
    }

    pub fn update<T: State>(&mut self, f: impl FnOnce(&mut T)) {
        f(self.state_mut::<T>());
    }

    pub fn updater(&self) -> Updater {
        Updater::new(self.send.clone(), self.waker.clone())
    }

    /// Queue a command; it runs on the next [`flush_commands`](Self::flush_commands).
    pub fn enqueue_command<C: Command>(&mut self) {
        let id = TypeId::of::<C>();
        if !self.commands.contains_key(&id) {
            error!("{}", Error::command_not_found::<C>("StateCtx::enqueue_command"));
            return;
        }
        self.queued.push(id);
    }

    /// Queue and immediately flush a command.
    pub fn dispatch<C: Command>(&mut self) {
        self.enqueue_command::<C>();
        self.flush_commands();
    }

    /// Spawn every queued command with a fresh snapshot of the states.
    ///
    /// Native builds spawn onto the ambient tokio runtime, so this must be
    /// called from inside one.
    pub fn flush_commands(&mut self) {
        if self.queued.is_empty() {
            return;
        }

        let queued = std::mem::take(&mut self.queued);
        for id in queued {
            let Some(command) = self.commands.get(&id) else {
                continue;
            };
            let future = command.run(self.snapshot(), self.updater());
            self.spawn(future);
        }
    }

    fn snapshot(&self) -> CommandSnapshot {
        let mut snap = CommandSnapshot::new();
        for (id, state) in &self.states {
            if let Some(value) = state.snapshot() {
                snap.insert_cloned(*id, value);
            }
        }
        snap
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn spawn(&mut self, future: crate::CommandFuture) {
        self.tasks.spawn(future);
    }

    #[cfg(target_arch = "wasm32")]
    fn spawn(&mut self, future: crate::CommandFuture) {
        wasm_bindgen_futures::spawn_local(future);
    }

    /// Apply every update published since the last call. Returns how many
    /// updates were applied.
    pub fn sync_updates(&mut self) -> usize {
        #[cfg(not(target_arch = "wasm32"))]
        while let Some(result) = self.tasks.try_join_next() {
            report_join_error(result);
        }

        let mut applied = 0;
        while let Ok(update) = self.recv.try_recv() {
            match self.states.get_mut(&update.target) {
                Some(state) => {
                    (update.apply)(state.as_any_mut());
                    applied += 1;
                }
                None => warn!("Dropping update for unregistered state {}", update.name),
            }
        }
        applied
    }

    /// Number of spawned commands that have not been reaped yet.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Flush queued commands and drive every spawned task to completion,
    /// applying updates as each one finishes.
    #[cfg(not(target_arch = "wasm32"))]
    pub async fn settle(&mut self) {
        self.sync_updates();
        self.flush_commands();

        while let Some(result) = self.tasks.join_next().await {
            report_join_error(result);
            self.sync_updates();
        }

        self.sync_updates();
    }

    /// Abort all in-flight commands.
    #[cfg(not(target_arch = "wasm32"))]
    pub async fn shutdown(&mut self) {
        self.tasks.shutdown().await;
        self.queued.clear();
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn report_join_error(result: Result<(), tokio::task::JoinError>) {
    if let Err(err) = result
        && err.is_panic()
    {
        error!("Command task panicked: {err}");
    }
}

impl std::fmt::Debug for StateCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateCtx")
            .field("states", &self.states.len())
            .field("commands", &self.commands.len())
            .field("queued", &self.queued.len())
            .field("pending_updates", &self.recv.len())
            .finish_non_exhaustive()
    }
}
