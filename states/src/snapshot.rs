use std::any::{Any, TypeId};
use std::collections::BTreeMap;

use crate::Error;

/// Cloned state values visible to a running command.
///
/// Taken once per flush, so every command spawned in the same flush sees the
/// same values even if the UI keeps mutating the live states.
#[derive(Default)]
pub struct CommandSnapshot {
    states: BTreeMap<TypeId, Box<dyn Any + Send>>,
}

impl CommandSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_cloned(&mut self, id: TypeId, value: Box<dyn Any + Send>) {
        self.states.insert(id, value);
    }

    /// Builder-style insert, mostly for tests.
    pub fn with<T: Clone + Send + 'static>(mut self, value: T) -> Self {
        self.states.insert(TypeId::of::<T>(), Box::new(value));
        self
    }

    pub fn try_state<T: Clone + 'static>(&self) -> Result<T, Error> {
        self.states
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_ref::<T>())
            .cloned()
            .ok_or_else(|| Error::state_not_found::<T>("command snapshot"))
    }

    /// Clone of the snapshotted state.
    ///
    /// # Panics
    /// Panics if `T` was not registered with a snapshot, which is a wiring bug.
    pub fn state<T: Clone + 'static>(&self) -> T {
        match self.try_state::<T>() {
            Ok(state) => state,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl std::fmt::Debug for CommandSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandSnapshot")
            .field("states", &self.states.len())
            .finish()
    }
}
