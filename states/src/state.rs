use std::any::Any;

/// A value stored in a [`StateCtx`](crate::StateCtx), addressed by its concrete type.
///
/// States live on the UI thread. A state that returns a snapshot becomes
/// readable by commands through [`CommandSnapshot`](crate::CommandSnapshot).
pub trait State: Any {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// A `Send` copy handed to commands when they are flushed.
    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        None
    }
}

/// `State::snapshot` body for states that are cheap to clone.
pub fn snapshot_clone<T: Clone + Send + 'static>(state: &T) -> Option<Box<dyn Any + Send>> {
    Some(Box::new(state.clone()))
}
