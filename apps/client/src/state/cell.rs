//! Reactive single-value containers for server-state snapshots.

use parking_lot::{Mutex, RwLock};
use uuid::Uuid;

type Observer<T> = Box<dyn Fn(Option<&T>) + Send + Sync>;

/// Handle returned by [`StateCell::subscribe`]; pass it back to
/// [`StateCell::unsubscribe`] to stop delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionToken(Uuid);

/// Holds at most one snapshot of a server-owned entity, or nothing when there
/// is no active context.
///
/// `set` replaces the value wholesale and performs no validation: callers are
/// trusted to pass server-validated snapshots. Writers are never ordered with
/// respect to each other; the last `set` wins.
pub struct StateCell<T> {
    value: RwLock<Option<T>>,
    observers: Mutex<Vec<(Uuid, Observer<T>)>>,
}

impl<T: Clone> StateCell<T> {
    pub fn new() -> Self {
        Self {
            value: RwLock::new(None),
            observers: Mutex::new(Vec::new()),
        }
    }

    /// Replace the current value (or unset it with `None`) and notify every
    /// observer synchronously with the new value.
    ///
    /// Observers must not subscribe or unsubscribe on this cell from inside
    /// the callback; the observer list is locked for the duration of the
    /// notification sweep.
    pub fn set(&self, value: Option<T>) {
        *self.value.write() = value.clone();
        let observers = self.observers.lock();
        for (_, observer) in observers.iter() {
            observer(value.as_ref());
        }
    }

    /// Shorthand for `set(None)`.
    pub fn clear(&self) {
        self.set(None);
    }

    pub fn get(&self) -> Option<T> {
        self.value.read().clone()
    }

    pub fn is_set(&self) -> bool {
        self.value.read().is_some()
    }

    /// Register an observer called on every `set`. Returns the token that
    /// removes it again.
    pub fn subscribe<F>(&self, observer: F) -> SubscriptionToken
    where
        F: Fn(Option<&T>) + Send + Sync + 'static,
    {
        let token = Uuid::new_v4();
        self.observers.lock().push((token, Box::new(observer)));
        SubscriptionToken(token)
    }

    pub fn unsubscribe(&self, token: SubscriptionToken) {
        self.observers.lock().retain(|(id, _)| *id != token.0);
    }
}

impl<T: Clone> Default for StateCell<T> {
    fn default() -> Self {
        Self::new()
    }
}
