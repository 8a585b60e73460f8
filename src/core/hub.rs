//! # Hub: observed state plus a registry of listener handles.
//!
//! A [`Hub`] never owns its listeners. It keeps an ordered list of
//! [`ListenerId`]s which may go stale at any time (the listener was removed
//! from the [`Registry`](crate::Registry)). Stale entries are tolerated until
//! the next broadcast, which prunes them.
//!
//! ## Rules
//! - `attach` appends without de-duplication; the same listener attached twice
//!   gets two deliveries per broadcast.
//! - `detach` removes **every** entry equal to the target.
//! - After `snapshot_and_prune` the list holds no stale entries.

use std::fmt;
use std::sync::Arc;

use super::arena::Handle;
use super::listener::ListenerId;

/// Observed state of a weather hub.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Reading {
    /// Temperature in degrees Celsius.
    pub temperature: f32,
    /// Relative humidity in percent.
    pub humidity: f32,
}

impl Reading {
    pub fn new(temperature: f32, humidity: f32) -> Self {
        Self {
            temperature,
            humidity,
        }
    }
}

/// Existence-checkable handle to a [`Hub`] owned by a [`Registry`](crate::Registry).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HubId(pub(crate) Handle);

impl fmt::Display for HubId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hub#{}v{}", self.0.index(), self.0.generation())
    }
}

/// Broadcasting subject.
#[derive(Debug)]
pub struct Hub {
    name: Arc<str>,
    reading: Reading,
    listeners: Vec<ListenerId>,
}

impl Hub {
    pub(crate) fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            reading: Reading::default(),
            listeners: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn name_arc(&self) -> Arc<str> {
        Arc::clone(&self.name)
    }

    /// Current observed state.
    pub fn reading(&self) -> Reading {
        self.reading
    }

    /// Registered handles, stale ones included.
    pub fn listeners(&self) -> &[ListenerId] {
        &self.listeners
    }

    /// Number of registered handles, stale ones included.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub(crate) fn set_reading(&mut self, reading: Reading) {
        self.reading = reading;
    }

    pub(crate) fn attach(&mut self, listener: ListenerId) {
        self.listeners.push(listener);
    }

    /// Removes every entry equal to `listener`, returns how many were removed.
    pub(crate) fn detach(&mut self, listener: ListenerId) -> usize {
        let before = self.listeners.len();
        self.listeners.retain(|id| *id != listener);
        before - self.listeners.len()
    }

    /// Resolves the live entries in registration order and drops the stale ones.
    ///
    /// Returns `(snapshot, pruned)`.
    pub(crate) fn snapshot_and_prune(
        &mut self,
        is_live: impl Fn(ListenerId) -> bool,
    ) -> (Vec<ListenerId>, usize) {
        let snapshot: Vec<ListenerId> = self
            .listeners
            .iter()
            .copied()
            .filter(|id| is_live(*id))
            .collect();
        let pruned = self.listeners.len() - snapshot.len();
        self.listeners.clone_from(&snapshot);
        (snapshot, pruned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::arena::Arena;

    fn ids(n: usize) -> (Arena<()>, Vec<ListenerId>) {
        let mut arena = Arena::new();
        let ids = (0..n).map(|_| ListenerId(arena.insert(()))).collect();
        (arena, ids)
    }

    #[test]
    fn test_attach_keeps_duplicates() {
        let (_arena, ids) = ids(1);
        let mut hub = Hub::new("h");
        hub.attach(ids[0]);
        hub.attach(ids[0]);
        assert_eq!(hub.len(), 2);
        assert_eq!(hub.detach(ids[0]), 2);
        assert!(hub.is_empty());
    }

    #[test]
    fn test_snapshot_prunes_stale_and_keeps_order() {
        let (mut arena, ids) = ids(3);
        let mut hub = Hub::new("h");
        for id in &ids {
            hub.attach(*id);
        }
        arena.remove(ids[1].0);

        let (snapshot, pruned) = hub.snapshot_and_prune(|id| arena.contains(id.0));
        assert_eq!(snapshot, vec![ids[0], ids[2]]);
        assert_eq!(pruned, 1);
        assert_eq!(hub.listeners(), &[ids[0], ids[2]]);
    }

    #[test]
    fn test_detach_missing_is_zero() {
        let (_arena, ids) = ids(2);
        let mut hub = Hub::new("h");
        hub.attach(ids[0]);
        assert_eq!(hub.detach(ids[1]), 0);
        assert_eq!(hub.listeners(), &[ids[0]]);
    }
}
