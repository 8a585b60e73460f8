//! # Listener: a named observer with at most one hub back-reference.
//!
//! ```text
//!              subscribe(hub)
//!  Unattached ────────────────► Attached(hub)
//!      ▲                              │
//!      └──── unsubscribe / remove ────┘
//! ```
//!
//! The back-reference is a [`HubId`]; once the hub is closed it no longer
//! resolves and the listener behaves as unattached (updates are skipped,
//! `unsubscribe` is a no-op).

use std::fmt;
use std::sync::Arc;

use super::arena::Handle;
use super::hub::HubId;
use crate::observers::Observe;

/// Existence-checkable handle to a [`Listener`] owned by a [`Registry`](crate::Registry).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) Handle);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener#{}v{}", self.0.index(), self.0.generation())
    }
}

/// Registered listener.
pub struct Listener {
    name: Arc<str>,
    hub: Option<HubId>,
    observer: Box<dyn Observe>,
}

impl Listener {
    pub(crate) fn new(name: impl Into<Arc<str>>, observer: Box<dyn Observe>) -> Self {
        Self {
            name: name.into(),
            hub: None,
            observer,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn name_arc(&self) -> Arc<str> {
        Arc::clone(&self.name)
    }

    /// Stored hub handle. It may no longer resolve.
    pub fn hub(&self) -> Option<HubId> {
        self.hub
    }

    pub(crate) fn set_hub(&mut self, hub: Option<HubId>) {
        self.hub = hub;
    }

    pub(crate) fn observer_mut(&mut self) -> &mut dyn Observe {
        self.observer.as_mut()
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("name", &self.name)
            .field("hub", &self.hub)
            .finish_non_exhaustive()
    }
}
