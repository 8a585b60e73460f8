//! # Scoped listener subscription.
//!
//! [`Subscription`] is returned by [`Registry::scoped`]. It owns the listener it
//! created: dropping the guard (normal scope exit, early return, `?`, or
//! unwinding) unsubscribes the listener and removes it from the registry.
//!
//! ```text
//! {
//!     let mut temp = registry.scoped("Temporary Phone", PhoneDisplay, hub)?;
//!     temp.set_reading(hub, reading);     // guard derefs to Registry
//! }                                       // drop → remove_listener(temp.id())
//! ```

use std::ops::{Deref, DerefMut};

use super::listener::ListenerId;
use super::registry::Registry;

/// Guard that destroys its listener on drop.
#[must_use = "dropping the guard immediately removes the listener"]
pub struct Subscription<'r> {
    registry: &'r mut Registry,
    listener: ListenerId,
}

impl<'r> Subscription<'r> {
    pub(crate) fn new(registry: &'r mut Registry, listener: ListenerId) -> Self {
        Self { registry, listener }
    }

    /// Handle of the guarded listener.
    pub fn id(&self) -> ListenerId {
        self.listener
    }

    /// Removes the listener now. Equivalent to dropping the guard.
    pub fn release(self) {}
}

impl Deref for Subscription<'_> {
    type Target = Registry;

    fn deref(&self) -> &Registry {
        &*self.registry
    }
}

impl DerefMut for Subscription<'_> {
    fn deref_mut(&mut self) -> &mut Registry {
        &mut *self.registry
    }
}

impl Drop for Subscription<'_> {
    fn drop(&mut self) {
        self.registry.remove_listener(self.listener);
    }
}
