//! Error types used by the registry.
//!
//! Hub-side operations (`attach`, `detach`, `notify`, `set_reading`) never fail:
//! a handle that no longer resolves is a silent skip or a logged no-op. Only the
//! listener-side `subscribe` (and `scoped`, built on it) reports
//! [`RegistryError`].

use thiserror::Error;

use crate::core::{HubId, ListenerId};

/// # Errors produced by listener subscription.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The listener handle no longer resolves.
    #[error("listener {listener} no longer exists")]
    ListenerGone {
        /// The stale handle.
        listener: ListenerId,
    },

    /// The hub handle no longer resolves.
    #[error("hub {hub} no longer exists")]
    HubGone {
        /// The stale handle.
        hub: HubId,
    },

    /// The listener is attached to a live hub and the policy is `Reject`.
    #[error("listener '{name}' is already subscribed to {hub}")]
    AlreadySubscribed {
        /// Listener name.
        name: String,
        /// Hub the listener is currently attached to.
        hub: HubId,
    },
}

impl RegistryError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use hubwatch::{PhoneDisplay, Registry, RegistryError};
    ///
    /// let mut reg = Registry::default();
    /// let hub = reg.open_hub("WeatherStation");
    /// let phone = reg.add_listener("phone", PhoneDisplay);
    /// reg.subscribe(phone, hub).unwrap();
    ///
    /// let err = reg.subscribe(phone, hub).unwrap_err();
    /// assert_eq!(err.as_label(), "already_subscribed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RegistryError::ListenerGone { .. } => "listener_gone",
            RegistryError::HubGone { .. } => "hub_gone",
            RegistryError::AlreadySubscribed { .. } => "already_subscribed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            RegistryError::ListenerGone { listener } => format!("stale listener: {listener}"),
            RegistryError::HubGone { hub } => format!("stale hub: {hub}"),
            RegistryError::AlreadySubscribed { name, hub } => {
                format!("listener={name} attached to {hub}")
            }
        }
    }
}
