//! # Resubscribe policies for listeners.
//!
//! [`ResubscribePolicy`] decides what `subscribe` does when the listener already
//! holds a live hub handle.
//!
//! ```text
//! ResubscribePolicy::Reject   → Err(AlreadySubscribed), nothing changes (default)
//! ResubscribePolicy::Replace  → unsubscribe from the old hub, then subscribe
//! ```
//!
//! A stored hub handle that no longer resolves (the hub was closed) counts as
//! unattached under both policies.

/// Policy controlling a second `subscribe` on an attached listener.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResubscribePolicy {
    /// Refuse the call with `RegistryError::AlreadySubscribed` (default).
    #[default]
    Reject,
    /// Detach from the current hub first, then attach to the new one.
    Replace,
}
