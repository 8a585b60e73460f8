//! # Registry configuration.
//!
//! Provides [`Config`], the settings used by [`Registry::new`](crate::Registry::new).
//!
//! ## Sentinel values
//! - `bus_capacity = 0` → clamped to 1 by the bus

use crate::policies::ResubscribePolicy;

/// Configuration for a [`Registry`](crate::Registry).
///
/// ## Field semantics
/// - `bus_capacity`: Broadcast ring size for `Bus::subscribe` receivers (min 1; clamped by Bus)
/// - `resubscribe`: What `subscribe` does when the listener is already attached
/// - `update_message`: Message broadcast by `set_reading`
#[derive(Clone, Debug)]
pub struct Config {
    /// Capacity of the event bus broadcast channel ring buffer.
    ///
    /// Broadcast receivers that lag behind more than `bus_capacity` events
    /// observe `Lagged` and skip older items. Taps (used by `spawn_pump`) are
    /// unbounded and not affected.
    pub bus_capacity: usize,

    /// Resubscribe behavior for attached listeners.
    pub resubscribe: ResubscribePolicy,

    /// Message delivered to listeners when a hub's reading changes.
    pub update_message: String,
}

impl Config {
    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `bus_capacity = 1024`
    /// - `resubscribe = ResubscribePolicy::Reject`
    /// - `update_message = "Measurements updated"`
    fn default() -> Self {
        Self {
            bus_capacity: 1024,
            resubscribe: ResubscribePolicy::default(),
            update_message: "Measurements updated".to_string(),
        }
    }
}
