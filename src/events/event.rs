//! # Diagnostic events emitted by the registry.
//!
//! The [`EventKind`] enum classifies event types across three categories:
//! - **Registration events**: attach / detach / subscribe / unsubscribe
//! - **Broadcast events**: notifying, pruning, per-listener updates
//! - **Lifecycle events**: hubs opened/closed, listeners destroyed
//!
//! The [`Event`] struct carries additional metadata such as the hub and
//! listener names, counts and the broadcast message.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//! A single registry publishes in call order, so per-registry `seq` order is the
//! order the operations happened in.
//!
//! ## Example
//! ```rust
//! use hubwatch::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::ListenerDetached)
//!     .with_hub("WeatherStation")
//!     .with_count(2);
//!
//! assert_eq!(ev.kind, EventKind::ListenerDetached);
//! assert_eq!(ev.hub.as_deref(), Some("WeatherStation"));
//! assert_eq!(ev.count, Some(2));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

use crate::core::Reading;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of registry events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Hub lifecycle ===
    /// Hub was created.
    ///
    /// Sets:
    /// - `hub`: hub name
    HubOpened,

    /// Hub was closed; handles to it no longer resolve.
    ///
    /// Sets:
    /// - `hub`: hub name
    /// - `count`: handles still registered at close time
    HubClosed,

    // === Registration ===
    /// A listener handle was appended to a hub.
    ///
    /// Sets:
    /// - `hub`: hub name
    /// - `listener`: listener name (absent if the handle was already stale)
    /// - `count`: registered handles after the append
    ListenerAttached,

    /// Entries matching a listener were removed from a hub.
    ///
    /// Sets:
    /// - `hub`: hub name
    /// - `listener`: listener name
    /// - `count`: number of entries removed
    ListenerDetached,

    /// Detach was requested for a listener handle that no longer resolves.
    ///
    /// Sets:
    /// - `hub`: hub name
    DetachExpired,

    /// Listener recorded a hub and attached itself.
    ///
    /// Sets:
    /// - `hub`: hub name
    /// - `listener`: listener name
    Subscribed,

    /// Listener detached itself and cleared its hub handle.
    ///
    /// Sets:
    /// - `hub`: hub name
    /// - `listener`: listener name
    /// - `count`: number of entries removed
    Unsubscribed,

    // === Broadcast ===
    /// Broadcast is starting.
    ///
    /// Sets:
    /// - `hub`: hub name
    /// - `count`: registered handles before pruning
    /// - `message`: broadcast message
    /// - `reading`: the hub's current reading
    Notifying,

    /// Stale handles were dropped during a broadcast.
    ///
    /// Sets:
    /// - `hub`: hub name
    /// - `count`: number of handles pruned
    ListenersPruned,

    /// A listener rendered a display line for a broadcast.
    ///
    /// Sets:
    /// - `hub`: hub name (the listener's own hub)
    /// - `listener`: listener name
    /// - `message`: rendered display line
    /// - `reading`: reading the listener observed
    ListenerUpdated,

    // === Listener lifecycle ===
    /// Listener was removed from the registry (after unsubscribing).
    ///
    /// Sets:
    /// - `listener`: listener name
    ListenerDropped,

    // === Subscriber events ===
    /// Subscriber dropped an event (queue full or worker closed).
    ///
    /// Published by [`SubscriberSet`](crate::SubscriberSet); never re-published
    /// when the overflow event itself is dropped.
    ///
    /// Sets:
    /// - `listener`: subscriber name
    /// - `message`: reason, `"full"` or `"closed"`
    SubscriberOverflow,
}

/// Registry event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Name of the hub, if applicable.
    pub hub: Option<Arc<str>>,
    /// Name of the listener, if applicable.
    pub listener: Option<Arc<str>>,
    /// Count whose meaning depends on `kind`.
    pub count: Option<u32>,
    /// Broadcast message, rendered line or reason.
    pub message: Option<Arc<str>>,
    /// Hub reading, if applicable.
    pub reading: Option<Reading>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            hub: None,
            listener: None,
            count: None,
            message: None,
            reading: None,
        }
    }

    /// Attaches a hub name.
    #[inline]
    pub fn with_hub(mut self, hub: impl Into<Arc<str>>) -> Self {
        self.hub = Some(hub.into());
        self
    }

    /// Attaches a listener name.
    #[inline]
    pub fn with_listener(mut self, listener: impl Into<Arc<str>>) -> Self {
        self.listener = Some(listener.into());
        self
    }

    /// Attaches a count (saturates at `u32::MAX`).
    #[inline]
    pub fn with_count(mut self, n: usize) -> Self {
        self.count = Some(u32::try_from(n).unwrap_or(u32::MAX));
        self
    }

    /// Attaches a message.
    #[inline]
    pub fn with_message(mut self, message: impl Into<Arc<str>>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Attaches a reading.
    #[inline]
    pub fn with_reading(mut self, reading: Reading) -> Self {
        self.reading = Some(reading);
        self
    }

    /// Creates a subscriber overflow event.
    #[inline]
    pub fn subscriber_overflow(subscriber: &'static str, reason: &'static str) -> Self {
        Event::new(EventKind::SubscriberOverflow)
            .with_listener(subscriber)
            .with_message(reason)
    }

    #[inline]
    pub fn is_subscriber_overflow(&self) -> bool {
        matches!(self.kind, EventKind::SubscriberOverflow)
    }
}
