//! # SubscriberSet: fan-out over multiple subscribers
//!
//! [`SubscriberSet`] distributes each [`Event`] to multiple subscribers, each with
//! its own bounded queue and worker task.
//!
//! ## Rules
//! - `emit` / `emit_arc` return immediately (`try_send`). On a full or closed queue
//!   the event is dropped for that subscriber only and `SubscriberOverflow`
//!   (reason `"full"` / `"closed"`) is published on the bus.
//! - `deliver` awaits queue space instead: nothing is dropped, a slow subscriber
//!   holds back the caller. [`spawn_pump`](super::spawn_pump) uses it.
//! - Per-subscriber FIFO (queue order); no ordering across subscribers.
//! - Panics inside subscribers are caught and logged (isolation).
//!
//! ## Diagram
//! ```text
//!    emit(&Event) / deliver(Arc<Event>)
//!        │                        (Arc-clone per subscriber)
//!        ├────────────────► [queue S1] ─► worker S1 ─► on_event()
//!        ├────────────────► [queue S2] ─► worker S2 ─► on_event()
//!        └────────────────► [queue SN] ─► worker SN ─► on_event()
//!                  │
//!                  └─ full / closed ─► Bus::publish(SubscriberOverflow)
//! ```
//!
//! Overflow events that overflow themselves are not re-published, so a stuck
//! subscriber cannot make the set feed itself forever.

use std::sync::Arc;

use futures::FutureExt;
use tokio::{sync::mpsc, task::JoinHandle};

use super::Subscribe;
use crate::events::{Bus, Event};

/// Per-subscriber channel with metadata
struct SubscriberChannel {
    name: &'static str,
    sender: mpsc::Sender<Arc<Event>>,
}

/// Composite fan-out with per-subscriber bounded queues and worker tasks.
pub struct SubscriberSet {
    channels: Vec<SubscriberChannel>,
    workers: Vec<JoinHandle<()>>,
    bus: Bus,
}

impl SubscriberSet {
    /// Creates a new set and spawns one worker per subscriber.
    ///
    /// Dropped events are reported on `bus`. Must be called inside a tokio
    /// runtime. Minimum queue capacity is 1.
    #[must_use]
    pub fn new(subs: Vec<Arc<dyn Subscribe>>, bus: Bus) -> Self {
        let mut channels = Vec::with_capacity(subs.len());
        let mut workers = Vec::with_capacity(subs.len());

        for sub in subs {
            let cap = sub.queue_capacity().max(1);
            let name = sub.name();
            let (tx, mut rx) = mpsc::channel::<Arc<Event>>(cap);
            let s = Arc::clone(&sub);

            let handle = tokio::spawn(async move {
                while let Some(ev) = rx.recv().await {
                    let fut = s.on_event(ev.as_ref());
                    if let Err(panic_err) = std::panic::AssertUnwindSafe(fut).catch_unwind().await {
                        eprintln!(
                            "[hubwatch] subscriber '{}' panicked: {}",
                            s.name(),
                            panic_message(&*panic_err)
                        );
                    }
                }
            });

            channels.push(SubscriberChannel { name, sender: tx });
            workers.push(handle);
        }

        Self {
            channels,
            workers,
            bus,
        }
    }

    /// Fan-out one event to all subscribers (clones the event once).
    pub fn emit(&self, event: &Event) {
        self.emit_arc(Arc::new(event.clone()));
    }

    /// Fan-out a pre-allocated `Arc<Event>` (non-blocking).
    ///
    /// If a subscriber's queue is **full** or **closed**, the event is dropped for it
    /// and `SubscriberOverflow` is published, unless the event is itself an overflow.
    pub fn emit_arc(&self, event: Arc<Event>) {
        let is_overflow_evt = event.is_subscriber_overflow();

        for channel in &self.channels {
            let reason = match channel.sender.try_send(Arc::clone(&event)) {
                Ok(()) => continue,
                Err(mpsc::error::TrySendError::Full(_)) => "full",
                Err(mpsc::error::TrySendError::Closed(_)) => "closed",
            };
            if !is_overflow_evt {
                self.bus
                    .publish(Event::subscriber_overflow(channel.name, reason));
            }
        }
    }

    /// Fan-out waiting for queue space; nothing is dropped while workers run.
    ///
    /// A subscriber whose worker is gone gets `SubscriberOverflow` with reason
    /// `"closed"`, same as in [`emit_arc`](Self::emit_arc).
    pub async fn deliver(&self, event: Arc<Event>) {
        let is_overflow_evt = event.is_subscriber_overflow();

        for channel in &self.channels {
            if channel.sender.send(Arc::clone(&event)).await.is_err() && !is_overflow_evt {
                self.bus
                    .publish(Event::subscriber_overflow(channel.name, "closed"));
            }
        }
    }

    /// Graceful shutdown: close all queues and await worker completion.
    pub async fn shutdown(self) {
        drop(self.channels);
        for h in self.workers {
            let _ = h.await;
        }
    }

    /// True if there are no subscribers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Number of subscribers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.channels.len()
    }
}

fn panic_message(any: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = any.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = any.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::events::EventKind;

    #[derive(Default)]
    struct Collect(Mutex<Vec<u64>>);

    #[async_trait::async_trait]
    impl Subscribe for Collect {
        async fn on_event(&self, ev: &Event) {
            self.0.lock().unwrap().push(ev.seq);
        }
        fn name(&self) -> &'static str {
            "collect"
        }
    }

    struct Explode;

    #[async_trait::async_trait]
    impl Subscribe for Explode {
        async fn on_event(&self, _ev: &Event) {
            panic!("boom");
        }
        fn name(&self) -> &'static str {
            "explode"
        }
    }

    /// Queue of one; the worker only runs once the test awaits.
    struct Narrow(Collect);

    #[async_trait::async_trait]
    impl Subscribe for Narrow {
        async fn on_event(&self, ev: &Event) {
            self.0.on_event(ev).await;
        }
        fn name(&self) -> &'static str {
            "narrow"
        }
        fn queue_capacity(&self) -> usize {
            1
        }
    }

    #[tokio::test]
    async fn test_fifo_per_subscriber() {
        let collect = Arc::new(Collect::default());
        let set = SubscriberSet::new(vec![collect.clone() as Arc<dyn Subscribe>], Bus::new(8));

        let events: Vec<Event> = (0..5).map(|_| Event::new(EventKind::HubOpened)).collect();
        for ev in &events {
            set.emit(ev);
        }
        set.shutdown().await;

        let expected: Vec<u64> = events.iter().map(|e| e.seq).collect();
        assert_eq!(*collect.0.lock().unwrap(), expected);
    }

    #[tokio::test]
    async fn test_panicking_subscriber_is_isolated() {
        let collect = Arc::new(Collect::default());
        let set = SubscriberSet::new(
            vec![
                Arc::new(Explode) as Arc<dyn Subscribe>,
                collect.clone() as Arc<dyn Subscribe>,
            ],
            Bus::new(8),
        );
        assert_eq!(set.len(), 2);

        set.emit(&Event::new(EventKind::HubOpened));
        set.emit(&Event::new(EventKind::HubClosed));
        set.shutdown().await;

        assert_eq!(collect.0.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_full_queue_publishes_overflow() {
        let bus = Bus::new(16);
        let mut rx = bus.subscribe();
        let narrow = Arc::new(Narrow(Collect::default()));
        let set = SubscriberSet::new(vec![narrow.clone() as Arc<dyn Subscribe>], bus.clone());

        set.emit(&Event::new(EventKind::HubOpened));
        set.emit(&Event::new(EventKind::HubClosed));
        set.emit(&Event::new(EventKind::HubClosed));

        for _ in 0..2 {
            let ev = rx.try_recv().unwrap();
            assert!(ev.is_subscriber_overflow());
            assert_eq!(ev.listener.as_deref(), Some("narrow"));
            assert_eq!(ev.message.as_deref(), Some("full"));
        }
        assert!(rx.try_recv().is_err());

        set.shutdown().await;
        assert_eq!(narrow.0.0.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_overflow_event_is_not_republished() {
        let bus = Bus::new(16);
        let mut rx = bus.subscribe();
        let narrow = Arc::new(Narrow(Collect::default()));
        let set = SubscriberSet::new(vec![narrow as Arc<dyn Subscribe>], bus.clone());

        set.emit(&Event::new(EventKind::HubOpened));
        set.emit(&Event::subscriber_overflow("narrow", "full"));

        assert!(rx.try_recv().is_err());
        set.shutdown().await;
    }

    #[tokio::test]
    async fn test_deliver_waits_instead_of_dropping() {
        let bus = Bus::new(16);
        let mut rx = bus.subscribe();
        let narrow = Arc::new(Narrow(Collect::default()));
        let set = SubscriberSet::new(vec![narrow.clone() as Arc<dyn Subscribe>], bus.clone());

        let events: Vec<Event> = (0..50).map(|_| Event::new(EventKind::HubOpened)).collect();
        for ev in &events {
            set.deliver(Arc::new(ev.clone())).await;
        }
        set.shutdown().await;

        let expected: Vec<u64> = events.iter().map(|e| e.seq).collect();
        assert_eq!(*narrow.0.0.lock().unwrap(), expected);
        assert!(rx.try_recv().is_err());
    }
}
