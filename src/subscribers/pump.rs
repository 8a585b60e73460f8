//! # Bus → SubscriberSet forwarding task.
//!
//! ```text
//! Registry ── publish ──► Bus ──tap──► pump task ──deliver──► SubscriberSet ──► workers
//!                                         │
//!                                         ├─ tap ended (Bus::close / last clone dropped) → drained
//!                                         └─ token cancelled                             → stop early
//!                                         └─► SubscriberSet::shutdown().await
//! ```
//!
//! The tap is created **before** the task is spawned, so every event published
//! after `spawn_pump` returns is forwarded, even if the task has not been polled
//! yet. The tap is unbounded and the pump awaits queue space in the set, so a
//! long synchronous burst on the registry loses no events; they wait in the tap
//! until the pump runs.

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::SubscriberSet;
use crate::events::Bus;

/// Spawns a task forwarding `bus` events into `set` until the bus closes or
/// `token` is cancelled; the set is shut down (queues flushed) before the task ends.
///
/// A [`Registry`](crate::Registry) closes its bus when dropped. Must be called
/// inside a tokio runtime.
pub fn spawn_pump(bus: &Bus, set: SubscriberSet, token: CancellationToken) -> JoinHandle<()> {
    let mut tap = bus.tap();

    tokio::spawn(async move {
        loop {
            tokio::select! {
                biased;
                _ = token.cancelled() => break,
                msg = tap.recv() => match msg {
                    Some(ev) => set.deliver(ev).await,
                    None => break,
                },
            }
        }
        set.shutdown().await;
    })
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::Subscribe;
    use crate::events::{Event, EventKind};

    #[derive(Default)]
    struct Kinds(Mutex<Vec<EventKind>>);

    #[async_trait::async_trait]
    impl Subscribe for Kinds {
        async fn on_event(&self, ev: &Event) {
            self.0.lock().unwrap().push(ev.kind);
        }

        fn queue_capacity(&self) -> usize {
            2
        }
    }

    #[tokio::test]
    async fn test_drains_until_bus_closed() {
        let kinds = Arc::new(Kinds::default());
        let bus = Bus::new(16);
        let set = SubscriberSet::new(vec![kinds.clone() as Arc<dyn Subscribe>], bus.clone());
        let pump = spawn_pump(&bus, set, CancellationToken::new());

        bus.publish(Event::new(EventKind::HubOpened));
        bus.publish(Event::new(EventKind::HubClosed));
        bus.close();
        pump.await.unwrap();

        assert_eq!(
            *kinds.0.lock().unwrap(),
            [EventKind::HubOpened, EventKind::HubClosed]
        );
    }

    #[tokio::test]
    async fn test_drains_when_last_clone_dropped() {
        let kinds = Arc::new(Kinds::default());
        let bus = Bus::new(16);
        let set = SubscriberSet::new(vec![kinds.clone() as Arc<dyn Subscribe>], Bus::new(1));
        let pump = spawn_pump(&bus, set, CancellationToken::new());

        bus.publish(Event::new(EventKind::HubOpened));
        drop(bus);
        pump.await.unwrap();

        assert_eq!(*kinds.0.lock().unwrap(), [EventKind::HubOpened]);
    }

    #[tokio::test]
    async fn test_cancel_stops_pump() {
        let bus = Bus::new(4);
        let token = CancellationToken::new();
        let pump = spawn_pump(&bus, SubscriberSet::new(Vec::new(), bus.clone()), token.clone());

        token.cancel();
        pump.await.unwrap();
        assert_eq!(bus.tap_count(), 0);
    }

    #[tokio::test]
    async fn test_burst_beyond_ring_and_queue_is_kept() {
        let kinds = Arc::new(Kinds::default());
        let bus = Bus::new(1);
        let set = SubscriberSet::new(vec![kinds.clone() as Arc<dyn Subscribe>], bus.clone());
        let pump = spawn_pump(&bus, set, CancellationToken::new());

        for _ in 0..500 {
            bus.publish(Event::new(EventKind::ListenerAttached));
        }
        bus.publish(Event::new(EventKind::HubClosed));
        bus.close();
        pump.await.unwrap();

        let seen = kinds.0.lock().unwrap();
        assert_eq!(seen.len(), 501);
        assert_eq!(seen.last(), Some(&EventKind::HubClosed));
        assert!(!seen.contains(&EventKind::SubscriberOverflow));
    }
}
