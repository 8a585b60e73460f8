//! # Event bus for broadcasting registry events.
//!
//! [`Bus`] carries every registry event to two kinds of consumers. The registry
//! publishes from plain synchronous code; no runtime is needed to publish.
//!
//! ## Architecture
//! ```text
//!                          ┌──► tap (unbounded mpsc) ──► spawn_pump ──► SubscriberSet
//! Registry ── publish ──► Bus
//!                          └──► subscribe (broadcast ring, lossy live view)
//! ```
//!
//! ## Rules
//! - **Non-blocking publish**: `publish()` never blocks or awaits.
//! - **Lossless taps**: a [`tap`](Bus::tap) receives every event published after it
//!   was created, in publish order, however long the publisher runs without yielding.
//!   Memory grows with the backlog until the consumer drains it.
//! - **Lossy subscribers**: [`subscribe`](Bus::subscribe) receivers share a ring of
//!   `capacity` events; a receiver more than `capacity` events behind gets
//!   `RecvError::Lagged(n)` and skips the `n` oldest items.
//! - **Close**: [`close`](Bus::close) ends every tap (after its backlog) even while
//!   other clones of the bus are alive. Dropping the last clone does the same.
//! - **No persistence**: events published with no tap or receiver are lost.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{broadcast, mpsc};

use super::event::Event;

/// Channel pair for registry events.
///
/// ### Properties
/// - **Non-blocking**: `publish()` returns immediately.
/// - **Ordered taps**: every tap sees the same sequence, no gaps.
/// - **Cloneable**: cheap to clone; clones share taps and the broadcast ring.
#[derive(Clone, Debug)]
pub struct Bus {
    tx: broadcast::Sender<Event>,
    taps: Arc<Mutex<Vec<mpsc::UnboundedSender<Arc<Event>>>>>,
}

impl Bus {
    /// Creates a new bus with the given broadcast ring capacity.
    ///
    /// The minimum capacity is 1 (clamped). Taps are unbounded.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (tx, _rx) = broadcast::channel::<Event>(capacity);
        Self {
            tx,
            taps: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Publishes an event to every tap and every broadcast receiver.
    ///
    /// Taps whose receiver was dropped are forgotten.
    pub fn publish(&self, ev: Event) {
        {
            let mut taps = self.taps.lock().unwrap_or_else(PoisonError::into_inner);
            if !taps.is_empty() {
                let shared = Arc::new(ev.clone());
                taps.retain(|tap| tap.send(Arc::clone(&shared)).is_ok());
            }
        }
        let _ = self.tx.send(ev);
    }

    /// Creates a lossless, ordered feed of subsequent events.
    ///
    /// The receiver yields `None` once the bus is closed (or every clone
    /// dropped) and the backlog is drained.
    pub fn tap(&self) -> mpsc::UnboundedReceiver<Arc<Event>> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.taps
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tx);
        rx
    }

    /// Ends every tap. Later events still reach broadcast receivers.
    pub fn close(&self) {
        self.taps
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Creates a new broadcast receiver that will observe subsequent events.
    ///
    /// - Each call creates an **independent** receiver.
    /// - A receiver only gets events **sent after** it subscribes.
    /// - A receiver that falls `capacity` events behind loses the oldest ones.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }

    /// Number of live broadcast receivers.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Number of open taps.
    pub fn tap_count(&self) -> usize {
        self.taps
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|tap| !tap.is_closed())
            .count()
    }
}
