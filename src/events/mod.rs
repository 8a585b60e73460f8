//! Registry events: types and broadcast bus.
//!
//! This module groups the event **data model** and the **bus** used to
//! publish/subscribe to diagnostic events emitted by the registry.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - [`Bus`] lossless `tap` feeds (unbounded mpsc) plus a lossy `tokio::sync::broadcast` ring
//!
//! ## Quick reference
//! - **Publishers**: `Registry` (every hub/listener operation).
//! - **Consumers**: `spawn_pump` (reads a [`Bus::tap`], fans out to a
//!   `SubscriberSet`), or any receiver obtained from [`Bus::subscribe`].

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
