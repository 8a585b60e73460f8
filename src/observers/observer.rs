//! # Observe: the single entry point of a listener.
//!
//! The [`Observe`] trait is the main **extension point** for end users.
//! Implementations receive an [`Update`] and may return a display line, which
//! the registry publishes as `EventKind::ListenerUpdated`.
//!
//! # High-level architecture:
//! ```text
//! Registry::notify(hub, message)
//!     └─► for each live listener (snapshot order)
//!           ├─► resolve the listener's own hub handle (gone → skip)
//!           └─► Observe::on_update(&Update) ──► Some(line) ──► Bus
//! ```
//!
//! # Example: custom observer
//! ```
//! use hubwatch::{Observe, Update};
//!
//! struct Threshold {
//!     limit: f32,
//! }
//!
//! impl Observe for Threshold {
//!     fn on_update(&mut self, update: &Update<'_>) -> Option<String> {
//!         (update.reading.temperature > self.limit)
//!             .then(|| format!("[{}] too hot: {}", update.listener, update.reading.temperature))
//!     }
//! }
//! ```

use crate::core::Reading;

/// One delivery of a broadcast to one listener.
#[derive(Clone, Copy, Debug)]
pub struct Update<'a> {
    /// Name of the receiving listener.
    pub listener: &'a str,
    /// Name of the listener's hub.
    pub hub: &'a str,
    /// Broadcast message.
    pub message: &'a str,
    /// Current reading of the listener's hub.
    pub reading: Reading,
}

/// Capability invoked for every delivery to a listener.
pub trait Observe: 'static {
    /// Handles one delivery; returns the line to display, if any.
    fn on_update(&mut self, update: &Update<'_>) -> Option<String>;
}

impl<F> Observe for F
where
    F: FnMut(&Update<'_>) -> Option<String> + 'static,
{
    fn on_update(&mut self, update: &Update<'_>) -> Option<String> {
        self(update)
    }
}
