//! # Event subscribers for registry diagnostics.
//!
//! This module provides the [`Subscribe`] trait, the [`SubscriberSet`] fan-out
//! and the [`spawn_pump`] task that feeds a set from a [`Bus`](crate::Bus).
//!
//! ## Architecture
//! ```text
//! Registry ── publish(Event) ──► Bus ──tap──► spawn_pump ──► SubscriberSet
//!                                                                 │
//!                                                    ┌────────────┼────────────┐
//!                                                    ▼            ▼            ▼
//!                                                LogWriter     Custom        ...
//! ```
//!
//! ## Provided implementations
//! - [`LogWriter`] (enabled via `logging` feature) → prints events to stdout

#[cfg(feature = "logging")]
mod log;
mod pump;
mod set;
mod subscribe;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use pump::spawn_pump;
pub use set::SubscriberSet;
pub use subscribe::Subscribe;
