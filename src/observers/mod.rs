//! # Observers: what a listener does with a broadcast.
//!
//! Every listener wraps one [`Observe`] implementation. The registry calls it
//! once per delivery with an [`Update`] describing the broadcast.
//!
//! ## Provided implementations
//! - [`PhoneDisplay`] compact two-line display
//! - [`TvDisplay`] banner-style display
//! - any `FnMut(&Update<'_>) -> Option<String>` closure

mod display;
mod observer;

pub use display::{PhoneDisplay, TvDisplay};
pub use observer::{Observe, Update};
