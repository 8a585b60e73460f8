//! Listener policies.
//!
//! ## Contents
//! - [`ResubscribePolicy`] what `subscribe` does for an already attached listener
//!
//! ## Quick wiring
//! ```text
//! Config { resubscribe: ResubscribePolicy }
//!      └─► Registry::subscribe checks the listener's stored hub handle
//! ```

mod resubscribe;

pub use resubscribe::ResubscribePolicy;
