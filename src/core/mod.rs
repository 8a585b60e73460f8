//! Registry core: hubs, listeners and their handles.
//!
//! The public API from this module is [`Registry`] plus the handle and value
//! types it hands out.
//!
//! Internal modules:
//! - [`arena`]: generational slot storage backing every handle;
//! - [`hub`]: observed state and the per-hub list of listener handles;
//! - [`listener`]: named observer with an optional hub back-reference;
//! - [`registry`]: attach/detach, subscribe/unsubscribe, broadcast;
//! - [`subscription`]: scoped guard that destroys its listener on drop;
//! - [`config`]: registry settings.

mod arena;
mod config;
mod hub;
mod listener;
mod registry;
mod subscription;

pub use config::Config;
pub use hub::{Hub, HubId, Reading};
pub use listener::{Listener, ListenerId};
pub use registry::{Broadcast, Registry};
pub use subscription::Subscription;
