//! # hubwatch
//!
//! **hubwatch** implements notification hubs that broadcast state changes to
//! listeners through existence-checked handles instead of pointers.
//!
//! A hub never owns its listeners. Both live in a [`Registry`]; every cross
//! reference is a generational handle ([`HubId`], [`ListenerId`]) that simply
//! stops resolving once its target is gone. Stale handles are skipped during a
//! broadcast and pruned right after it.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │   Listener   │   │   Listener   │   │   Listener   │
//!     │ PhoneDisplay │   │ PhoneDisplay │   │  TvDisplay   │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            │ subscribe        │ subscribe        │ subscribe
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Registry                                                         │
//! │  - Arena<Hub>       (reading + ordered listener handles)          │
//! │  - Arena<Listener>  (name + observer + hub handle)                │
//! │  - Bus              (diagnostic events)                           │
//! └─────────────────────────────────┬─────────────────────────────────┘
//!                                   ▼
//!                       ┌────────────────────────┐
//!                       │  spawn_pump (tokio)    │
//!                       └───────────┬────────────┘
//!                                   ▼
//!                            SubscriberSet
//!                          ┌────────┼────────┐
//!                          ▼        ▼        ▼
//!                      LogWriter  custom    ...
//! ```
//!
//! ### Lifecycle
//! ```text
//! add_listener ──► Unattached ──subscribe──► Attached(hub)
//!                      ▲                          │
//!                      └── unsubscribe ───────────┤
//!                                                 └── remove_listener / Subscription drop
//!                                                         (unsubscribe, then free slot)
//!
//! set_reading(hub, r) ──► notify(hub, message)
//!   ├─► snapshot live handles (registration order)
//!   ├─► prune stale handles
//!   └─► Observe::on_update(&Update) per snapshot entry
//! ```
//!
//! ## Features
//! | Area              | Description                                              | Key types / traits                      |
//! |-------------------|----------------------------------------------------------|-----------------------------------------|
//! | **Registry**      | Own hubs and listeners, attach/detach, broadcast.        | [`Registry`], [`HubId`], [`ListenerId`] |
//! | **Observers**     | What a listener does with a delivery.                    | [`Observe`], [`PhoneDisplay`], [`TvDisplay`] |
//! | **Scoped**        | Guard that destroys its listener on every exit path.     | [`Subscription`]                        |
//! | **Policies**      | Behavior of a second `subscribe`.                        | [`ResubscribePolicy`]                   |
//! | **Events**        | Diagnostic stream of every registry operation.          | [`Event`], [`EventKind`], [`Bus`]       |
//! | **Subscribers**   | Async consumers of the event stream.                     | [`Subscribe`], [`SubscriberSet`]        |
//! | **Errors**        | Typed subscription errors.                               | [`RegistryError`]                       |
//! | **Configuration** | Centralize registry settings.                            | [`Config`]                              |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use hubwatch::{PhoneDisplay, Reading, Registry, TvDisplay};
//!
//! let mut reg = Registry::default();
//! let station = reg.open_hub("WeatherStation");
//!
//! let phone = reg.add_listener("John's Phone", PhoneDisplay);
//! let tv = reg.add_listener("Living Room TV", TvDisplay);
//! reg.subscribe(phone, station).unwrap();
//! reg.subscribe(tv, station).unwrap();
//!
//! assert_eq!(reg.set_reading(station, Reading::new(23.5, 45.0)).delivered, 2);
//!
//! {
//!     let mut temp = reg.scoped("Temporary Phone", PhoneDisplay, station).unwrap();
//!     assert_eq!(temp.set_reading(station, Reading::new(26.0, 38.0)).delivered, 3);
//! }
//!
//! reg.unsubscribe(phone);
//! assert_eq!(reg.set_reading(station, Reading::new(22.0, 50.0)).delivered, 1);
//! ```
mod core;
mod error;
mod events;
mod observers;
mod policies;
mod subscribers;

// ---- Public re-exports ----

pub use core::{
    Broadcast, Config, Hub, HubId, Listener, ListenerId, Reading, Registry, Subscription,
};
pub use error::RegistryError;
pub use events::{Bus, Event, EventKind};
pub use observers::{Observe, PhoneDisplay, TvDisplay, Update};
pub use policies::ResubscribePolicy;
pub use subscribers::{Subscribe, SubscriberSet, spawn_pump};

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
