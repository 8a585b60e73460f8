//! # Registry: owner of every hub and listener.
//!
//! Hubs and listeners live in two generational arenas. All cross references
//! are handles ([`HubId`], [`ListenerId`]) that are checked for existence on
//! every use, so removing either side never leaves a dangling pointer behind,
//! only a handle that resolves to nothing.
//!
//! ## Architecture
//! ```text
//!                 ┌───────────────────────── Registry ─────────────────────────┐
//!                 │  Arena<Hub>                         Arena<Listener>        │
//!                 │  ┌──────────────────────┐           ┌──────────────────┐   │
//!                 │  │ Hub                  │ ListenerId│ Listener         │   │
//!                 │  │  reading             │──────────►│  name            │   │
//!                 │  │  listeners: [id, ..] │◄──────────│  hub: HubId      │   │
//!                 │  └──────────────────────┘   HubId   │  observer        │   │
//!                 │                                     └──────────────────┘   │
//!                 └──────────────────────────────┬─────────────────────────────┘
//!                                                ▼
//!                                         Bus (diagnostics)
//! ```
//!
//! ## Broadcast
//! ```text
//! notify(hub, message)
//!   ├─► publish Notifying { count = registered handles, stale included }
//!   ├─► snapshot = live handles in registration order
//!   ├─► drop stale handles from the hub (publish ListenersPruned if any)
//!   └─► for id in snapshot:
//!         ├─ listener gone since snapshot   → skip
//!         ├─ listener's own hub gone        → silent no-op
//!         └─ observer.on_update(&Update)    → Some(line) → publish ListenerUpdated
//! ```
//!
//! ## Rules
//! - Hub-side operations never fail; stale handles are skipped.
//! - A listener is attached to at most one hub through `subscribe`
//!   (see [`ResubscribePolicy`](crate::ResubscribePolicy)).
//! - `remove_listener` always unsubscribes before freeing the slot.

use std::sync::Arc;

use super::arena::Arena;
use super::config::Config;
use super::hub::{Hub, HubId, Reading};
use super::listener::{Listener, ListenerId};
use super::subscription::Subscription;
use crate::error::RegistryError;
use crate::events::{Bus, Event, EventKind};
use crate::observers::{Observe, Update};
use crate::policies::ResubscribePolicy;

/// Outcome of one broadcast.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Broadcast {
    /// Snapshot entries whose listener still existed at delivery time.
    pub delivered: usize,
    /// Deliveries that reached an observer (the listener's hub resolved).
    pub observed: usize,
    /// Stale handles removed from the hub.
    pub pruned: usize,
}

/// Owner of hubs and listeners.
pub struct Registry {
    hubs: Arena<Hub>,
    listeners: Arena<Listener>,
    bus: Bus,
    config: Config,
}

impl Registry {
    /// Creates an empty registry with its own event bus.
    pub fn new(config: Config) -> Self {
        Self {
            hubs: Arena::new(),
            listeners: Arena::new(),
            bus: Bus::new(config.bus_capacity_clamped()),
            config,
        }
    }

    /// Diagnostic event bus. Tap or subscribe before driving the registry.
    ///
    /// Dropping the registry closes the bus taps.
    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // ---- Lifecycle ----

    /// Creates a hub with the default reading `(0, 0)`.
    pub fn open_hub(&mut self, name: impl Into<Arc<str>>) -> HubId {
        let hub = Hub::new(name);
        let name = hub.name_arc();
        let id = HubId(self.hubs.insert(hub));
        self.bus.publish(Event::new(EventKind::HubOpened).with_hub(name));
        id
    }

    /// Removes a hub. Handles to it stop resolving.
    ///
    /// Listeners keep their (now stale) back-reference; their updates become
    /// no-ops and `unsubscribe` does nothing.
    pub fn close_hub(&mut self, hub: HubId) -> bool {
        match self.hubs.remove(hub.0) {
            Some(h) => {
                self.bus.publish(
                    Event::new(EventKind::HubClosed)
                        .with_hub(h.name_arc())
                        .with_count(h.len()),
                );
                true
            }
            None => false,
        }
    }

    pub fn hub(&self, hub: HubId) -> Option<&Hub> {
        self.hubs.get(hub.0)
    }

    pub fn hub_count(&self) -> usize {
        self.hubs.len()
    }

    /// Creates an unattached listener.
    pub fn add_listener(
        &mut self,
        name: impl Into<Arc<str>>,
        observer: impl Observe,
    ) -> ListenerId {
        ListenerId(self.listeners.insert(Listener::new(name, Box::new(observer))))
    }

    /// Destroys a listener: unsubscribes it, then frees its slot.
    ///
    /// Returns `false` if the handle was already stale.
    pub fn remove_listener(&mut self, listener: ListenerId) -> bool {
        self.unsubscribe(listener);
        match self.listeners.remove(listener.0) {
            Some(l) => {
                self.bus
                    .publish(Event::new(EventKind::ListenerDropped).with_listener(l.name_arc()));
                true
            }
            None => false,
        }
    }

    pub fn listener(&self, listener: ListenerId) -> Option<&Listener> {
        self.listeners.get(listener.0)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    // ---- Hub side ----

    /// Appends `listener` to the hub's collection. No de-duplication.
    ///
    /// Returns `false` only if the hub no longer exists.
    pub fn attach(&mut self, hub: HubId, listener: ListenerId) -> bool {
        let Some(h) = self.hubs.get_mut(hub.0) else {
            return false;
        };
        h.attach(listener);

        let mut ev = Event::new(EventKind::ListenerAttached)
            .with_hub(h.name_arc())
            .with_count(h.len());
        if let Some(l) = self.listeners.get(listener.0) {
            ev = ev.with_listener(l.name_arc());
        }
        self.bus.publish(ev);
        true
    }

    /// Removes every entry for `listener` from the hub and returns the count.
    ///
    /// A listener handle that no longer resolves is a logged no-op returning `0`;
    /// the collection is left as is.
    pub fn detach(&mut self, hub: HubId, listener: ListenerId) -> usize {
        let Some(h) = self.hubs.get_mut(hub.0) else {
            return 0;
        };
        let Some(l) = self.listeners.get(listener.0) else {
            self.bus
                .publish(Event::new(EventKind::DetachExpired).with_hub(h.name_arc()));
            return 0;
        };

        let removed = h.detach(listener);
        self.bus.publish(
            Event::new(EventKind::ListenerDetached)
                .with_hub(h.name_arc())
                .with_listener(l.name_arc())
                .with_count(removed),
        );
        removed
    }

    /// Stores a new reading and broadcasts the configured update message.
    pub fn set_reading(&mut self, hub: HubId, reading: Reading) -> Broadcast {
        let Some(h) = self.hubs.get_mut(hub.0) else {
            return Broadcast::default();
        };
        h.set_reading(reading);
        let message = self.config.update_message.clone();
        self.notify(hub, &message)
    }

    /// Delivers `message` to every live listener of the hub, in registration order.
    ///
    /// Postcondition: the hub holds no stale handles.
    pub fn notify(&mut self, hub: HubId, message: &str) -> Broadcast {
        let Some(h) = self.hubs.get_mut(hub.0) else {
            return Broadcast::default();
        };
        self.bus.publish(
            Event::new(EventKind::Notifying)
                .with_hub(h.name_arc())
                .with_count(h.len())
                .with_message(message)
                .with_reading(h.reading()),
        );

        let listeners = &self.listeners;
        let (snapshot, pruned) = h.snapshot_and_prune(|id| listeners.contains(id.0));
        if pruned > 0 {
            self.bus.publish(
                Event::new(EventKind::ListenersPruned)
                    .with_hub(h.name_arc())
                    .with_count(pruned),
            );
        }

        let mut report = Broadcast {
            pruned,
            ..Broadcast::default()
        };
        for id in snapshot {
            if let Some(observed) = self.deliver(id, message) {
                report.delivered += 1;
                if observed {
                    report.observed += 1;
                }
            }
        }
        report
    }

    /// `None` if the listener is gone, `Some(false)` if its hub is gone.
    fn deliver(&mut self, id: ListenerId, message: &str) -> Option<bool> {
        let listener = self.listeners.get_mut(id.0)?;
        let Some(hub) = listener.hub().and_then(|h| self.hubs.get(h.0)) else {
            return Some(false);
        };

        let name = listener.name_arc();
        let reading = hub.reading();
        let update = Update {
            listener: &name,
            hub: hub.name(),
            message,
            reading,
        };
        if let Some(line) = listener.observer_mut().on_update(&update) {
            self.bus.publish(
                Event::new(EventKind::ListenerUpdated)
                    .with_hub(hub.name_arc())
                    .with_listener(name)
                    .with_message(line)
                    .with_reading(reading),
            );
        }
        Some(true)
    }

    // ---- Listener side ----

    /// Records `hub` on the listener and attaches the listener to it.
    ///
    /// ### Errors
    /// - [`RegistryError::ListenerGone`] / [`RegistryError::HubGone`] for stale handles.
    /// - [`RegistryError::AlreadySubscribed`] if the listener is attached to a live
    ///   hub and the policy is [`ResubscribePolicy::Reject`].
    pub fn subscribe(&mut self, listener: ListenerId, hub: HubId) -> Result<(), RegistryError> {
        let Some(l) = self.listeners.get(listener.0) else {
            return Err(RegistryError::ListenerGone { listener });
        };
        if !self.hubs.contains(hub.0) {
            return Err(RegistryError::HubGone { hub });
        }

        if let Some(current) = l.hub().filter(|h| self.hubs.contains(h.0)) {
            match self.config.resubscribe {
                ResubscribePolicy::Reject => {
                    return Err(RegistryError::AlreadySubscribed {
                        name: l.name().to_string(),
                        hub: current,
                    });
                }
                ResubscribePolicy::Replace => {
                    self.unsubscribe(listener);
                }
            }
        }

        let Some(l) = self.listeners.get_mut(listener.0) else {
            return Err(RegistryError::ListenerGone { listener });
        };
        l.set_hub(Some(hub));
        let name = l.name_arc();
        self.attach(hub, listener);

        if let Some(h) = self.hubs.get(hub.0) {
            self.bus.publish(
                Event::new(EventKind::Subscribed)
                    .with_hub(h.name_arc())
                    .with_listener(name),
            );
        }
        Ok(())
    }

    /// Detaches the listener from its hub and clears the stored handle.
    ///
    /// No-op returning `0` if the listener is unattached or its hub is gone.
    pub fn unsubscribe(&mut self, listener: ListenerId) -> usize {
        let Some(hub) = self.listeners.get(listener.0).and_then(Listener::hub) else {
            return 0;
        };
        if !self.hubs.contains(hub.0) {
            return 0;
        }

        let removed = self.detach(hub, listener);
        let Some(l) = self.listeners.get_mut(listener.0) else {
            return removed;
        };
        l.set_hub(None);

        let mut ev = Event::new(EventKind::Unsubscribed)
            .with_listener(l.name_arc())
            .with_count(removed);
        if let Some(h) = self.hubs.get(hub.0) {
            ev = ev.with_hub(h.name_arc());
        }
        self.bus.publish(ev);
        removed
    }

    /// Creates a listener subscribed to `hub` and returns a guard that destroys
    /// it on drop (including during unwinding).
    ///
    /// The guard dereferences to the registry.
    ///
    /// ### Errors
    /// [`RegistryError::HubGone`] if the hub no longer exists; nothing is created.
    pub fn scoped(
        &mut self,
        name: impl Into<Arc<str>>,
        observer: impl Observe,
        hub: HubId,
    ) -> Result<Subscription<'_>, RegistryError> {
        if !self.hubs.contains(hub.0) {
            return Err(RegistryError::HubGone { hub });
        }
        let listener = self.add_listener(name, observer);
        if let Err(err) = self.subscribe(listener, hub) {
            self.remove_listener(listener);
            return Err(err);
        }
        Ok(Subscription::new(self, listener))
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Drop for Registry {
    /// Ends the bus taps so a pump drains its backlog and stops, even while
    /// a subscriber set still holds a clone of the bus.
    fn drop(&mut self) {
        self.bus.close();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::observers::PhoneDisplay;

    type Log = Rc<RefCell<Vec<(String, Reading)>>>;

    struct Recorder(Log);

    impl Observe for Recorder {
        fn on_update(&mut self, u: &Update<'_>) -> Option<String> {
            self.0.borrow_mut().push((u.listener.to_string(), u.reading));
            None
        }
    }

    fn setup(names: &[&str]) -> (Registry, HubId, Vec<ListenerId>, Log) {
        let mut reg = Registry::default();
        let hub = reg.open_hub("WeatherStation");
        let log: Log = Rc::default();
        let ids = names
            .iter()
            .map(|n| {
                let id = reg.add_listener(*n, Recorder(Rc::clone(&log)));
                reg.subscribe(id, hub).unwrap();
                id
            })
            .collect();
        (reg, hub, ids, log)
    }

    fn names(log: &Log) -> Vec<String> {
        log.borrow().iter().map(|(n, _)| n.clone()).collect()
    }

    #[test]
    fn test_scenario_three_then_two() {
        let (mut reg, hub, ids, log) = setup(&["A", "B", "C"]);
        assert_eq!(reg.hub(hub).unwrap().reading(), Reading::default());

        let report = reg.set_reading(hub, Reading::new(23.5, 45.0));
        assert_eq!(report.delivered, 3);
        assert_eq!(names(&log), ["A", "B", "C"]);
        assert!(log.borrow().iter().all(|(_, r)| *r == Reading::new(23.5, 45.0)));

        log.borrow_mut().clear();
        assert_eq!(reg.detach(hub, ids[0]), 1);
        let report = reg.set_reading(hub, Reading::new(25.0, 40.0));
        assert_eq!(report.delivered, 2);
        assert_eq!(names(&log), ["B", "C"]);
        assert!(log.borrow().iter().all(|(_, r)| *r == Reading::new(25.0, 40.0)));
    }

    #[test]
    fn test_detached_before_broadcast_never_updated() {
        let (mut reg, hub, ids, log) = setup(&["A", "B"]);
        reg.detach(hub, ids[1]);
        reg.notify(hub, "ping");
        assert_eq!(names(&log), ["A"]);
    }

    #[test]
    fn test_notify_prunes_stale_handles() {
        let (mut reg, hub, ids, _log) = setup(&["A", "B", "C"]);
        // Free B's slot without going through unsubscribe.
        reg.listeners.remove(ids[1].0);
        assert_eq!(reg.hub(hub).unwrap().len(), 3);

        let report = reg.notify(hub, "ping");
        assert_eq!(report.pruned, 1);
        assert_eq!(report.delivered, 2);
        let live = reg.hub(hub).unwrap().listeners();
        assert_eq!(live, &[ids[0], ids[2]]);
        assert!(live.iter().all(|id| reg.listener(*id).is_some()));
    }

    #[test]
    fn test_detach_stale_listener_is_noop() {
        let (mut reg, hub, ids, _log) = setup(&["A", "B"]);
        reg.listeners.remove(ids[0].0);

        let before = reg.hub(hub).unwrap().listeners().to_vec();
        assert_eq!(reg.detach(hub, ids[0]), 0);
        assert_eq!(reg.hub(hub).unwrap().listeners(), before.as_slice());
    }

    #[test]
    fn test_removed_listener_absent_from_later_broadcasts() {
        let (mut reg, hub, ids, log) = setup(&["A", "B"]);
        assert!(reg.remove_listener(ids[0]));
        assert_eq!(reg.hub(hub).unwrap().listeners(), &[ids[1]]);

        reg.notify(hub, "ping");
        assert_eq!(names(&log), ["B"]);
        assert!(!reg.remove_listener(ids[0]));
    }

    #[test]
    fn test_double_attach_delivers_twice_and_detaches_once() {
        let (mut reg, hub, ids, log) = setup(&["A"]);
        assert!(reg.attach(hub, ids[0]));

        let report = reg.notify(hub, "ping");
        assert_eq!(report.delivered, 2);
        assert_eq!(names(&log), ["A", "A"]);

        assert_eq!(reg.detach(hub, ids[0]), 2);
        log.borrow_mut().clear();
        assert_eq!(reg.notify(hub, "ping").delivered, 0);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_update_reads_listeners_own_hub() {
        let mut reg = Registry::default();
        let north = reg.open_hub("north");
        let south = reg.open_hub("south");
        let log: Log = Rc::default();
        let id = reg.add_listener("A", Recorder(Rc::clone(&log)));
        reg.subscribe(id, north).unwrap();
        reg.set_reading(north, Reading::new(1.0, 2.0));
        log.borrow_mut().clear();

        // Raw attach to another hub: the listener still reports its own hub's state.
        reg.attach(south, id);
        reg.set_reading(south, Reading::new(9.0, 9.0));
        assert_eq!(log.borrow().as_slice(), &[("A".to_string(), Reading::new(1.0, 2.0))]);
    }

    #[test]
    fn test_unattached_listener_update_is_silent() {
        let mut reg = Registry::default();
        let hub = reg.open_hub("h");
        let log: Log = Rc::default();
        let id = reg.add_listener("A", Recorder(Rc::clone(&log)));
        reg.attach(hub, id);

        let report = reg.notify(hub, "ping");
        assert_eq!(report.delivered, 1);
        assert_eq!(report.observed, 0);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_closed_hub_makes_unsubscribe_noop() {
        let (mut reg, hub, ids, _log) = setup(&["A"]);
        assert!(reg.close_hub(hub));
        assert_eq!(reg.unsubscribe(ids[0]), 0);
        assert_eq!(reg.listener(ids[0]).unwrap().hub(), Some(hub));
        assert_eq!(reg.notify(hub, "ping"), Broadcast::default());
        assert!(!reg.attach(hub, ids[0]));
    }

    #[test]
    fn test_reject_second_subscribe() {
        let (mut reg, hub, ids, _log) = setup(&["A"]);
        let other = reg.open_hub("other");

        let err = reg.subscribe(ids[0], other).unwrap_err();
        assert_eq!(
            err,
            RegistryError::AlreadySubscribed {
                name: "A".into(),
                hub
            }
        );
        assert!(reg.hub(other).unwrap().is_empty());
        assert_eq!(reg.hub(hub).unwrap().len(), 1);
    }

    #[test]
    fn test_replace_moves_registration() {
        let mut reg = Registry::new(Config {
            resubscribe: ResubscribePolicy::Replace,
            ..Config::default()
        });
        let first = reg.open_hub("first");
        let second = reg.open_hub("second");
        let id = reg.add_listener("A", PhoneDisplay);

        reg.subscribe(id, first).unwrap();
        reg.subscribe(id, second).unwrap();
        assert!(reg.hub(first).unwrap().is_empty());
        assert_eq!(reg.hub(second).unwrap().listeners(), &[id]);
        assert_eq!(reg.listener(id).unwrap().hub(), Some(second));
    }

    #[test]
    fn test_subscribe_after_hub_closed_counts_as_unattached() {
        let (mut reg, hub, ids, _log) = setup(&["A"]);
        reg.close_hub(hub);
        let next = reg.open_hub("next");
        reg.subscribe(ids[0], next).unwrap();
        assert_eq!(reg.listener(ids[0]).unwrap().hub(), Some(next));
    }

    #[test]
    fn test_subscribe_stale_handles() {
        let mut reg = Registry::default();
        let hub = reg.open_hub("h");
        let id = reg.add_listener("A", PhoneDisplay);
        reg.remove_listener(id);
        assert_eq!(
            reg.subscribe(id, hub),
            Err(RegistryError::ListenerGone { listener: id })
        );

        let id = reg.add_listener("B", PhoneDisplay);
        reg.close_hub(hub);
        assert_eq!(reg.subscribe(id, hub), Err(RegistryError::HubGone { hub }));
    }

    #[test]
    fn test_event_stream_order() {
        let mut reg = Registry::default();
        let mut rx = reg.bus().subscribe();
        let hub = reg.open_hub("WeatherStation");
        let id = reg.add_listener("phone", PhoneDisplay);
        reg.subscribe(id, hub).unwrap();
        reg.set_reading(hub, Reading::new(23.5, 45.0));
        reg.remove_listener(id);

        let mut kinds = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            kinds.push(ev.kind);
        }
        assert_eq!(
            kinds,
            [
                EventKind::HubOpened,
                EventKind::ListenerAttached,
                EventKind::Subscribed,
                EventKind::Notifying,
                EventKind::ListenerUpdated,
                EventKind::ListenerDetached,
                EventKind::Unsubscribed,
                EventKind::ListenerDropped,
            ]
        );
    }
}
