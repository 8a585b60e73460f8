//! # Example: weather_station
//!
//! Scripted walk through a hub's lifecycle with three long-lived displays and
//! one scoped display.
//!
//! Shows how to:
//! - Subscribe and unsubscribe listeners.
//! - Broadcast readings with [`Registry::set_reading`].
//! - Tie a listener's lifetime to a scope with [`Registry::scoped`].
//! - Print the diagnostic stream with [`LogWriter`].
//!
//! ## Flow
//! ```text
//! subscribe(John's Phone, Alice's Phone, Living Room TV)
//!   ├─► set_reading(23.5, 45.0)     → 3 deliveries
//!   ├─► unsubscribe(John's Phone)
//!   ├─► set_reading(25.0, 40.0)     → 2 deliveries
//!   ├─► { scoped(Temporary Phone)
//!   │       set_reading(26.0, 38.0) → 3 deliveries
//!   │   }                           → Temporary Phone destroyed
//!   ├─► set_reading(22.0, 50.0)     → 2 deliveries
//!   └─► unsubscribe(Alice's Phone, Living Room TV)
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example weather_station --features logging
//! ```

use std::sync::Arc;

use hubwatch::{
    Config, LogWriter, PhoneDisplay, Reading, Registry, RegistryError, Subscribe, SubscriberSet,
    TvDisplay, spawn_pump,
};
use tokio_util::sync::CancellationToken;

fn script(registry: &mut Registry) -> Result<(), RegistryError> {
    let station = registry.open_hub("WeatherStation");

    let john = registry.add_listener("John's Phone", PhoneDisplay);
    let alice = registry.add_listener("Alice's Phone", PhoneDisplay);
    let tv = registry.add_listener("Living Room TV", TvDisplay);

    registry.subscribe(john, station)?;
    registry.subscribe(alice, station)?;
    registry.subscribe(tv, station)?;

    registry.set_reading(station, Reading::new(23.5, 45.0));

    registry.unsubscribe(john);
    registry.set_reading(station, Reading::new(25.0, 40.0));

    {
        let mut temp = registry.scoped("Temporary Phone", PhoneDisplay, station)?;
        temp.set_reading(station, Reading::new(26.0, 38.0));
    }

    registry.set_reading(station, Reading::new(22.0, 50.0));

    registry.unsubscribe(alice);
    registry.unsubscribe(tv);
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let mut registry = Registry::new(Config::default());

    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];
    let set = SubscriberSet::new(subs, registry.bus().clone());
    let pump = spawn_pump(registry.bus(), set, CancellationToken::new());

    if let Err(err) = script(&mut registry) {
        eprintln!("[weather_station] {}: {err}", err.as_label());
    }

    // Dropping the registry closes the bus; the pump drains and flushes the log.
    drop(registry);
    if let Err(err) = pump.await {
        eprintln!("[weather_station] log pump failed: {err}");
    }
}
