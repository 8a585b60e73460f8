//! # LogWriter: simple event printer
//!
//! A minimal subscriber that prints incoming [`Event`]s to stdout.
//! Use it for tests or demos.
//!
//! ## Example output
//! ```text
//! [attached] hub=WeatherStation listeners=1
//! [subscribed] listener="John's Phone" hub=WeatherStation
//! [notifying] hub=WeatherStation listeners=3 message="Measurements updated"
//! [John's Phone] Update received: Measurements updated
//!   Temperature: 23.5°C, Humidity: 45%
//! [detached] hub=WeatherStation listener="John's Phone" removed=1
//! [unsubscribed] listener="John's Phone" hub=WeatherStation
//! [destroyed] listener="Temporary Phone"
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Formats one event as the line(s) [`LogWriter`] prints.
    pub fn render(e: &Event) -> String {
        let hub = e.hub.as_deref().unwrap_or("<unknown>");
        let listener = e.listener.as_deref().unwrap_or("<unknown>");
        let count = e.count.unwrap_or(0);

        match e.kind {
            EventKind::HubOpened => format!("[hub-opened] hub={hub}"),
            EventKind::HubClosed => format!("[hub-closed] hub={hub} listeners={count}"),
            EventKind::ListenerAttached => format!("[attached] hub={hub} listeners={count}"),
            EventKind::ListenerDetached => {
                format!("[detached] hub={hub} listener=\"{listener}\" removed={count}")
            }
            EventKind::DetachExpired => format!("[detach-expired] hub={hub}"),
            EventKind::Subscribed => format!("[subscribed] listener=\"{listener}\" hub={hub}"),
            EventKind::Unsubscribed => {
                format!("[unsubscribed] listener=\"{listener}\" hub={hub}")
            }
            EventKind::Notifying => format!(
                "[notifying] hub={hub} listeners={count} message=\"{}\"",
                e.message.as_deref().unwrap_or_default()
            ),
            EventKind::ListenersPruned => format!("[pruned] hub={hub} count={count}"),
            EventKind::ListenerUpdated => e.message.as_deref().unwrap_or_default().to_string(),
            EventKind::ListenerDropped => format!("[destroyed] listener=\"{listener}\""),
            EventKind::SubscriberOverflow => format!(
                "[subscriber-overflow] subscriber={listener} reason={}",
                e.message.as_deref().unwrap_or("<none>")
            ),
        }
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        println!("{}", Self::render(e));
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
