//! Built-in display observers.

use super::{Observe, Update};

/// Phone-style display.
///
/// ```text
/// [John's Phone] Update received: Measurements updated
///   Temperature: 23.5°C, Humidity: 45%
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct PhoneDisplay;

impl Observe for PhoneDisplay {
    fn on_update(&mut self, u: &Update<'_>) -> Option<String> {
        Some(format!(
            "[{}] Update received: {}\n  Temperature: {}°C, Humidity: {}%",
            u.listener, u.message, u.reading.temperature, u.reading.humidity
        ))
    }
}

/// TV-style display. Ignores the message text.
///
/// ```text
/// [Living Room TV] TV Display: Weather update!
///   Current temp: 23.5°C, Humidity: 45%
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct TvDisplay;

impl Observe for TvDisplay {
    fn on_update(&mut self, u: &Update<'_>) -> Option<String> {
        Some(format!(
            "[{}] TV Display: Weather update!\n  Current temp: {}°C, Humidity: {}%",
            u.listener, u.reading.temperature, u.reading.humidity
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Reading;

    fn update(reading: Reading) -> Update<'static> {
        Update {
            listener: "Alice's Phone",
            hub: "WeatherStation",
            message: "Measurements updated",
            reading,
        }
    }

    #[test]
    fn test_phone_format() {
        let line = PhoneDisplay.on_update(&update(Reading::new(23.5, 45.0)));
        assert_eq!(
            line.as_deref(),
            Some(
                "[Alice's Phone] Update received: Measurements updated\n  Temperature: 23.5°C, Humidity: 45%"
            )
        );
    }

    #[test]
    fn test_tv_format() {
        let line = TvDisplay.on_update(&update(Reading::new(22.0, 50.0)));
        assert_eq!(
            line.as_deref(),
            Some("[Alice's Phone] TV Display: Weather update!\n  Current temp: 22°C, Humidity: 50%")
        );
    }
}
