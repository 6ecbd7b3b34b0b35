use std::time::{Duration, Instant};

/// Brightness values at or below this count as "off" when deriving power.
/// A light at 1% is treated as off, so this is deliberately 1 and not 0.
pub const POWER_ON_THRESHOLD: u8 = 1;

/// Last known state of the proxied light. Everything starts unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LightState {
    power: Option<bool>,
    brightness: Option<u8>,
    brightness_changed_at: Option<Instant>,
}

impl LightState {
    pub fn power(&self) -> Option<bool> {
        self.power
    }

    pub fn brightness(&self) -> Option<u8> {
        self.brightness
    }

    pub fn brightness_changed_at(&self) -> Option<Instant> {
        self.brightness_changed_at
    }

    /// Whether a brightness value was published no longer than `window` before `now`.
    pub fn brightness_changed_within(&self, now: Instant, window: Duration) -> bool {
        self.brightness_changed_at
            .is_some_and(|at| now.saturating_duration_since(at) <= window)
    }

    /// Records a brightness value that has just been published to the light.
    pub(crate) fn record_brightness(&mut self, value: u8, at: Instant) {
        self.brightness = Some(value);
        self.brightness_changed_at = Some(at);
        self.power = Some(value > POWER_ON_THRESHOLD);
    }

    pub(crate) fn set_brightness(&mut self, value: u8) {
        self.brightness = Some(value);
    }

    pub(crate) fn record_off(&mut self) {
        self.brightness = Some(0);
        self.power = Some(false);
    }
}
