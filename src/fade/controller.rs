use tracing::{debug, info};

use crate::fade::clock::{Clock, SystemClock};
use crate::fade::ramp::FadeRamp;
use crate::fade::state::LightState;
use crate::fade::topic::ProxyTopics;
use crate::protocol::error::GatewayError;
use crate::protocol::gateway::Publisher;
use crate::protocol::payload::{InboundCommand, MAX_BRIGHTNESS, POWER_OFF, encode_brightness};
use crate::settings::Settings;

/// Turns power and brightness commands into brightness fades on the real light topics.
///
/// Each handler publishes everything it needs to before returning, so a fade is never
/// interleaved with another command.
pub struct FadeController<P: Publisher, C: Clock = SystemClock> {
    publisher: P,
    clock: C,
    topics: ProxyTopics,
    settings: Settings,
    state: LightState,
}

impl<P: Publisher> FadeController<P, SystemClock> {
    pub fn new(publisher: P, topics: ProxyTopics, settings: Settings) -> Self {
        Self::with_clock(publisher, topics, settings, SystemClock)
    }
}

impl<P: Publisher, C: Clock> FadeController<P, C> {
    pub fn with_clock(publisher: P, topics: ProxyTopics, settings: Settings, clock: C) -> Self {
        Self {
            publisher,
            clock,
            topics,
            settings,
            state: LightState::default(),
        }
    }

    pub fn state(&self) -> &LightState {
        &self.state
    }

    pub async fn handle(&mut self, command: InboundCommand) -> Result<(), GatewayError> {
        match command {
            InboundCommand::Power(power) => self.on_power(power).await,
            InboundCommand::Brightness(brightness) => self.on_brightness(brightness).await,
        }
    }

    pub async fn on_power(&mut self, power: bool) -> Result<(), GatewayError> {
        info!("Received Power: {}", if power { "On" } else { "Off" });

        if self
            .state
            .brightness_changed_within(self.clock.now(), self.settings.debounce())
        {
            info!("Brightness changed recently, skipping power publish");
            return Ok(());
        }

        if self.state.power() == Some(power) {
            debug!(power, "Power already in requested state");
            return Ok(());
        }

        // Switching on always ramps up to full brightness.
        if power {
            return self.fade(0, MAX_BRIGHTNESS).await;
        }

        match self.state.brightness() {
            Some(brightness) => self.fade(brightness, 0).await,
            None => self.off().await,
        }
    }

    pub async fn on_brightness(&mut self, brightness: u8) -> Result<(), GatewayError> {
        info!("Received Brightness: {brightness}");

        match self.state.brightness() {
            Some(current) if current == brightness => {
                debug!(brightness, "Brightness already at requested level");
                Ok(())
            }
            Some(current) => self.fade(current, brightness).await,
            None => {
                // Nothing known to fade from yet, jump straight to the value.
                self.publish_statistic(brightness).await?;
                self.set_brightness(brightness).await?;
                self.state.set_brightness(brightness);
                Ok(())
            }
        }
    }

    async fn fade(&mut self, from: u8, to: u8) -> Result<(), GatewayError> {
        self.publish_statistic(to).await?;
        info!("Fading: {from} to {to}");

        for value in FadeRamp::new(from, to) {
            self.set_brightness(value).await?;
        }

        if to == 0 {
            self.off().await?;
        }

        self.state.set_brightness(to);
        Ok(())
    }

    async fn set_brightness(&mut self, value: u8) -> Result<(), GatewayError> {
        self.publisher
            .publish(self.topics.brightness.outgoing(), encode_brightness(value))
            .await?;
        debug!("Published Brightness: {value}");
        self.state.record_brightness(value, self.clock.now());
        Ok(())
    }

    async fn publish_statistic(&self, value: u8) -> Result<(), GatewayError> {
        self.publisher
            .publish(&self.topics.brightness_stat, encode_brightness(value))
            .await
    }

    async fn off(&mut self) -> Result<(), GatewayError> {
        self.publisher
            .publish(self.topics.power.outgoing(), POWER_OFF.to_string())
            .await?;
        info!("Published Power: Off");
        self.state.record_off();
        Ok(())
    }
}
