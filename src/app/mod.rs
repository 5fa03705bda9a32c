//! Periodic-transmit application.
//!
//! A small state machine on top of [`Modem`] that joins the network, then
//! samples a [`Sensor`] on the first tick after joining and every `period`
//! ticks after that, sending the value as an uplink. Each tick waits for the
//! poll interval and fetches at most one event; the event reaction is shared
//! by every state after `Init`.
//!
//! ```text
//!   Init ──join──▶ Joining ──Joined──▶ Ready ──period──▶ Transmitting
//!    ▲                                   ▲                    │
//!    └──────────── Reset (any state) ────┴───── TxDone ───────┘
//! ```

pub mod sensor;

use std::time::Duration;

use crate::client::Modem;
use crate::error::Result;
use crate::event::{Event, EventType};
use crate::transport::Transport;

pub use sensor::{Sensor, SimulatedTemperature, encode_sample};

/// Default LoRaWAN port for measurements.
pub const DEFAULT_LORA_PORT: u8 = 1;

/// Default number of ticks between uplinks.
pub const DEFAULT_PERIOD: u32 = 300;

/// Default delay before each event poll.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Application configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppConfig {
    /// LoRaWAN port used for uplinks.
    pub lora_port: u8,
    /// Ticks between uplinks.
    pub period: u32,
    /// Delay before each event poll.
    pub poll_interval: Duration,
    /// Request confirmed uplinks.
    pub confirmed: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            lora_port: DEFAULT_LORA_PORT,
            period: DEFAULT_PERIOD,
            poll_interval: DEFAULT_POLL_INTERVAL,
            confirmed: false,
        }
    }
}

impl AppConfig {
    /// Sets the uplink port.
    #[must_use]
    pub const fn lora_port(mut self, port: u8) -> Self {
        self.lora_port = port;
        self
    }

    /// Sets the number of ticks between uplinks.
    #[must_use]
    pub const fn period(mut self, period: u32) -> Self {
        self.period = period;
        self
    }

    /// Sets the poll interval.
    #[must_use]
    pub const fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Requests confirmed uplinks.
    #[must_use]
    pub const fn confirmed(mut self, confirmed: bool) -> Self {
        self.confirmed = confirmed;
        self
    }
}

/// Application state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    /// Not joined; the next tick issues a join.
    Init,
    /// Join requested, waiting for `Joined`.
    Joining,
    /// Joined and idle, counting ticks to the next uplink.
    Ready,
    /// Uplink queued, waiting for `TxDone`.
    Transmitting,
}

/// The periodic-transmit application.
pub struct Application<T, S> {
    modem: Modem<T>,
    sensor: S,
    config: AppConfig,
    state: AppState,
    counter: u32,
}

impl<T: Transport, S: Sensor> Application<T, S> {
    /// Creates the application in the `Init` state.
    ///
    /// The counter starts at the full period so the first `Ready` tick sends.
    #[must_use]
    pub fn new(modem: Modem<T>, sensor: S, config: AppConfig) -> Self {
        Self {
            modem,
            sensor,
            state: AppState::Init,
            counter: config.period,
            config,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> AppState {
        self.state
    }

    /// Ticks counted since the last uplink.
    #[must_use]
    pub const fn counter(&self) -> u32 {
        self.counter
    }

    /// Application configuration.
    #[must_use]
    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Returns the modem.
    pub fn modem_mut(&mut self) -> &mut Modem<T> {
        &mut self.modem
    }

    /// Consumes the application and returns the modem.
    pub fn into_modem(self) -> Modem<T> {
        self.modem
    }

    /// Runs forever.
    ///
    /// One pending event (normally the power-on `Reset`) is consumed first.
    ///
    /// # Errors
    ///
    /// Returns when a join or uplink request fails. Errors while polling for
    /// events are logged and the loop continues.
    pub fn run(&mut self) -> Result<()> {
        self.poll();
        tracing::info!("joining ...");
        loop {
            self.step()?;
        }
    }

    /// Runs one tick of the state machine.
    pub fn step(&mut self) -> Result<()> {
        match self.state {
            AppState::Init => {
                self.modem.join()?;
                self.transition(AppState::Joining);
            }
            AppState::Joining | AppState::Transmitting => {
                self.poll();
            }
            AppState::Ready => {
                self.poll();
                // An event may have moved us out of Ready (e.g. Reset).
                if self.state == AppState::Ready {
                    self.duty_cycle()?;
                }
            }
        }
        Ok(())
    }

    /// Counts a tick in `Ready` and sends a measurement once the period is
    /// reached.
    fn duty_cycle(&mut self) -> Result<()> {
        if self.counter < self.config.period {
            self.counter += 1;
            return Ok(());
        }

        self.counter = 0;
        let value = self.sensor.measure();
        tracing::info!("sensor measure: {:.1}", value);
        self.modem.request_tx(
            self.config.lora_port,
            &encode_sample(value),
            self.config.confirmed,
        )?;
        tracing::info!("uplink queued on port {}, awaiting TX complete", self.config.lora_port);
        self.transition(AppState::Transmitting);
        Ok(())
    }

    /// Waits for the poll interval, fetches one event and reacts to it.
    fn poll(&mut self) -> Option<Event> {
        if !self.config.poll_interval.is_zero() {
            std::thread::sleep(self.config.poll_interval);
        }

        let event = match self.modem.get_event() {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!("event poll failed: {}", e);
                None
            }
        };

        if let Some(ref event) = event {
            self.react(event);
        }
        event
    }

    /// Event reaction shared by all states.
    ///
    /// Transitions follow the event type alone, so a `Reset` or `TxDone`
    /// with malformed data still moves the state.
    fn react(&mut self, event: &Event) {
        match event.event_type() {
            Some(EventType::Reset) => {
                tracing::info!("modem reset: {}", event);
                self.transition(AppState::Init);
            }
            Some(EventType::Joined) => {
                tracing::info!("joined");
                self.transition(AppState::Ready);
            }
            Some(EventType::TxDone) => {
                tracing::info!("TX done: {}", event);
                self.transition(AppState::Ready);
            }
            _ => match event {
                Event::DownData(downlink) => tracing::info!(
                    "downlink on port {}: {}",
                    downlink.port,
                    hex::encode(&downlink.payload)
                ),
                other => tracing::debug!("ignoring event: {}", other),
            },
        }
    }

    fn transition(&mut self, next: AppState) {
        if self.state != next {
            tracing::info!("state {:?} -> {:?}", self.state, next);
            self.state = next;
        }
    }
}
