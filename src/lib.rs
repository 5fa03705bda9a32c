//! # lora-modem
//!
//! A Rust client for LoRaWAN modems driven over a serial link with a
//! COMMAND/BUSY handshake and a checksummed command/response protocol.
//!
//! ## Features
//!
//! - Blocking, one-exchange-at-a-time command client
//! - Typed accessors for every modem command with argument validation
//! - Event polling with forward-compatible decoding
//! - A periodic-transmit application state machine
//! - An in-memory transport for testing without hardware
//!
//! ## Quick Start
//!
//! ```no_run
//! use lora_modem::Modem;
//!
//! fn main() -> Result<(), lora_modem::Error> {
//!     let mut modem = Modem::serial("/dev/ttyUSB0")?;
//!
//!     let version = modem.get_version()?;
//!     println!("firmware: {:08X}", version.firmware);
//!
//!     modem.join()?;
//!     while let Some(event) = modem.get_event()? {
//!         println!("{event}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`transport`] - Byte transport and the COMMAND/BUSY line handshake
//! - [`protocol`] - Frame codec, command ids, result codes and name tables
//! - [`client`] - The [`Modem`] command client
//! - [`commands`] - Typed command accessors
//! - [`event`] - Event decoding
//! - [`types`] - Configuration and state values
//! - [`app`] - The join/measure/transmit application
//! - [`provision`] - One-shot credential provisioning

pub mod app;
pub mod client;
pub mod commands;
pub mod error;
pub mod event;
pub mod protocol;
pub mod provision;
pub mod transport;
pub mod types;

// Re-exports for convenience
pub use app::{AppConfig, AppState, Application, Sensor, SimulatedTemperature};
pub use client::Modem;
pub use error::{Error, Result};
pub use event::{Downlink, Event, EventType, TxOutcome};
pub use protocol::{CommandOpcode, Frame, ResultCode};
pub use provision::{Credentials, provision};
pub use transport::{
    HandshakeConfig, MockTransport, SerialConfig, SerialTransport, Transport, serial::list_ports,
};
pub use types::{
    AdrProfile, DeviceClass, Eui, IntervalUnit, ModemStatus, Region, StreamStatus, Version,
};
