//! Data types for modem configuration and state.
//!
//! This module contains the typed values exchanged through the command
//! accessors:
//! - EUIs and key lengths
//! - Versions, regions, classes and ADR profiles
//! - Status flags and stream state

pub mod device;
pub mod eui;

pub use device::{
    AdrProfile, DeviceClass, IntervalUnit, ModemStatus, Region, StreamStatus, Version,
};
pub use eui::{EUI_LEN, Eui, KEY_LEN};
