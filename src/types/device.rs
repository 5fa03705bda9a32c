//! Device configuration and state types.

use std::time::Duration;

use crate::error::{Error, Result};
use crate::protocol::names::{ADR_PROFILE_NAMES, STATUS_NAMES, name_of};

/// Versions reported by `GetVersion`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Version {
    /// Bootloader version.
    pub bootloader: u32,
    /// Firmware version.
    pub firmware: u32,
    /// LoRaWAN version, one nibble per component.
    pub lorawan: u16,
}

impl Version {
    /// Returns the LoRaWAN version as `(major, minor, patch)`.
    #[must_use]
    pub const fn lorawan_version(&self) -> (u8, u8, u8) {
        (
            ((self.lorawan >> 8) & 0x0F) as u8,
            ((self.lorawan >> 4) & 0x0F) as u8,
            (self.lorawan & 0x0F) as u8,
        )
    }
}

/// LoRaWAN regional parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// EU 863-870 MHz.
    Eu868,
    /// AS 923 MHz.
    As923,
    /// US 902-928 MHz.
    Us915,
    /// AU 915-928 MHz.
    Au915,
    /// CN 470-510 MHz.
    Cn470,
    /// Region code not known to this client.
    Other(u8),
}

impl Region {
    /// Parses a region from its code.
    #[must_use]
    pub const fn from_byte(byte: u8) -> Self {
        match byte {
            1 => Self::Eu868,
            2 => Self::As923,
            3 => Self::Us915,
            4 => Self::Au915,
            5 => Self::Cn470,
            other => Self::Other(other),
        }
    }

    /// Returns the region code.
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        match self {
            Self::Eu868 => 1,
            Self::As923 => 2,
            Self::Us915 => 3,
            Self::Au915 => 4,
            Self::Cn470 => 5,
            Self::Other(code) => code,
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Eu868 => f.write_str("EU868"),
            Self::As923 => f.write_str("AS923"),
            Self::Us915 => f.write_str("US915"),
            Self::Au915 => f.write_str("AU915"),
            Self::Cn470 => f.write_str("CN470"),
            Self::Other(code) => write!(f, "region {code}"),
        }
    }
}

/// LoRaWAN device class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    /// Class A.
    A,
    /// Class C.
    C,
    /// Class code not known to this client.
    Other(u8),
}

impl DeviceClass {
    /// Parses a class from its code.
    #[must_use]
    pub const fn from_byte(byte: u8) -> Self {
        match byte {
            0 => Self::A,
            2 => Self::C,
            other => Self::Other(other),
        }
    }

    /// Returns the class code.
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        match self {
            Self::A => 0,
            Self::C => 2,
            Self::Other(code) => code,
        }
    }
}

/// Adaptive data-rate profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum AdrProfile {
    /// Data rate controlled by the network server.
    NetworkServerControlled = 0,
    /// Mobile, favouring range.
    MobileLongRange = 1,
    /// Mobile, favouring battery life.
    MobileLowPower = 2,
    /// Custom data-rate distribution (16 bytes).
    Custom = 3,
}

impl AdrProfile {
    /// Number of data-rate bytes carried by a custom profile.
    pub const CUSTOM_DATA_LEN: usize = 16;

    /// Returns the symbolic name of the profile.
    #[must_use]
    pub fn name(self) -> &'static str {
        name_of(ADR_PROFILE_NAMES, self as u8).unwrap_or("UNKNOWN")
    }
}

impl TryFrom<u8> for AdrProfile {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Self::NetworkServerControlled),
            1 => Ok(Self::MobileLongRange),
            2 => Ok(Self::MobileLowPower),
            3 => Ok(Self::Custom),
            other => Err(Error::validation(format!(
                "ADR profile {other} out of range (0-3)"
            ))),
        }
    }
}

/// Unit of the device management reporting interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum IntervalUnit {
    /// Seconds.
    Seconds = 0,
    /// Days.
    Days = 1,
    /// Hours.
    Hours = 2,
    /// Minutes.
    Minutes = 3,
}

impl IntervalUnit {
    /// Largest value that fits the 6-bit interval field.
    pub const MAX_VALUE: u8 = 63;

    /// Parses the unit from the top two bits of an interval byte.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => Self::Seconds,
            1 => Self::Days,
            2 => Self::Hours,
            _ => Self::Minutes,
        }
    }

    /// Seconds per unit.
    #[must_use]
    pub const fn seconds(self) -> u64 {
        match self {
            Self::Seconds => 1,
            Self::Days => 86_400,
            Self::Hours => 3_600,
            Self::Minutes => 60,
        }
    }

    /// Encodes a value in this unit as an interval byte.
    #[must_use]
    pub const fn encode(self, value: u8) -> u8 {
        ((self as u8) << 6) | (value & 0x3F)
    }

    /// Decodes an interval byte.
    #[must_use]
    pub const fn decode(byte: u8) -> Duration {
        let unit = Self::from_bits(byte >> 6);
        Duration::from_secs((byte & 0x3F) as u64 * unit.seconds())
    }

    /// Picks the unit for an interval in seconds and returns `(value, unit)`.
    ///
    /// The value is truncated to whole units.
    #[must_use]
    pub const fn for_seconds(secs: u64) -> (u64, Self) {
        if secs < Self::MAX_VALUE as u64 {
            (secs, Self::Seconds)
        } else if secs < 3_600 {
            (secs / 60, Self::Minutes)
        } else if secs < 86_400 {
            (secs / 3_600, Self::Hours)
        } else {
            (secs / 86_400, Self::Days)
        }
    }
}

/// Modem status register.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModemStatus(u8);

impl ModemStatus {
    /// Brownout reset occurred.
    pub const BROWNOUT: Self = Self(0x01);
    /// Firmware crash occurred.
    pub const CRASH: Self = Self(0x02);
    /// Modem muted by the network.
    pub const MUTE: Self = Self(0x04);
    /// Joined to a network.
    pub const JOINED: Self = Self(0x08);
    /// Radio communication suspended.
    pub const SUSPEND: Self = Self(0x10);
    /// File upload in progress.
    pub const UPLOAD: Self = Self(0x20);
    /// Join in progress.
    pub const JOINING: Self = Self(0x40);
    /// Stream in progress.
    pub const STREAM: Self = Self(0x80);

    /// Creates status flags from a raw byte.
    #[must_use]
    pub const fn from_byte(byte: u8) -> Self {
        Self(byte)
    }

    /// Returns the raw byte value.
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        self.0
    }

    /// Check if a flag is set.
    #[must_use]
    pub const fn contains(self, flag: Self) -> bool {
        (self.0 & flag.0) == flag.0
    }

    /// Names of the bits that are set, lowest bit first.
    pub fn names(self) -> impl Iterator<Item = &'static str> {
        (0..8)
            .map(|bit| 1u8 << bit)
            .filter(move |mask| self.0 & mask != 0)
            .filter_map(|mask| name_of(STATUS_NAMES, mask))
    }
}

/// Stream buffer state reported by `StreamStatus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamStatus {
    /// Bytes pending transmission.
    pub pending: u16,
    /// Free buffer space in bytes.
    pub free: u16,
}
