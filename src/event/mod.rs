//! Asynchronous modem events.
//!
//! Events are not pushed by the modem; the host fetches them one at a time
//! with the `GetEvent` command. The response payload is
//! `[type:1] [pending count:1] [data...]`, and an empty payload means no
//! event is pending.

use bytes::Bytes;

use crate::protocol::names::{EVENT_NAMES, name_of};

/// RSSI offset applied to the raw downlink RSSI byte, in dB.
const RSSI_OFFSET: i16 = 64;

/// SNR scaling factor (raw value is in quarter dB).
const SNR_SCALE: f32 = 0.25;

/// Event type codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EventType {
    /// Modem was reset.
    Reset = 0x00,
    /// Alarm timer expired.
    Alarm = 0x01,
    /// Network joined.
    Joined = 0x02,
    /// Uplink finished.
    TxDone = 0x03,
    /// Downlink received.
    DownData = 0x04,
    /// File upload finished.
    UploadDone = 0x05,
    /// Configuration changed by the network.
    SetConf = 0x06,
    /// Modem muted or unmuted.
    Mute = 0x07,
    /// Stream transmission finished.
    StreamDone = 0x08,
    /// Link status changed.
    LinkStatus = 0x09,
    /// Join attempt failed.
    JoinFail = 0x0A,
}

impl EventType {
    /// Parses an event type code.
    #[must_use]
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x00 => Some(Self::Reset),
            0x01 => Some(Self::Alarm),
            0x02 => Some(Self::Joined),
            0x03 => Some(Self::TxDone),
            0x04 => Some(Self::DownData),
            0x05 => Some(Self::UploadDone),
            0x06 => Some(Self::SetConf),
            0x07 => Some(Self::Mute),
            0x08 => Some(Self::StreamDone),
            0x09 => Some(Self::LinkStatus),
            0x0A => Some(Self::JoinFail),
            _ => None,
        }
    }

    /// Returns the symbolic name of this event type.
    #[must_use]
    pub fn name(self) -> &'static str {
        name_of(EVENT_NAMES, self as u8).unwrap_or("UNKNOWN")
    }
}

/// Outcome of an uplink reported by `TxDone`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxOutcome {
    /// The frame was not sent.
    NotSent,
    /// The frame was sent.
    Sent,
    /// The frame was sent and confirmed by the network.
    Confirmed,
}

impl TxOutcome {
    /// Parses an outcome byte.
    #[must_use]
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x00 => Some(Self::NotSent),
            0x01 => Some(Self::Sent),
            0x02 => Some(Self::Confirmed),
            _ => None,
        }
    }
}

impl std::fmt::Display for TxOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::NotSent => "frame not sent",
            Self::Sent => "frame sent",
            Self::Confirmed => "frame sent and confirmed",
        })
    }
}

/// A received downlink.
#[derive(Debug, Clone, PartialEq)]
pub struct Downlink {
    /// Received signal strength in dBm.
    pub rssi: i16,
    /// Signal-to-noise ratio in dB.
    pub snr: f32,
    /// Downlink flags.
    pub flags: u8,
    /// LoRaWAN port.
    pub port: u8,
    /// Application payload.
    pub payload: Bytes,
}

/// Decoded modem event.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Modem was reset; carries the reset counter.
    Reset { counter: u16 },
    /// Uplink finished.
    TxDone(TxOutcome),
    /// Downlink received.
    DownData(Downlink),
    /// File upload finished; `true` if it completed successfully.
    UploadDone(bool),
    /// Link status changed; `true` if the connection is active.
    LinkStatus(bool),
    /// Network joined.
    Joined,
    /// Join attempt failed.
    JoinFail,
    /// Stream transmission finished.
    StreamDone,
    /// Alarm timer expired.
    Alarm,
    /// Event this client does not interpret.
    Other {
        event_type: u8,
        count: u8,
        data: Bytes,
    },
}

impl Event {
    /// Decodes an event from its type, pending count and data.
    ///
    /// Never fails: unknown types, and known types whose data is too short,
    /// are returned as [`Event::Other`].
    #[must_use]
    pub fn decode(event_type: u8, count: u8, data: &[u8]) -> Self {
        let decoded = EventType::from_byte(event_type).and_then(|kind| match kind {
            EventType::Reset => data
                .get(..2)
                .map(|b| Self::Reset {
                    counter: u16::from_be_bytes([b[0], b[1]]),
                }),
            EventType::TxDone => data
                .first()
                .and_then(|b| TxOutcome::from_byte(*b))
                .map(Self::TxDone),
            EventType::DownData => decode_downlink(data).map(Self::DownData),
            EventType::UploadDone => data.first().map(|b| Self::UploadDone(*b == 0x01)),
            EventType::LinkStatus => data.first().map(|b| Self::LinkStatus(*b == 0x01)),
            EventType::Joined => Some(Self::Joined),
            EventType::JoinFail => Some(Self::JoinFail),
            EventType::StreamDone => Some(Self::StreamDone),
            EventType::Alarm => Some(Self::Alarm),
            EventType::SetConf | EventType::Mute => None,
        });

        decoded.unwrap_or_else(|| Self::Other {
            event_type,
            count,
            data: Bytes::copy_from_slice(data),
        })
    }

    /// Decodes a `GetEvent` response payload.
    ///
    /// Returns `None` for an empty payload (no event pending).
    #[must_use]
    pub fn from_payload(payload: &[u8]) -> Option<Self> {
        let (&event_type, rest) = payload.split_first()?;
        let (count, data) = match rest.split_first() {
            Some((&count, data)) => (count, data),
            None => (0, rest),
        };
        Some(Self::decode(event_type, count, data))
    }

    /// Returns the event type, if known.
    #[must_use]
    pub const fn event_type(&self) -> Option<EventType> {
        match self {
            Self::Reset { .. } => Some(EventType::Reset),
            Self::TxDone(_) => Some(EventType::TxDone),
            Self::DownData(_) => Some(EventType::DownData),
            Self::UploadDone(_) => Some(EventType::UploadDone),
            Self::LinkStatus(_) => Some(EventType::LinkStatus),
            Self::Joined => Some(EventType::Joined),
            Self::JoinFail => Some(EventType::JoinFail),
            Self::StreamDone => Some(EventType::StreamDone),
            Self::Alarm => Some(EventType::Alarm),
            Self::Other { event_type, .. } => EventType::from_byte(*event_type),
        }
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reset { counter } => write!(f, "RESET: counter={counter}"),
            Self::TxDone(outcome) => write!(f, "TXDONE: {outcome}"),
            Self::DownData(dl) => write!(
                f,
                "DOWNDATA: RSSI={}dBm, SNR={}dB, flags={:02x}, port={}, payload={}",
                dl.rssi,
                dl.snr,
                dl.flags,
                dl.port,
                hex::encode(&dl.payload)
            ),
            Self::UploadDone(ok) => write!(
                f,
                "UPLOADDONE: {}",
                if *ok { "successfully completed" } else { "aborted" }
            ),
            Self::LinkStatus(active) => write!(
                f,
                "LINKSTATUS: {}",
                if *active {
                    "connection active"
                } else {
                    "connection inactive"
                }
            ),
            Self::Joined => f.write_str("JOINED"),
            Self::JoinFail => f.write_str("JOINFAIL"),
            Self::StreamDone => f.write_str("STREAMDONE"),
            Self::Alarm => f.write_str("ALARM"),
            Self::Other {
                event_type,
                count,
                data,
            } => write!(
                f,
                "{}: type={event_type}, count={count}, data={}",
                name_of(EVENT_NAMES, *event_type).unwrap_or("EVENT"),
                hex::encode(data)
            ),
        }
    }
}

/// Parses a downlink.
///
/// Format:
/// ```text
/// [rssi:1 signed] [snr:1 signed] [flags:1] [port:1] [payload...]
/// ```
fn decode_downlink(data: &[u8]) -> Option<Downlink> {
    let header = data.get(..4)?;
    Some(Downlink {
        rssi: i16::from(header[0] as i8) - RSSI_OFFSET,
        snr: f32::from(header[1] as i8) * SNR_SCALE,
        flags: header[2],
        port: header[3],
        payload: Bytes::copy_from_slice(&data[4..]),
    })
}
