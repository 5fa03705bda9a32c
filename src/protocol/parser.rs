//! Binary data parsing utilities for modem responses.
//!
//! All multi-byte integers on the wire are big-endian.

use bytes::Buf;

use crate::error::{Error, Result};
use crate::types::{Eui, StreamStatus, Version};

/// Fails unless `data` holds exactly `expected` bytes.
fn expect_len(what: &str, data: &[u8], expected: usize) -> Result<()> {
    if data.len() == expected {
        Ok(())
    } else {
        Err(Error::protocol(format!(
            "{what}: expected {expected} bytes, got {}",
            data.len()
        )))
    }
}

/// Parses a single-byte response.
pub fn parse_u8(what: &str, data: &[u8]) -> Result<u8> {
    data.first()
        .copied()
        .ok_or_else(|| Error::protocol(format!("{what}: empty response")))
}

/// Parses a big-endian `u32` response (charge, time).
pub fn parse_u32(what: &str, data: &[u8]) -> Result<u32> {
    expect_len(what, data, 4)?;
    let mut cursor = data;
    Ok(cursor.get_u32())
}

/// Parses `Version` from a `GetVersion` response.
///
/// Format:
/// ```text
/// [bootloader:4BE] [firmware:4BE] [lorawan:2BE]
/// ```
pub fn parse_version(data: &[u8]) -> Result<Version> {
    expect_len("version", data, 10)?;
    let mut cursor = data;
    Ok(Version {
        bootloader: cursor.get_u32(),
        firmware: cursor.get_u32(),
        lorawan: cursor.get_u16(),
    })
}

/// Parses an 8-byte EUI.
pub fn parse_eui(data: &[u8]) -> Result<Eui> {
    Eui::try_from_bytes(data)
        .ok_or_else(|| Error::protocol(format!("EUI: expected 8 bytes, got {}", data.len())))
}

/// Parses `StreamStatus`.
///
/// Format:
/// ```text
/// [pending:2BE] [free:2BE]
/// ```
pub fn parse_stream_status(data: &[u8]) -> Result<StreamStatus> {
    expect_len("stream status", data, 4)?;
    let mut cursor = data;
    Ok(StreamStatus {
        pending: cursor.get_u16(),
        free: cursor.get_u16(),
    })
}
