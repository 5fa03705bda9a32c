//! Frame encoding and decoding for the modem command protocol.
//!
//! Requests and responses share one layout:
//! ```text
//! ┌──────────┬──────────┬─────────────────┬──────────┐
//! │ CMD / RC │   LEN    │      DATA       │   LRC    │
//! │  1 byte  │  1 byte  │   LEN bytes     │  1 byte  │
//! └──────────┴──────────┴─────────────────┴──────────┘
//! ```
//!
//! `LRC` is the XOR of all preceding bytes, so a valid frame XORs to zero
//! across its whole length.

use bytes::{BufMut, Bytes, BytesMut};

/// Maximum payload size (the length field is a single byte).
pub const MAX_PAYLOAD_SIZE: usize = 255;

/// Frame overhead: code, length and checksum bytes.
pub const FRAME_OVERHEAD: usize = 3;

/// A decoded frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Command id (requests) or result code (responses).
    pub code: u8,
    /// Frame payload.
    pub payload: Bytes,
}

/// Computes the longitudinal redundancy check of a buffer.
#[must_use]
pub fn lrc(data: &[u8]) -> u8 {
    data.iter().fold(0, |acc, b| acc ^ b)
}

/// Encodes a code and payload into a self-checking frame.
///
/// # Panics
///
/// Panics if the payload exceeds `MAX_PAYLOAD_SIZE`.
#[must_use]
pub fn encode(code: u8, payload: &[u8]) -> Bytes {
    assert!(
        payload.len() <= MAX_PAYLOAD_SIZE,
        "payload exceeds maximum frame size"
    );

    let mut buf = BytesMut::with_capacity(FRAME_OVERHEAD + payload.len());
    buf.put_u8(code);
    buf.put_u8(payload.len() as u8);
    buf.put_slice(payload);
    let check = lrc(&buf);
    buf.put_u8(check);
    buf.freeze()
}

/// Decodes a complete frame.
///
/// Returns `None` unless the buffer holds exactly `3 + LEN` bytes and XORs
/// to zero. Malformed frames are not distinguished by kind.
#[must_use]
pub fn decode(buf: &[u8]) -> Option<Frame> {
    if buf.len() < FRAME_OVERHEAD {
        return None;
    }
    let length = usize::from(buf[1]);
    if buf.len() != FRAME_OVERHEAD + length || lrc(buf) != 0 {
        return None;
    }
    Some(Frame {
        code: buf[0],
        payload: Bytes::copy_from_slice(&buf[2..2 + length]),
    })
}

/// Collects response bytes until a structurally complete frame is present.
#[derive(Debug, Default)]
pub struct FrameAssembler {
    buffer: BytesMut,
}

impl FrameAssembler {
    /// Creates an empty assembler.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buffer: BytesMut::with_capacity(FRAME_OVERHEAD + MAX_PAYLOAD_SIZE),
        }
    }

    /// Appends one received byte.
    pub fn push(&mut self, byte: u8) {
        self.buffer.put_u8(byte);
    }

    /// Returns true once `3 + LEN` bytes have been collected.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.buffer.len() >= FRAME_OVERHEAD
            && self.buffer.len() >= FRAME_OVERHEAD + usize::from(self.buffer[1])
    }

    /// Returns the number of bytes collected so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns true if nothing has been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Decodes whatever has been collected.
    #[must_use]
    pub fn finish(&self) -> Option<Frame> {
        decode(&self.buffer)
    }
}
