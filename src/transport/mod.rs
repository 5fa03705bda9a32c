//! Transport layer for modem communication.
//!
//! A transport moves bytes over the point-to-point link and exposes the two
//! handshake lines: the COMMAND output and the BUSY input. All calls block
//! and are bounded by the transport's own timeouts.

pub mod handshake;
pub mod mock;
pub mod serial;

use crate::error::Result;

/// Trait for transport implementations.
pub trait Transport {
    /// Drives the COMMAND line. `true` signals that a command is being sent.
    fn set_command_line(&mut self, asserted: bool) -> Result<()>;

    /// Returns true while the modem reports BUSY.
    fn is_busy(&mut self) -> Result<bool>;

    /// Writes all bytes to the link.
    fn write(&mut self, data: &[u8]) -> Result<()>;

    /// Reads a single byte.
    ///
    /// Returns `Ok(None)` when the per-read timeout elapses without data.
    fn read_byte(&mut self) -> Result<Option<u8>>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn set_command_line(&mut self, asserted: bool) -> Result<()> {
        (**self).set_command_line(asserted)
    }

    fn is_busy(&mut self) -> Result<bool> {
        (**self).is_busy()
    }

    fn write(&mut self, data: &[u8]) -> Result<()> {
        (**self).write(data)
    }

    fn read_byte(&mut self) -> Result<Option<u8>> {
        (**self).read_byte()
    }
}

pub use handshake::{Channel, HandshakeConfig, LineHandshake};
pub use mock::MockTransport;
pub use serial::{SerialConfig, SerialTransport};
