//! Main [`Modem`] client implementation.
//!
//! This module provides the command client that combines the line handshake
//! and the frame codec into strictly synchronous request/response exchanges.
//! Exactly one exchange is outstanding at a time: every command borrows the
//! client mutably for the whole acquire, write, release, read and decode
//! sequence, because responses are correlated with requests only by order.

use bytes::Bytes;

use crate::error::{Error, Result};
use crate::event::Event;
use crate::protocol::names::{COMMAND_NAMES, name_of};
use crate::protocol::{CommandOpcode, FrameAssembler, MAX_PAYLOAD_SIZE, ResultCode, encode_frame};
use crate::transport::{HandshakeConfig, LineHandshake, SerialConfig, SerialTransport, Transport};

/// Client for communicating with a modem.
pub struct Modem<T> {
    transport: T,
    handshake: LineHandshake,
}

impl Modem<SerialTransport> {
    /// Opens a serial port with default settings and creates a client.
    ///
    /// # Arguments
    ///
    /// * `port` - Serial port path (e.g., "/dev/ttyUSB0")
    pub fn serial(port: impl Into<String>) -> Result<Self> {
        Self::with_serial_config(SerialConfig::new(port))
    }

    /// Opens a serial port with custom configuration and creates a client.
    pub fn with_serial_config(config: SerialConfig) -> Result<Self> {
        Ok(Self::new(SerialTransport::open(config)?))
    }
}

impl<T: Transport> Modem<T> {
    /// Creates a new client with the given transport and default timing.
    #[must_use]
    pub fn new(transport: T) -> Self {
        Self::with_handshake(transport, HandshakeConfig::default())
    }

    /// Creates a new client with custom handshake timing.
    #[must_use]
    pub fn with_handshake(transport: T, config: HandshakeConfig) -> Self {
        Self {
            transport,
            handshake: LineHandshake::new(config),
        }
    }

    /// Returns the underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns the underlying transport mutably.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Consumes the client and returns the transport.
    pub fn into_inner(self) -> T {
        self.transport
    }

    /// Executes one command and returns the response payload.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] if the payload does not fit in a frame
    /// - [`Error::HandshakeTimeout`] if BUSY never clears
    /// - [`Error::Frame`] if no valid response frame arrives
    /// - [`Error::Command`] if the modem answers with a non-OK result code
    pub fn execute(&mut self, command: CommandOpcode, payload: &[u8]) -> Result<Bytes> {
        self.execute_raw(command.into(), payload)
    }

    /// Executes a command given by its raw id.
    pub fn execute_raw(&mut self, command: u8, payload: &[u8]) -> Result<Bytes> {
        if payload.len() > MAX_PAYLOAD_SIZE {
            return Err(Error::validation(format!(
                "payload of {} bytes exceeds maximum {MAX_PAYLOAD_SIZE}",
                payload.len()
            )));
        }

        let name = name_of(COMMAND_NAMES, command).unwrap_or("UNKNOWN");
        let request = encode_frame(command, payload);
        tracing::debug!("sending {} ({} byte payload)", name, payload.len());
        tracing::trace!("request frame: {}", hex::encode(&request));

        let mut channel = self.handshake.acquire(&mut self.transport)?;
        channel.write(&request)?;
        channel.release()?;

        let mut assembler = FrameAssembler::new();
        while !assembler.is_complete() {
            match self.transport.read_byte()? {
                Some(byte) => assembler.push(byte),
                None => {
                    tracing::trace!("read stalled after {} bytes", assembler.len());
                    break;
                }
            }
        }

        let Some(frame) = assembler.finish() else {
            tracing::debug!("{}: no valid response ({} bytes)", name, assembler.len());
            return Err(Error::Frame {
                received: assembler.len(),
            });
        };

        let rc = ResultCode::from(frame.code);
        if !rc.is_ok() {
            tracing::debug!("{} failed: {}", name, rc);
            return Err(Error::Command(rc));
        }

        tracing::trace!("{} ok: {}", name, hex::encode(&frame.payload));
        Ok(frame.payload)
    }

    /// Executes a command whose response carries no payload of interest.
    pub(crate) fn execute_unit(&mut self, command: CommandOpcode, payload: &[u8]) -> Result<()> {
        self.execute(command, payload).map(|_| ())
    }

    /// Fetches the next pending event.
    ///
    /// Returns `Ok(None)` when no event is pending.
    pub fn get_event(&mut self) -> Result<Option<Event>> {
        let payload = self.execute(CommandOpcode::GetEvent, &[])?;
        let event = Event::from_payload(&payload);
        if let Some(ref event) = event {
            tracing::debug!("event: {}", event);
        }
        Ok(event)
    }
}
