//! Serial transport implementation.
//!
//! The modem's COMMAND and BUSY pins are wired to the adapter's RTS and CTS
//! lines next to TXD/RXD:
//!
//! ```text
//! MODEM  SERIAL
//! -----  ------
//! RX     TXD
//! TX     RXD
//! CMD    RTS
//! BUSY   CTS
//! GND    GND
//! ```

use std::io::{self, Read, Write};
use std::time::Duration;

use tokio_serial::{ClearBuffer, FlowControl, SerialPort};

use crate::error::{Error, Result};
use crate::transport::Transport;

/// Default baud rate for the modem link.
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// Default per-byte read timeout.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(1);

/// Configuration for serial transport.
#[derive(Debug, Clone)]
pub struct SerialConfig {
    /// Serial port path (e.g., "/dev/ttyUSB0" or "COM3").
    pub port: String,
    /// Baud rate.
    pub baud_rate: u32,
    /// How long a single byte read may block.
    pub read_timeout: Duration,
}

impl SerialConfig {
    /// Creates a new serial configuration with default settings.
    #[must_use]
    pub fn new(port: impl Into<String>) -> Self {
        Self {
            port: port.into(),
            baud_rate: DEFAULT_BAUD_RATE,
            read_timeout: DEFAULT_READ_TIMEOUT,
        }
    }

    /// Sets the baud rate.
    #[must_use]
    pub const fn baud_rate(mut self, rate: u32) -> Self {
        self.baud_rate = rate;
        self
    }

    /// Sets the per-byte read timeout.
    #[must_use]
    pub const fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }
}

/// Serial transport driving the modem over a USB-serial adapter.
pub struct SerialTransport {
    config: SerialConfig,
    port: Box<dyn SerialPort>,
}

impl SerialTransport {
    /// Opens the serial port.
    ///
    /// COMMAND is de-asserted and stale input is discarded before returning.
    pub fn open(config: SerialConfig) -> Result<Self> {
        tracing::info!("opening serial port: {}", config.port);

        let mut port = tokio_serial::new(&config.port, config.baud_rate)
            .flow_control(FlowControl::None)
            .timeout(config.read_timeout)
            .open()
            .map_err(Error::Serial)?;

        port.write_request_to_send(false).map_err(Error::Serial)?;
        port.clear(ClearBuffer::Input).map_err(Error::Serial)?;

        tracing::info!("serial port open at {} baud", config.baud_rate);
        Ok(Self { config, port })
    }

    /// Opens the given port with default settings.
    pub fn with_port(port: impl Into<String>) -> Result<Self> {
        Self::open(SerialConfig::new(port))
    }

    /// Returns the configuration the port was opened with.
    #[must_use]
    pub const fn config(&self) -> &SerialConfig {
        &self.config
    }
}

impl Transport for SerialTransport {
    fn set_command_line(&mut self, asserted: bool) -> Result<()> {
        self.port
            .write_request_to_send(asserted)
            .map_err(Error::Serial)
    }

    fn is_busy(&mut self) -> Result<bool> {
        // CTS reads active once the modem pulls BUSY low.
        let ready = self.port.read_clear_to_send().map_err(Error::Serial)?;
        Ok(!ready)
    }

    fn write(&mut self, data: &[u8]) -> Result<()> {
        tracing::trace!("writing {} bytes: {}", data.len(), hex::encode(data));
        self.port.write_all(data)?;
        self.port.flush()?;
        Ok(())
    }

    fn read_byte(&mut self) -> Result<Option<u8>> {
        let mut buf = [0u8; 1];
        match self.port.read(&mut buf) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(buf[0])),
            Err(e) if e.kind() == io::ErrorKind::TimedOut => Ok(None),
            Err(e) => {
                tracing::error!("serial read error: {}", e);
                Err(Error::Io(e))
            }
        }
    }
}

/// Lists available serial ports.
///
/// # Errors
///
/// Returns an error if the port list cannot be retrieved.
pub fn list_ports() -> Result<Vec<String>> {
    let ports = tokio_serial::available_ports().map_err(Error::Serial)?;
    Ok(ports.into_iter().map(|p| p.port_name).collect())
}
