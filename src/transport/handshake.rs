//! COMMAND/BUSY line handshake.
//!
//! Before any byte is written the host asserts COMMAND and then polls BUSY
//! until the modem is ready. The line is de-asserted again on every exit
//! path, including errors, so the link is never left wedged.

use std::time::{Duration, Instant};

use crate::error::{Error, Result};
use crate::transport::Transport;

/// Default bound on waiting for BUSY to clear.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_millis(10);

/// Default delay between the end of a write and releasing COMMAND.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(25);

/// Handshake timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandshakeConfig {
    /// How long BUSY may stay asserted after COMMAND goes active.
    pub busy_timeout: Duration,
    /// Time to keep COMMAND asserted after a write completes.
    pub settle_delay: Duration,
}

impl Default for HandshakeConfig {
    fn default() -> Self {
        Self {
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }
}

impl HandshakeConfig {
    /// Sets the BUSY timeout.
    #[must_use]
    pub const fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Sets the settle delay.
    #[must_use]
    pub const fn settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }
}

/// Gatekeeper for the COMMAND/BUSY lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineHandshake {
    config: HandshakeConfig,
}

impl LineHandshake {
    /// Creates a handshake with the given timing.
    #[must_use]
    pub const fn new(config: HandshakeConfig) -> Self {
        Self { config }
    }

    /// Returns the handshake timing.
    #[must_use]
    pub const fn config(&self) -> &HandshakeConfig {
        &self.config
    }

    /// Asserts COMMAND and busy-waits for BUSY to clear.
    ///
    /// The returned [`Channel`] holds the transport exclusively and releases
    /// the line when it is released or dropped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::HandshakeTimeout`] if BUSY is still set after the
    /// configured timeout. The line is released before returning.
    pub fn acquire<'a, T: Transport + ?Sized>(
        &self,
        transport: &'a mut T,
    ) -> Result<Channel<'a, T>> {
        let mut channel = Channel {
            transport,
            settle_delay: self.config.settle_delay,
            released: false,
        };
        channel.transport.set_command_line(true)?;

        let start = Instant::now();
        while channel.transport.is_busy()? {
            if start.elapsed() >= self.config.busy_timeout {
                tracing::error!("BUSY line still set after {:?}", self.config.busy_timeout);
                return Err(Error::HandshakeTimeout {
                    timeout_ms: u64::try_from(self.config.busy_timeout.as_millis())
                        .unwrap_or(u64::MAX),
                });
            }
            std::hint::spin_loop();
        }

        Ok(channel)
    }
}

/// An acquired command channel.
pub struct Channel<'a, T: Transport + ?Sized> {
    transport: &'a mut T,
    settle_delay: Duration,
    released: bool,
}

impl<T: Transport + ?Sized> Channel<'_, T> {
    /// Writes a complete frame and waits for the settle delay.
    pub fn write(&mut self, data: &[u8]) -> Result<()> {
        self.transport.write(data)?;
        if !self.settle_delay.is_zero() {
            std::thread::sleep(self.settle_delay);
        }
        Ok(())
    }

    /// De-asserts COMMAND, reporting any failure to do so.
    pub fn release(mut self) -> Result<()> {
        self.released = true;
        self.transport.set_command_line(false)
    }
}

impl<T: Transport + ?Sized> Drop for Channel<'_, T> {
    fn drop(&mut self) {
        if !self.released {
            if let Err(e) = self.transport.set_command_line(false) {
                tracing::warn!("failed to release COMMAND line: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;

    fn fast() -> LineHandshake {
        LineHandshake::new(HandshakeConfig::default().settle_delay(Duration::ZERO))
    }

    #[test]
    fn test_acquire_and_release() {
        let mut mock = MockTransport::new();
        {
            let mut channel = fast().acquire(&mut mock).unwrap();
            channel.write(&[0x25, 0x00, 0x25]).unwrap();
            channel.release().unwrap();
        }
        assert_eq!(mock.line_changes(), &[true, false]);
        assert!(!mock.command_line());
        assert_eq!(mock.written(), &[0x25, 0x00, 0x25]);
    }

    #[test]
    fn test_waits_for_busy_to_clear() {
        let mut mock = MockTransport::new();
        mock.set_busy_polls(3);
        let channel = fast().acquire(&mut mock).unwrap();
        drop(channel);
        assert_eq!(mock.busy_polls_remaining(), 0);
        assert!(!mock.command_line());
    }

    #[test]
    fn test_timeout_releases_line() {
        let mut mock = MockTransport::new();
        mock.set_stuck_busy(true);

        let result = fast().acquire(&mut mock);
        assert!(matches!(
            result,
            Err(Error::HandshakeTimeout { timeout_ms: 10 })
        ));
        drop(result);
        assert_eq!(mock.line_changes(), &[true, false]);
        assert!(mock.written().is_empty());
    }

    #[test]
    fn test_drop_releases_line() {
        let mut mock = MockTransport::new();
        {
            let _channel = fast().acquire(&mut mock).unwrap();
        }
        assert_eq!(mock.line_changes(), &[true, false]);
    }

    #[test]
    fn test_config_builder() {
        let config = HandshakeConfig::default()
            .busy_timeout(Duration::from_millis(50))
            .settle_delay(Duration::from_millis(5));
        assert_eq!(config.busy_timeout, Duration::from_millis(50));
        assert_eq!(config.settle_delay, Duration::from_millis(5));
        assert_eq!(HandshakeConfig::default().busy_timeout, DEFAULT_BUSY_TIMEOUT);
    }
}
