//! Error types for the lora-modem library.

use thiserror::Error;

use crate::protocol::ResultCode;

/// The main error type for modem operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Serial port error.
    #[error("serial port error: {0}")]
    Serial(#[from] tokio_serial::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A caller-supplied argument violates a size or range constraint.
    ///
    /// Nothing is sent on the wire when this is returned.
    #[error("invalid argument: {reason}")]
    Validation { reason: String },

    /// The BUSY line did not clear after the COMMAND line was asserted.
    #[error("timeout waiting for BUSY line to clear after {timeout_ms}ms")]
    HandshakeTimeout { timeout_ms: u64 },

    /// No well-formed response frame could be assembled.
    #[error("no valid response frame ({received} bytes received)")]
    Frame { received: usize },

    /// The modem rejected the command.
    #[error("command failed: {0}")]
    Command(ResultCode),

    /// The modem accepted the command but the response payload is malformed.
    #[error("protocol error: {message}")]
    Protocol { message: String },
}

impl Error {
    /// Shorthand for building a [`Error::Validation`].
    pub(crate) fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }

    /// Shorthand for building a [`Error::Protocol`].
    pub(crate) fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// Returns the modem result code if the modem rejected the command.
    #[must_use]
    pub const fn result_code(&self) -> Option<ResultCode> {
        match self {
            Self::Command(rc) => Some(*rc),
            _ => None,
        }
    }
}

/// Result type alias for modem operations.
pub type Result<T> = std::result::Result<T, Error>;
