//! Result codes carried in the first byte of every response frame.

use std::fmt;

use crate::protocol::names::{RESULT_NAMES, name_of};

/// Result code of a response frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultCode {
    /// Command executed successfully.
    Ok,
    /// Unknown command.
    Unknown,
    /// Command not implemented.
    NotImplemented,
    /// Modem not initialised for this command.
    NotInitialized,
    /// Invalid parameter.
    Invalid,
    /// Modem busy.
    Busy,
    /// Command failed.
    Fail,
    /// Bad format.
    BadFormat,
    /// Bad CRC.
    BadCrc,
    /// Bad signature.
    BadSignature,
    /// Bad size.
    BadSize,
    /// The modem could not decode the request frame.
    FrameError,
    /// Code not known to this client.
    Other(u8),
}

impl ResultCode {
    /// Returns true for [`ResultCode::Ok`].
    #[must_use]
    pub const fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl From<u8> for ResultCode {
    fn from(code: u8) -> Self {
        match code {
            0x00 => Self::Ok,
            0x01 => Self::Unknown,
            0x02 => Self::NotImplemented,
            0x03 => Self::NotInitialized,
            0x04 => Self::Invalid,
            0x05 => Self::Busy,
            0x06 => Self::Fail,
            0x07 => Self::BadFormat,
            0x08 => Self::BadCrc,
            0x09 => Self::BadSignature,
            0x0A => Self::BadSize,
            0x0F => Self::FrameError,
            other => Self::Other(other),
        }
    }
}

impl From<ResultCode> for u8 {
    fn from(code: ResultCode) -> Self {
        match code {
            ResultCode::Ok => 0x00,
            ResultCode::Unknown => 0x01,
            ResultCode::NotImplemented => 0x02,
            ResultCode::NotInitialized => 0x03,
            ResultCode::Invalid => 0x04,
            ResultCode::Busy => 0x05,
            ResultCode::Fail => 0x06,
            ResultCode::BadFormat => 0x07,
            ResultCode::BadCrc => 0x08,
            ResultCode::BadSignature => 0x09,
            ResultCode::BadSize => 0x0A,
            ResultCode::FrameError => 0x0F,
            ResultCode::Other(code) => code,
        }
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = u8::from(*self);
        match name_of(RESULT_NAMES, code) {
            Some(name) => f.write_str(name),
            None => write!(f, "0x{code:02X}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_code_conversion() {
        for code in 0..=u8::MAX {
            assert_eq!(u8::from(ResultCode::from(code)), code);
        }
        assert!(ResultCode::from(0x00).is_ok());
        assert_eq!(ResultCode::from(0x05), ResultCode::Busy);
        assert_eq!(ResultCode::from(0x42), ResultCode::Other(0x42));
    }

    #[test]
    fn test_result_code_display() {
        assert_eq!(ResultCode::Invalid.to_string(), "INVALID");
        assert_eq!(ResultCode::Other(0x42).to_string(), "0x42");
    }
}
