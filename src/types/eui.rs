//! EUI-64 identifiers and AES keys.

/// Length of an EUI in bytes.
pub const EUI_LEN: usize = 8;

/// Length of a LoRaWAN AES-128 key in bytes.
pub const KEY_LEN: usize = 16;

/// A 64-bit extended unique identifier (chip, device or join EUI).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Eui([u8; EUI_LEN]);

impl Eui {
    /// Creates an EUI from its eight bytes.
    #[must_use]
    pub const fn new(bytes: [u8; EUI_LEN]) -> Self {
        Self(bytes)
    }

    /// Tries to create an EUI from a slice.
    ///
    /// Returns `None` if the slice is not exactly 8 bytes.
    #[must_use]
    pub fn try_from_bytes(bytes: &[u8]) -> Option<Self> {
        <[u8; EUI_LEN]>::try_from(bytes).ok().map(Self)
    }

    /// Returns the EUI as a byte slice.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the EUI as a plain hex string.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }

    /// Parses an EUI from a hex string, with or without `-` or `:` separators.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not valid hex or not 8 bytes long.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let digits: String = s.chars().filter(|c| *c != '-' && *c != ':').collect();
        let bytes = hex::decode(digits)?;
        Self::try_from_bytes(&bytes).ok_or(hex::FromHexError::InvalidStringLength)
    }
}

impl std::str::FromStr for Eui {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl std::fmt::Debug for Eui {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Eui({self})")
    }
}

impl std::fmt::Display for Eui {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, b) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("-")?;
            }
            write!(f, "{b:02X}")?;
        }
        Ok(())
    }
}
