//! One-shot device provisioning.
//!
//! Run once during commissioning; the modem keeps identifiers and keys in
//! persistent storage.

use crate::client::Modem;
use crate::error::{Error, Result};
use crate::transport::Transport;
use crate::types::Eui;

/// Identifiers and root key written during provisioning.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Device EUI.
    pub dev_eui: Eui,
    /// Join (application) EUI.
    pub join_eui: Eui,
    /// Network root key.
    pub nwk_key: [u8; 16],
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("dev_eui", &self.dev_eui)
            .field("join_eui", &self.join_eui)
            .field("nwk_key", &"<redacted>")
            .finish()
    }
}

/// Writes the credentials and verifies both EUIs by reading them back.
pub fn provision<T: Transport>(modem: &mut Modem<T>, credentials: &Credentials) -> Result<()> {
    tracing::info!(
        "provisioning deveui {} joineui {}",
        credentials.dev_eui,
        credentials.join_eui
    );

    modem.set_dev_eui(credentials.dev_eui.as_bytes())?;
    modem.set_join_eui(credentials.join_eui.as_bytes())?;
    modem.set_nwk_key(&credentials.nwk_key)?;

    let dev_eui = modem.get_dev_eui()?;
    if dev_eui != credentials.dev_eui {
        return Err(Error::protocol(format!(
            "deveui read back as {dev_eui}, expected {}",
            credentials.dev_eui
        )));
    }
    let join_eui = modem.get_join_eui()?;
    if join_eui != credentials.join_eui {
        return Err(Error::protocol(format!(
            "joineui read back as {join_eui}, expected {}",
            credentials.join_eui
        )));
    }

    tracing::info!("provisioning complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::transport::{HandshakeConfig, MockTransport};

    fn credentials() -> Credentials {
        Credentials {
            dev_eui: Eui::new([1, 2, 3, 4, 5, 6, 7, 8]),
            join_eui: Eui::new([8, 7, 6, 5, 4, 3, 2, 1]),
            nwk_key: [0x2B; 16],
        }
    }

    fn modem() -> Modem<MockTransport> {
        Modem::with_handshake(
            MockTransport::new(),
            HandshakeConfig::default().settle_delay(Duration::ZERO),
        )
    }

    #[test]
    fn test_provision() {
        let creds = credentials();
        let mut modem = modem();
        let mock = modem.transport_mut();
        mock.push_ok(&[]);
        mock.push_ok(&[]);
        mock.push_ok(&[]);
        mock.push_ok(creds.dev_eui.as_bytes());
        mock.push_ok(creds.join_eui.as_bytes());

        provision(&mut modem, &creds).unwrap();

        let codes: Vec<u8> = modem
            .transport()
            .request_frames()
            .into_iter()
            .map(|f| f.unwrap().code)
            .collect();
        assert_eq!(codes, vec![0x13, 0x11, 0x14, 0x12, 0x10]);
    }

    #[test]
    fn test_provision_read_back_mismatch() {
        let creds = credentials();
        let mut modem = modem();
        let mock = modem.transport_mut();
        for _ in 0..3 {
            mock.push_ok(&[]);
        }
        mock.push_ok(&[0u8; 8]);

        let err = provision(&mut modem, &creds).unwrap_err();
        assert!(matches!(err, Error::Protocol { .. }));
    }

    #[test]
    fn test_credentials_debug_hides_key() {
        let debug = format!("{:?}", credentials());
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("43"));
    }
}
