//! Command opcodes for the modem protocol.
//!
//! Every request frame starts with one of these ids, followed by a length
//! byte and command-specific parameters.

use crate::protocol::names::{COMMAND_NAMES, name_of};

/// Command ids sent to the modem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CommandOpcode {
    // Device commands
    /// Fetch the next pending event.
    GetEvent = 0x00,
    /// Bootloader, firmware and LoRaWAN versions.
    GetVersion = 0x01,
    /// Restart the modem.
    Reset = 0x02,
    /// Restore factory settings.
    FactoryReset = 0x03,
    /// Reset the charge counter.
    ResetCharge = 0x04,
    /// Accumulated charge in mAh.
    GetCharge = 0x05,
    /// Get TX power offset.
    GetTxPowerOffset = 0x06,
    /// Set TX power offset.
    SetTxPowerOffset = 0x07,
    /// Radio test mode.
    Test = 0x08,
    /// Firmware update block.
    FirmwareUpdate = 0x09,
    /// Network time.
    GetTime = 0x0A,
    /// Status register.
    GetStatus = 0x0B,
    /// Arm the alarm timer.
    SetAlarm = 0x0C,
    /// Crash trace.
    GetTrace = 0x0D,

    // Identity and keys
    /// Device PIN.
    GetPin = 0x0E,
    /// Chip EUI.
    GetChipEui = 0x0F,
    /// Get join EUI.
    GetJoinEui = 0x10,
    /// Set join EUI.
    SetJoinEui = 0x11,
    /// Get device EUI.
    GetDevEui = 0x12,
    /// Set device EUI.
    SetDevEui = 0x13,
    /// Set network key (write only).
    SetNwkKey = 0x14,

    // Network configuration
    /// Get LoRaWAN class.
    GetClass = 0x15,
    /// Set LoRaWAN class.
    SetClass = 0x16,
    /// Configure a multicast session.
    SetMulticast = 0x17,
    /// Get region.
    GetRegion = 0x18,
    /// Set region.
    SetRegion = 0x19,
    /// List supported regions.
    ListRegions = 0x1A,
    /// Get ADR profile.
    GetAdrProfile = 0x1B,
    /// Set ADR profile.
    SetAdrProfile = 0x1C,

    // Device management
    /// Get device management port.
    GetDmPort = 0x1D,
    /// Set device management port.
    SetDmPort = 0x1E,
    /// Get device management reporting interval.
    GetDmInfoInterval = 0x1F,
    /// Set device management reporting interval.
    SetDmInfoInterval = 0x20,
    /// Get device management info fields.
    GetDmInfoFields = 0x21,
    /// Set device management info fields.
    SetDmInfoFields = 0x22,
    /// Send a device management status report now.
    SendDmStatus = 0x23,
    /// Set application status.
    SetAppStatus = 0x24,

    // Link control
    /// Start joining.
    Join = 0x25,
    /// Leave the network.
    LeaveNetwork = 0x26,
    /// Suspend or resume modem radio communication.
    SuspendModemComm = 0x27,
    /// Maximum payload for the next uplink.
    GetNextTxMaxPayload = 0x28,
    /// Queue an uplink.
    RequestTx = 0x29,
    /// Queue an uplink ahead of everything else.
    EmergencyTx = 0x2A,

    // File upload and streaming
    /// Start a file upload session.
    UploadInit = 0x2B,
    /// Upload data chunk.
    UploadData = 0x2C,
    /// Finish upload and start transmission.
    UploadStart = 0x2D,
    /// Initialise a data stream.
    StreamInit = 0x2E,
    /// Add a record to a data stream.
    SendStreamData = 0x2F,
    /// Stream buffer status.
    StreamStatus = 0x30,
}

impl CommandOpcode {
    /// Returns the symbolic name of this command.
    #[must_use]
    pub fn name(self) -> &'static str {
        name_of(COMMAND_NAMES, self as u8).unwrap_or("UNKNOWN")
    }
}

impl From<CommandOpcode> for u8 {
    fn from(cmd: CommandOpcode) -> Self {
        cmd as Self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_opcode_values() {
        assert_eq!(CommandOpcode::GetEvent as u8, 0x00);
        assert_eq!(CommandOpcode::GetVersion as u8, 0x01);
        assert_eq!(CommandOpcode::SetDevEui as u8, 0x13);
        assert_eq!(CommandOpcode::SetNwkKey as u8, 0x14);
        assert_eq!(CommandOpcode::Join as u8, 0x25);
        assert_eq!(CommandOpcode::RequestTx as u8, 0x29);
        assert_eq!(CommandOpcode::StreamStatus as u8, 0x30);
    }

    #[test]
    fn test_command_names() {
        assert_eq!(CommandOpcode::Join.name(), "JOIN");
        assert_eq!(CommandOpcode::GetDmInfoInterval.name(), "GETDMINFOINTERVAL");
    }

    #[test]
    fn test_command_from_conversion() {
        let cmd: u8 = CommandOpcode::RequestTx.into();
        assert_eq!(cmd, 0x29);
    }
}
