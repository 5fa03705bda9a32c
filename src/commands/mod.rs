//! Typed modem commands.
//!
//! Each accessor packs its arguments into a payload, runs one exchange with
//! a fixed command id and unpacks the result. Arguments are validated
//! before anything touches the wire; a rejected argument returns
//! [`Error::Validation`] with no side effects.

use std::time::Duration;

use bytes::{BufMut, Bytes, BytesMut};

use crate::client::Modem;
use crate::error::{Error, Result};
use crate::protocol::CommandOpcode;
use crate::protocol::parser::{parse_eui, parse_stream_status, parse_u8, parse_u32, parse_version};
use crate::transport::Transport;
use crate::types::{
    AdrProfile, DeviceClass, EUI_LEN, Eui, IntervalUnit, KEY_LEN, ModemStatus, Region,
    StreamStatus, Version,
};

/// Size of a firmware update block and of an upload chunk.
pub const BLOCK_SIZE: usize = 128;

/// Length of the application status blob.
pub const APP_STATUS_LEN: usize = 8;

/// Fails unless `data` is exactly `expected` bytes long.
fn check_len(what: &str, data: &[u8], expected: usize) -> Result<()> {
    if data.len() == expected {
        Ok(())
    } else {
        Err(Error::validation(format!(
            "{what} must be {expected} bytes, got {}",
            data.len()
        )))
    }
}

/// Encodes a port plus boolean flag prefix.
fn port_flag(port: u8, flag: bool, data: &[u8]) -> Bytes {
    let mut buf = BytesMut::with_capacity(2 + data.len());
    buf.put_u8(port);
    buf.put_u8(u8::from(flag));
    buf.put_slice(data);
    buf.freeze()
}

impl<T: Transport> Modem<T> {
    // ==================== Device Commands ====================

    /// Gets bootloader, firmware and LoRaWAN versions.
    pub fn get_version(&mut self) -> Result<Version> {
        let data = self.execute(CommandOpcode::GetVersion, &[])?;
        parse_version(&data)
    }

    /// Restarts the modem. A `Reset` event follows.
    pub fn reset(&mut self) -> Result<()> {
        self.execute_unit(CommandOpcode::Reset, &[])
    }

    /// Restores factory settings.
    pub fn factory_reset(&mut self) -> Result<()> {
        self.execute_unit(CommandOpcode::FactoryReset, &[])
    }

    /// Gets the accumulated charge in mAh.
    pub fn get_charge(&mut self) -> Result<u32> {
        let data = self.execute(CommandOpcode::GetCharge, &[])?;
        parse_u32("charge", &data)
    }

    /// Resets the charge counter.
    pub fn reset_charge(&mut self) -> Result<()> {
        self.execute_unit(CommandOpcode::ResetCharge, &[])
    }

    /// Gets the TX power offset in dB.
    pub fn get_tx_power_offset(&mut self) -> Result<i8> {
        let data = self.execute(CommandOpcode::GetTxPowerOffset, &[])?;
        parse_u8("tx power offset", &data).map(|b| b as i8)
    }

    /// Sets the TX power offset in dB.
    pub fn set_tx_power_offset(&mut self, offset: i8) -> Result<()> {
        self.execute_unit(CommandOpcode::SetTxPowerOffset, &offset.to_be_bytes())
    }

    /// Gets the network time in seconds.
    pub fn get_time(&mut self) -> Result<u32> {
        let data = self.execute(CommandOpcode::GetTime, &[])?;
        parse_u32("time", &data)
    }

    /// Gets the status register.
    pub fn get_status(&mut self) -> Result<ModemStatus> {
        let data = self.execute(CommandOpcode::GetStatus, &[])?;
        parse_u8("status", &data).map(ModemStatus::from_byte)
    }

    /// Arms the alarm timer. An `Alarm` event follows when it expires.
    pub fn set_alarm(&mut self, seconds: u32) -> Result<()> {
        self.execute_unit(CommandOpcode::SetAlarm, &seconds.to_be_bytes())
    }

    /// Gets the crash trace, if one was recorded.
    pub fn get_trace(&mut self) -> Result<Option<Bytes>> {
        let data = self.execute(CommandOpcode::GetTrace, &[])?;
        Ok((!data.is_empty()).then_some(data))
    }

    // ==================== Identity Commands ====================

    /// Gets the device PIN.
    pub fn get_pin(&mut self) -> Result<Bytes> {
        self.execute(CommandOpcode::GetPin, &[])
    }

    /// Gets the chip EUI.
    pub fn get_chip_eui(&mut self) -> Result<Eui> {
        let data = self.execute(CommandOpcode::GetChipEui, &[])?;
        parse_eui(&data)
    }

    /// Gets the device EUI.
    pub fn get_dev_eui(&mut self) -> Result<Eui> {
        let data = self.execute(CommandOpcode::GetDevEui, &[])?;
        parse_eui(&data)
    }

    /// Sets the device EUI (exactly 8 bytes).
    pub fn set_dev_eui(&mut self, eui: &[u8]) -> Result<()> {
        check_len("deveui", eui, EUI_LEN)?;
        self.execute_unit(CommandOpcode::SetDevEui, eui)
    }

    /// Gets the join EUI.
    pub fn get_join_eui(&mut self) -> Result<Eui> {
        let data = self.execute(CommandOpcode::GetJoinEui, &[])?;
        parse_eui(&data)
    }

    /// Sets the join EUI (exactly 8 bytes).
    pub fn set_join_eui(&mut self, eui: &[u8]) -> Result<()> {
        check_len("joineui", eui, EUI_LEN)?;
        self.execute_unit(CommandOpcode::SetJoinEui, eui)
    }

    /// Sets the network key (exactly 16 bytes). The key cannot be read back.
    pub fn set_nwk_key(&mut self, key: &[u8]) -> Result<()> {
        check_len("nwkkey", key, KEY_LEN)?;
        self.execute_unit(CommandOpcode::SetNwkKey, key)
    }

    // ==================== Network Configuration ====================

    /// Gets the LoRaWAN class.
    pub fn get_class(&mut self) -> Result<DeviceClass> {
        let data = self.execute(CommandOpcode::GetClass, &[])?;
        parse_u8("class", &data).map(DeviceClass::from_byte)
    }

    /// Sets the LoRaWAN class.
    pub fn set_class(&mut self, class: DeviceClass) -> Result<()> {
        self.execute_unit(CommandOpcode::SetClass, &[class.as_byte()])
    }

    /// Configures the multicast session.
    ///
    /// Both session keys must be exactly 16 bytes.
    pub fn set_multicast(
        &mut self,
        group_addr: u32,
        nwk_skey_down: &[u8],
        app_skey: &[u8],
        seqno_down: u32,
    ) -> Result<()> {
        check_len("multicast network session key", nwk_skey_down, KEY_LEN)?;
        check_len("multicast application session key", app_skey, KEY_LEN)?;

        let mut buf = BytesMut::with_capacity(8 + 2 * KEY_LEN);
        buf.put_u32(group_addr);
        buf.put_slice(nwk_skey_down);
        buf.put_slice(app_skey);
        buf.put_u32(seqno_down);
        self.execute_unit(CommandOpcode::SetMulticast, &buf)
    }

    /// Gets the active region.
    pub fn get_region(&mut self) -> Result<Region> {
        let data = self.execute(CommandOpcode::GetRegion, &[])?;
        parse_u8("region", &data).map(Region::from_byte)
    }

    /// Sets the active region.
    pub fn set_region(&mut self, region: Region) -> Result<()> {
        self.execute_unit(CommandOpcode::SetRegion, &[region.as_byte()])
    }

    /// Lists the regions supported by the firmware.
    pub fn list_regions(&mut self) -> Result<Vec<Region>> {
        let data = self.execute(CommandOpcode::ListRegions, &[])?;
        Ok(data.iter().copied().map(Region::from_byte).collect())
    }

    /// Gets the ADR profile.
    pub fn get_adr_profile(&mut self) -> Result<AdrProfile> {
        let data = self.execute(CommandOpcode::GetAdrProfile, &[])?;
        let raw = parse_u8("ADR profile", &data)?;
        AdrProfile::try_from(raw)
            .map_err(|_| Error::protocol(format!("unknown ADR profile {raw}")))
    }

    /// Sets the ADR profile.
    ///
    /// Predefined profiles take no data; [`AdrProfile::Custom`] takes exactly
    /// 16 data-rate bytes.
    pub fn set_adr_profile(&mut self, profile: AdrProfile, custom: &[u8]) -> Result<()> {
        match profile {
            AdrProfile::Custom => check_len(
                "custom ADR data rates",
                custom,
                AdrProfile::CUSTOM_DATA_LEN,
            )?,
            _ if !custom.is_empty() => {
                return Err(Error::validation(format!(
                    "ADR profile {} takes no custom data",
                    profile.name()
                )));
            }
            _ => {}
        }

        let mut buf = BytesMut::with_capacity(1 + custom.len());
        buf.put_u8(profile as u8);
        buf.put_slice(custom);
        self.execute_unit(CommandOpcode::SetAdrProfile, &buf)
    }

    // ==================== Device Management ====================

    /// Gets the device management port.
    pub fn get_dm_port(&mut self) -> Result<u8> {
        let data = self.execute(CommandOpcode::GetDmPort, &[])?;
        parse_u8("DM port", &data)
    }

    /// Sets the device management port.
    pub fn set_dm_port(&mut self, port: u8) -> Result<()> {
        self.execute_unit(CommandOpcode::SetDmPort, &[port])
    }

    /// Gets the device management reporting interval.
    pub fn get_dm_interval(&mut self) -> Result<Duration> {
        let data = self.execute(CommandOpcode::GetDmInfoInterval, &[])?;
        parse_u8("DM interval", &data).map(IntervalUnit::decode)
    }

    /// Sets the device management reporting interval as `value` units.
    ///
    /// `value` must be at most 63.
    pub fn set_dm_interval(&mut self, value: u8, unit: IntervalUnit) -> Result<()> {
        if value > IntervalUnit::MAX_VALUE {
            return Err(Error::validation(format!(
                "interval value {value} out of range (0-63)"
            )));
        }
        self.execute_unit(CommandOpcode::SetDmInfoInterval, &[unit.encode(value)])
    }

    /// Sets the reporting interval in seconds, picking the coarsest unit
    /// that keeps the value in range.
    pub fn set_dm_interval_secs(&mut self, secs: u64) -> Result<()> {
        let (value, unit) = IntervalUnit::for_seconds(secs);
        let value = u8::try_from(value)
            .ok()
            .filter(|v| *v <= IntervalUnit::MAX_VALUE)
            .ok_or_else(|| Error::validation(format!("interval of {secs}s out of range")))?;
        self.set_dm_interval(value, unit)
    }

    /// Gets the device management info fields.
    pub fn get_dm_fields(&mut self) -> Result<Bytes> {
        self.execute(CommandOpcode::GetDmInfoFields, &[])
    }

    /// Sets the device management info fields.
    pub fn set_dm_fields(&mut self, fields: &[u8]) -> Result<()> {
        self.execute_unit(CommandOpcode::SetDmInfoFields, fields)
    }

    /// Sends a device management report with the given fields now.
    pub fn send_dm_status(&mut self, fields: &[u8]) -> Result<()> {
        self.execute_unit(CommandOpcode::SendDmStatus, fields)
    }

    /// Sets the application status (exactly 8 bytes).
    pub fn set_app_status(&mut self, status: &[u8]) -> Result<()> {
        check_len("appstatus", status, APP_STATUS_LEN)?;
        self.execute_unit(CommandOpcode::SetAppStatus, status)
    }

    // ==================== Link Control ====================

    /// Starts joining the network. A `Joined` or `JoinFail` event follows.
    pub fn join(&mut self) -> Result<()> {
        self.execute_unit(CommandOpcode::Join, &[])
    }

    /// Leaves the network.
    pub fn leave(&mut self) -> Result<()> {
        self.execute_unit(CommandOpcode::LeaveNetwork, &[])
    }

    /// Suspends (`true`) or resumes (`false`) radio communication.
    pub fn suspend(&mut self, suspend: bool) -> Result<()> {
        self.execute_unit(CommandOpcode::SuspendModemComm, &[u8::from(suspend)])
    }

    /// Gets the maximum payload size of the next uplink.
    pub fn max_payload(&mut self) -> Result<u8> {
        let data = self.execute(CommandOpcode::GetNextTxMaxPayload, &[])?;
        parse_u8("max payload", &data)
    }

    /// Queues an uplink. A `TxDone` event follows.
    pub fn request_tx(&mut self, port: u8, payload: &[u8], confirmed: bool) -> Result<()> {
        let data = port_flag(port, confirmed, payload);
        self.execute_unit(CommandOpcode::RequestTx, &data)
    }

    /// Queues an uplink ahead of any pending traffic.
    pub fn emergency_tx(&mut self, port: u8, payload: &[u8], confirmed: bool) -> Result<()> {
        let data = port_flag(port, confirmed, payload);
        self.execute_unit(CommandOpcode::EmergencyTx, &data)
    }

    // ==================== File Upload ====================

    /// Starts a file upload session.
    pub fn upload_init(&mut self, port: u8, encrypted: bool, size: u16, delay: u16) -> Result<()> {
        let mut buf = BytesMut::with_capacity(6);
        buf.put_u8(port);
        buf.put_u8(u8::from(encrypted));
        buf.put_u16(size);
        buf.put_u16(delay);
        self.execute_unit(CommandOpcode::UploadInit, &buf)
    }

    /// Uploads one chunk of file data.
    pub fn upload_data(&mut self, chunk: &[u8]) -> Result<()> {
        self.execute_unit(CommandOpcode::UploadData, chunk)
    }

    /// Finishes the upload with the CRC-32 of the whole file.
    pub fn upload_start(&mut self, crc: u32) -> Result<()> {
        self.execute_unit(CommandOpcode::UploadStart, &crc.to_be_bytes())
    }

    /// Uploads a whole file: init, 128-byte chunks, then start.
    ///
    /// An `UploadDone` event follows once the transfer completes.
    pub fn upload(&mut self, port: u8, data: &[u8], encrypted: bool, delay: u16) -> Result<()> {
        let size = u16::try_from(data.len())
            .map_err(|_| Error::validation(format!("upload of {} bytes too large", data.len())))?;

        self.upload_init(port, encrypted, size, delay)?;
        for chunk in data.chunks(BLOCK_SIZE) {
            self.upload_data(chunk)?;
        }
        self.upload_start(crc32fast::hash(data))
    }

    // ==================== Streaming ====================

    /// Initialises a data stream on a port.
    pub fn stream_init(&mut self, port: u8, encrypted: bool) -> Result<()> {
        self.execute_unit(CommandOpcode::StreamInit, &[port, u8::from(encrypted)])
    }

    /// Adds a record to a data stream.
    pub fn stream_data(&mut self, port: u8, record: &[u8]) -> Result<()> {
        let mut buf = BytesMut::with_capacity(1 + record.len());
        buf.put_u8(port);
        buf.put_slice(record);
        self.execute_unit(CommandOpcode::SendStreamData, &buf)
    }

    /// Gets the buffer state of a data stream.
    pub fn stream_status(&mut self, port: u8) -> Result<StreamStatus> {
        let data = self.execute(CommandOpcode::StreamStatus, &[port])?;
        parse_stream_status(&data)
    }

    // ==================== Firmware Update ====================

    /// Sends one firmware update block.
    ///
    /// Every block but the last must be exactly 128 bytes; the last may be
    /// shorter.
    pub fn firmware_update(&mut self, block_no: u16, block_count: u16, block: &[u8]) -> Result<()> {
        if block_no >= block_count {
            return Err(Error::validation(format!(
                "block {block_no} out of range (count {block_count})"
            )));
        }
        let is_last = block_no == block_count - 1;
        if block.len() > BLOCK_SIZE || (!is_last && block.len() != BLOCK_SIZE) {
            return Err(Error::validation(format!(
                "block size must be {BLOCK_SIZE} for all but the last block, got {}",
                block.len()
            )));
        }

        let mut buf = BytesMut::with_capacity(4 + block.len());
        buf.put_u16(block_no);
        buf.put_u16(block_count);
        buf.put_slice(block);
        self.execute_unit(CommandOpcode::FirmwareUpdate, &buf)
    }

    /// Sends a whole firmware image in 128-byte blocks.
    pub fn update_firmware(&mut self, image: &[u8]) -> Result<()> {
        let block_count = u16::try_from(image.len().div_ceil(BLOCK_SIZE))
            .map_err(|_| Error::validation("firmware image too large"))?;

        for (block_no, block) in (0..block_count).zip(image.chunks(BLOCK_SIZE)) {
            tracing::debug!("firmware block {}/{}", block_no + 1, block_count);
            self.firmware_update(block_no, block_count, block)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ResultCode;
    use crate::transport::{HandshakeConfig, MockTransport};

    fn modem() -> Modem<MockTransport> {
        Modem::with_handshake(
            MockTransport::new(),
            HandshakeConfig::default().settle_delay(Duration::ZERO),
        )
    }

    /// Payload of the only request sent.
    fn sent(modem: &Modem<MockTransport>) -> (u8, Vec<u8>) {
        let frames = modem.transport().request_frames();
        assert_eq!(frames.len(), 1, "expected exactly one request");
        let frame = frames[0].clone().unwrap();
        (frame.code, frame.payload.to_vec())
    }

    #[test]
    fn test_set_dev_eui() {
        let mut modem = modem();
        modem.transport_mut().push_ok(&[]);
        modem.set_dev_eui(&[1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        assert_eq!(sent(&modem), (0x13, vec![1, 2, 3, 4, 5, 6, 7, 8]));
    }

    #[test]
    fn test_set_dev_eui_wrong_length_no_traffic() {
        let mut modem = modem();
        for len in [7, 9] {
            let err = modem.set_dev_eui(&vec![0u8; len]).unwrap_err();
            assert!(matches!(err, Error::Validation { .. }));
        }
        assert!(modem.transport().written().is_empty());
        assert!(modem.transport().line_changes().is_empty());
    }

    #[test]
    fn test_set_nwk_key_length() {
        let mut modem = modem();
        assert!(matches!(
            modem.set_nwk_key(&[0u8; 15]),
            Err(Error::Validation { .. })
        ));
        modem.transport_mut().push_ok(&[]);
        modem.set_nwk_key(&[0xAB; 16]).unwrap();
        assert_eq!(sent(&modem), (0x14, vec![0xAB; 16]));
    }

    #[test]
    fn test_get_version() {
        let mut modem = modem();
        modem
            .transport_mut()
            .push_ok(&[0, 0, 0, 1, 0x00, 0x01, 0x02, 0x03, 0x01, 0x03]);
        let version = modem.get_version().unwrap();
        assert_eq!(version.bootloader, 1);
        assert_eq!(version.firmware, 0x0001_0203);
        assert_eq!(version.lorawan_version(), (1, 0, 3));
    }

    #[test]
    fn test_get_dev_eui() {
        let mut modem = modem();
        modem.transport_mut().push_ok(&[0xAA; 8]);
        assert_eq!(modem.get_dev_eui().unwrap(), Eui::new([0xAA; 8]));
    }

    #[test]
    fn test_adr_profile_validation() {
        let mut modem = modem();
        assert!(modem
            .set_adr_profile(AdrProfile::MobileLongRange, &[0u8; 16])
            .is_err());
        assert!(modem.set_adr_profile(AdrProfile::Custom, &[]).is_err());
        assert!(modem.set_adr_profile(AdrProfile::Custom, &[0u8; 15]).is_err());
        assert!(modem.transport().written().is_empty());

        modem.transport_mut().push_ok(&[]);
        modem.set_adr_profile(AdrProfile::Custom, &[5u8; 16]).unwrap();
        let (code, payload) = sent(&modem);
        assert_eq!(code, 0x1C);
        assert_eq!(payload[0], 3);
        assert_eq!(payload.len(), 17);
    }

    #[test]
    fn test_adr_profile_predefined() {
        let mut modem = modem();
        modem.transport_mut().push_ok(&[]);
        modem
            .set_adr_profile(AdrProfile::MobileLowPower, &[])
            .unwrap();
        assert_eq!(sent(&modem), (0x1C, vec![2]));
    }

    #[test]
    fn test_dm_interval() {
        let mut modem = modem();
        assert!(modem.set_dm_interval(64, IntervalUnit::Seconds).is_err());

        modem.transport_mut().push_ok(&[]);
        modem.set_dm_interval_secs(900).unwrap();
        assert_eq!(sent(&modem), (0x20, vec![0xC0 | 15]));

        modem.transport_mut().push_ok(&[0x82]);
        assert_eq!(modem.get_dm_interval().unwrap(), Duration::from_secs(7_200));
    }

    #[test]
    fn test_dm_interval_secs_out_of_range() {
        let mut modem = modem();
        assert!(modem.set_dm_interval_secs(64 * 86_400).is_err());
        assert!(modem.transport().written().is_empty());
    }

    #[test]
    fn test_request_tx() {
        let mut modem = modem();
        modem.transport_mut().push_ok(&[]);
        modem.request_tx(2, b"hi", true).unwrap();
        assert_eq!(sent(&modem), (0x29, vec![2, 1, b'h', b'i']));
    }

    #[test]
    fn test_emergency_tx() {
        let mut modem = modem();
        modem.transport_mut().push_ok(&[]);
        modem.emergency_tx(7, &[0xFF], false).unwrap();
        assert_eq!(sent(&modem), (0x2A, vec![7, 0, 0xFF]));
    }

    #[test]
    fn test_get_trace_empty() {
        let mut modem = modem();
        modem.transport_mut().push_ok(&[]);
        assert_eq!(modem.get_trace().unwrap(), None);
        modem.transport_mut().push_ok(&[0x12]);
        assert_eq!(modem.get_trace().unwrap().as_deref(), Some(&[0x12][..]));
    }

    #[test]
    fn test_get_status() {
        let mut modem = modem();
        modem.transport_mut().push_ok(&[0x08]);
        assert!(modem.get_status().unwrap().contains(ModemStatus::JOINED));
    }

    #[test]
    fn test_list_regions() {
        let mut modem = modem();
        modem.transport_mut().push_ok(&[1, 3]);
        assert_eq!(
            modem.list_regions().unwrap(),
            vec![Region::Eu868, Region::Us915]
        );
    }

    #[test]
    fn test_set_multicast() {
        let mut modem = modem();
        assert!(modem.set_multicast(1, &[0u8; 16], &[0u8; 8], 0).is_err());

        modem.transport_mut().push_ok(&[]);
        modem
            .set_multicast(0x0102_0304, &[0x11; 16], &[0x22; 16], 9)
            .unwrap();
        let (code, payload) = sent(&modem);
        assert_eq!(code, 0x17);
        assert_eq!(payload.len(), 40);
        assert_eq!(&payload[..4], &[1, 2, 3, 4]);
        assert_eq!(&payload[36..], &[0, 0, 0, 9]);
    }

    #[test]
    fn test_set_app_status_length() {
        let mut modem = modem();
        assert!(modem.set_app_status(&[0u8; 7]).is_err());
        assert!(modem.transport().written().is_empty());
    }

    #[test]
    fn test_firmware_update_validation() {
        let mut modem = modem();
        assert!(modem.firmware_update(2, 2, &[0u8; 128]).is_err());
        assert!(modem.firmware_update(0, 2, &[0u8; 100]).is_err());
        assert!(modem.firmware_update(1, 2, &[0u8; 129]).is_err());
        assert!(modem.transport().written().is_empty());

        modem.transport_mut().push_ok(&[]);
        modem.firmware_update(1, 2, &[0u8; 100]).unwrap();
        let (code, payload) = sent(&modem);
        assert_eq!(code, 0x09);
        assert_eq!(&payload[..4], &[0, 1, 0, 2]);
        assert_eq!(payload.len(), 104);
    }

    #[test]
    fn test_update_firmware_blocks() {
        let mut modem = modem();
        for _ in 0..3 {
            modem.transport_mut().push_ok(&[]);
        }
        modem.update_firmware(&[0x5A; 300]).unwrap();

        let frames = modem.transport().request_frames();
        assert_eq!(frames.len(), 3);
        let sizes: Vec<usize> = frames
            .iter()
            .map(|f| f.as_ref().unwrap().payload.len() - 4)
            .collect();
        assert_eq!(sizes, vec![128, 128, 44]);
    }

    #[test]
    fn test_upload() {
        let data = vec![0x42u8; 200];
        let mut modem = modem();
        for _ in 0..4 {
            modem.transport_mut().push_ok(&[]);
        }
        modem.upload(5, &data, false, 10).unwrap();

        let frames: Vec<_> = modem
            .transport()
            .request_frames()
            .into_iter()
            .map(Option::unwrap)
            .collect();
        assert_eq!(frames.len(), 4);
        assert_eq!(frames[0].code, 0x2B);
        assert_eq!(&frames[0].payload[..], &[5, 0, 0, 200, 0, 10]);
        assert_eq!(frames[1].payload.len(), 128);
        assert_eq!(frames[2].payload.len(), 72);
        assert_eq!(frames[3].code, 0x2D);
        assert_eq!(&frames[3].payload[..], &crc32fast::hash(&data).to_be_bytes());
    }

    #[test]
    fn test_upload_stops_on_error() {
        let mut modem = modem();
        modem.transport_mut().push_response(ResultCode::Busy, &[]);
        let err = modem.upload(5, &[0u8; 10], true, 0).unwrap_err();
        assert!(matches!(err, Error::Command(ResultCode::Busy)));
        assert_eq!(modem.transport().requests().len(), 1);
    }

    #[test]
    fn test_stream_status() {
        let mut modem = modem();
        modem.transport_mut().push_ok(&[0, 4, 0, 200]);
        let status = modem.stream_status(3).unwrap();
        assert_eq!(status, StreamStatus { pending: 4, free: 200 });
        assert_eq!(sent(&modem), (0x30, vec![3]));
    }

    #[test]
    fn test_tx_power_offset() {
        let mut modem = modem();
        modem.transport_mut().push_ok(&[0xFE]);
        assert_eq!(modem.get_tx_power_offset().unwrap(), -2);
    }

    #[test]
    fn test_malformed_ok_payload() {
        let mut modem = modem();
        modem.transport_mut().push_ok(&[0x01, 0x02]);
        assert!(matches!(modem.get_charge(), Err(Error::Protocol { .. })));
    }
}
