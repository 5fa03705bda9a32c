//! Symbolic names for protocol codes.
//!
//! Each table maps a wire code to the short upper-case name used in logs
//! and error messages.

/// A static `(code, name)` table.
pub type NameTable = &'static [(u8, &'static str)];

/// Command ids.
pub const COMMAND_NAMES: NameTable = &[
    (0x00, "GETEVENT"),
    (0x01, "GETVERSION"),
    (0x02, "RESET"),
    (0x03, "FACTORYRESET"),
    (0x04, "RESETCHARGE"),
    (0x05, "GETCHARGE"),
    (0x06, "GETTXPOWEROFFSET"),
    (0x07, "SETTXPOWEROFFSET"),
    (0x08, "TEST"),
    (0x09, "FIRMWAREUPDATE"),
    (0x0A, "GETTIME"),
    (0x0B, "GETSTATUS"),
    (0x0C, "SETALARM"),
    (0x0D, "GETTRACE"),
    (0x0E, "GETPIN"),
    (0x0F, "GETCHIPEUI"),
    (0x10, "GETJOINEUI"),
    (0x11, "SETJOINEUI"),
    (0x12, "GETDEVEUI"),
    (0x13, "SETDEVEUI"),
    (0x14, "SETNWKKEY"),
    (0x15, "GETCLASS"),
    (0x16, "SETCLASS"),
    (0x17, "SETMULTICAST"),
    (0x18, "GETREGION"),
    (0x19, "SETREGION"),
    (0x1A, "LISTREGIONS"),
    (0x1B, "GETADRPROFILE"),
    (0x1C, "SETADRPROFILE"),
    (0x1D, "GETDMPORT"),
    (0x1E, "SETDMPORT"),
    (0x1F, "GETDMINFOINTERVAL"),
    (0x20, "SETDMINFOINTERVAL"),
    (0x21, "GETDMINFOFIELDS"),
    (0x22, "SETDMINFOFIELDS"),
    (0x23, "SENDDMSTATUS"),
    (0x24, "SETAPPSTATUS"),
    (0x25, "JOIN"),
    (0x26, "LEAVENETWORK"),
    (0x27, "SUSPENDMODEMCOMM"),
    (0x28, "GETNEXTTXMAXPAYLOAD"),
    (0x29, "REQUESTTX"),
    (0x2A, "EMERGENCYTX"),
    (0x2B, "UPLOADINIT"),
    (0x2C, "UPLOADDATA"),
    (0x2D, "UPLOADSTART"),
    (0x2E, "STREAMINIT"),
    (0x2F, "SENDSTREAMDATA"),
    (0x30, "STREAMSTATUS"),
];

/// Response result codes.
pub const RESULT_NAMES: NameTable = &[
    (0x00, "OK"),
    (0x01, "UNKNOWN"),
    (0x02, "NOTIMPLEMENTED"),
    (0x03, "NOTINITIALIZED"),
    (0x04, "INVALID"),
    (0x05, "BUSY"),
    (0x06, "FAIL"),
    (0x07, "BADFMT"),
    (0x08, "BADCRC"),
    (0x09, "BADSIG"),
    (0x0A, "BADSIZE"),
    (0x0F, "FRAMEERROR"),
];

/// Event types.
pub const EVENT_NAMES: NameTable = &[
    (0x00, "RESET"),
    (0x01, "ALARM"),
    (0x02, "JOINED"),
    (0x03, "TXDONE"),
    (0x04, "DOWNDATA"),
    (0x05, "UPLOADDONE"),
    (0x06, "SETCONF"),
    (0x07, "MUTE"),
    (0x08, "STREAMDONE"),
    (0x09, "LINKSTATUS"),
    (0x0A, "JOINFAIL"),
];

/// ADR profiles.
pub const ADR_PROFILE_NAMES: NameTable = &[
    (0x00, "NETWORK_SERVER_CONTROLLED"),
    (0x01, "MOBILE_LONG_RANGE"),
    (0x02, "MOBILE_LOW_POWER"),
    (0x03, "CUSTOM"),
];

/// Status register bits.
pub const STATUS_NAMES: NameTable = &[
    (0x01, "BROWNOUT"),
    (0x02, "CRASH"),
    (0x04, "MUTE"),
    (0x08, "JOINED"),
    (0x10, "SUSPEND"),
    (0x20, "UPLOAD"),
    (0x40, "JOINING"),
    (0x80, "STREAM"),
];

/// Looks up the name of a code.
#[must_use]
pub fn name_of(table: NameTable, code: u8) -> Option<&'static str> {
    table
        .iter()
        .find(|(value, _)| *value == code)
        .map(|(_, name)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_lookup() {
        assert_eq!(name_of(COMMAND_NAMES, 0x25), Some("JOIN"));
        assert_eq!(name_of(RESULT_NAMES, 0x0F), Some("FRAMEERROR"));
        assert_eq!(name_of(EVENT_NAMES, 0x04), Some("DOWNDATA"));
        assert_eq!(name_of(EVENT_NAMES, 0x7F), None);
    }

    #[test]
    fn test_tables_have_unique_codes() {
        for table in [
            COMMAND_NAMES,
            RESULT_NAMES,
            EVENT_NAMES,
            ADR_PROFILE_NAMES,
            STATUS_NAMES,
        ] {
            let mut codes: Vec<u8> = table.iter().map(|(code, _)| *code).collect();
            codes.sort_unstable();
            codes.dedup();
            assert_eq!(codes.len(), table.len());
        }
    }
}
