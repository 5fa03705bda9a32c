//! Protocol definitions for modem communication.
//!
//! This module contains the low-level protocol types including:
//! - Frame encoding/decoding
//! - Command opcodes and result codes
//! - Symbolic name tables
//! - Binary response parsing

pub mod command;
pub mod frame;
pub mod names;
pub mod parser;
pub mod result;

pub use command::CommandOpcode;
pub use frame::{
    FRAME_OVERHEAD, Frame, FrameAssembler, MAX_PAYLOAD_SIZE, decode as decode_frame,
    encode as encode_frame, lrc,
};
pub use result::ResultCode;
