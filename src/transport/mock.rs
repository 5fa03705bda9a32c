//! In-memory transport for tests and simulation.
//!
//! `MockTransport` replays scripted response bytes and records every
//! control-line change and written byte, so the command client and the
//! application can be exercised without hardware.

use std::collections::VecDeque;

use crate::error::{Error, Result};
use crate::protocol::{Frame, ResultCode, decode_frame, encode_frame};
use crate::transport::Transport;

/// Scripted transport.
#[derive(Debug, Default)]
pub struct MockTransport {
    rx: VecDeque<u8>,
    written: Vec<u8>,
    requests: Vec<Vec<u8>>,
    line_changes: Vec<bool>,
    command_line: bool,
    busy_polls: usize,
    stuck_busy: bool,
}

impl MockTransport {
    /// Creates an idle transport with nothing queued.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a well-formed response frame.
    pub fn push_response(&mut self, code: ResultCode, payload: &[u8]) {
        self.push_raw(&encode_frame(code.into(), payload));
    }

    /// Queues an OK response with the given payload.
    pub fn push_ok(&mut self, payload: &[u8]) {
        self.push_response(ResultCode::Ok, payload);
    }

    /// Queues a `GetEvent` response carrying an event.
    pub fn push_event(&mut self, event_type: u8, count: u8, data: &[u8]) {
        let mut payload = Vec::with_capacity(2 + data.len());
        payload.push(event_type);
        payload.push(count);
        payload.extend_from_slice(data);
        self.push_ok(&payload);
    }

    /// Queues a `GetEvent` response with no pending event.
    pub fn push_no_event(&mut self) {
        self.push_ok(&[]);
    }

    /// Queues raw bytes, valid or not.
    pub fn push_raw(&mut self, bytes: &[u8]) {
        self.rx.extend(bytes);
    }

    /// Number of queued bytes not yet read.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.rx.len()
    }

    /// Keeps BUSY set for the next `polls` checks.
    pub fn set_busy_polls(&mut self, polls: usize) {
        self.busy_polls = polls;
    }

    /// Remaining polls before BUSY clears.
    #[must_use]
    pub const fn busy_polls_remaining(&self) -> usize {
        self.busy_polls
    }

    /// Keeps BUSY set indefinitely.
    pub fn set_stuck_busy(&mut self, stuck: bool) {
        self.stuck_busy = stuck;
    }

    /// All bytes written so far.
    #[must_use]
    pub fn written(&self) -> &[u8] {
        &self.written
    }

    /// The bytes of each individual write.
    #[must_use]
    pub fn requests(&self) -> &[Vec<u8>] {
        &self.requests
    }

    /// Each write decoded as a frame, or `None` if it was not one.
    #[must_use]
    pub fn request_frames(&self) -> Vec<Option<Frame>> {
        self.requests.iter().map(|r| decode_frame(r)).collect()
    }

    /// Every COMMAND line transition, in order.
    #[must_use]
    pub fn line_changes(&self) -> &[bool] {
        &self.line_changes
    }

    /// Current COMMAND line state.
    #[must_use]
    pub const fn command_line(&self) -> bool {
        self.command_line
    }

    /// Forgets recorded writes and line changes.
    pub fn clear_history(&mut self) {
        self.written.clear();
        self.requests.clear();
        self.line_changes.clear();
    }
}

impl Transport for MockTransport {
    fn set_command_line(&mut self, asserted: bool) -> Result<()> {
        self.command_line = asserted;
        self.line_changes.push(asserted);
        Ok(())
    }

    fn is_busy(&mut self) -> Result<bool> {
        if self.stuck_busy {
            return Ok(true);
        }
        if self.busy_polls > 0 {
            self.busy_polls -= 1;
            return Ok(true);
        }
        Ok(false)
    }

    fn write(&mut self, data: &[u8]) -> Result<()> {
        if !self.command_line {
            return Err(Error::Io(std::io::Error::other(
                "write without COMMAND asserted",
            )));
        }
        self.written.extend_from_slice(data);
        self.requests.push(data.to_vec());
        Ok(())
    }

    fn read_byte(&mut self) -> Result<Option<u8>> {
        Ok(self.rx.pop_front())
    }
}
