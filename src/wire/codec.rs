//! Line-delimited frame codec.
//!
//! Wire format:
//! ```text
//! ┌──────────────────────────┬────┐
//! │ JSON message (≤ 511 B)   │ \n │
//! └──────────────────────────┴────┘
//! ```
//!
//! The decoder accumulates incoming bytes into a fixed buffer and yields
//! complete lines.  This handles partial reads gracefully: a single
//! transport read may return part of a line, exactly one line, or
//! several lines concatenated.  Over-long lines are discarded up to the
//! next newline.

use heapless::Vec;
use log::warn;

use crate::error::{CodecError, Result};
use crate::events::Event;
use crate::telemetry::StatusSnapshot;

use super::messages::InboundFrame;

/// Maximum line length including the terminator (protects against memory exhaustion).
pub const MAX_LINE_LEN: usize = 512;

/// Decoder state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecoderState {
    /// Accumulating a line.
    Collecting,
    /// Current line overflowed; skipping to the next newline.
    Discarding,
}

/// Streaming line decoder.
pub struct LineDecoder {
    state: DecoderState,
    buf: Vec<u8, MAX_LINE_LEN>,
}

impl Default for LineDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl LineDecoder {
    pub fn new() -> Self {
        Self {
            state: DecoderState::Collecting,
            buf: Vec::new(),
        }
    }

    /// Feed bytes into the decoder.
    ///
    /// Calls `on_line` once per complete, non-empty line (without the
    /// `\n` or a trailing `\r`).  Every yielded line is shorter than
    /// [`MAX_LINE_LEN`].
    pub fn feed(&mut self, data: &[u8], mut on_line: impl FnMut(&[u8])) {
        for &byte in data {
            match self.state {
                DecoderState::Collecting => {
                    if byte == b'\n' {
                        let line = self.buf.strip_suffix(b"\r").unwrap_or(&self.buf);
                        if !line.is_empty() {
                            on_line(line);
                        }
                        self.buf.clear();
                    } else if self.buf.push(byte).is_err() {
                        warn!("Inbound line exceeds {} bytes, discarding", MAX_LINE_LEN);
                        self.buf.clear();
                        self.state = DecoderState::Discarding;
                    }
                }
                DecoderState::Discarding => {
                    if byte == b'\n' {
                        self.state = DecoderState::Collecting;
                    }
                }
            }
        }
    }

    /// Bytes buffered for the current incomplete line.
    pub fn pending(&self) -> usize {
        self.buf.len()
    }

    /// Reset decoder state (e.g. after a transport reconnect).
    pub fn reset(&mut self) {
        self.buf.clear();
        self.state = DecoderState::Collecting;
    }
}

/// Decode one line into a queue event.
pub fn decode_frame(line: &[u8], pass_token: &str) -> Result<Event> {
    let text = core::str::from_utf8(line).map_err(|_| CodecError::InvalidUtf8)?;
    let frame: InboundFrame = serde_json::from_str(text).map_err(|_| CodecError::Malformed)?;
    Ok(frame.into_event(pass_token))
}

/// Encode a snapshot as a single JSON line (without the terminator).
pub fn encode_snapshot_json(snapshot: &StatusSnapshot) -> Result<String> {
    serde_json::to_string(snapshot).map_err(|_| CodecError::EncodeFailed.into())
}

/// Compact binary encoding for bandwidth-constrained telemetry links.
pub fn encode_snapshot_compact(snapshot: &StatusSnapshot) -> Result<std::vec::Vec<u8>> {
    postcard::to_allocvec(snapshot).map_err(|_| CodecError::EncodeFailed.into())
}

/// Inverse of [`encode_snapshot_compact`].
pub fn decode_snapshot_compact(bytes: &[u8]) -> Result<StatusSnapshot> {
    postcard::from_bytes(bytes).map_err(|_| CodecError::Malformed.into())
}
