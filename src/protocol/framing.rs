//! Frame accumulator for the inbound SPI byte stream
//!
//! DMA half/full-transfer completions deliver bytes in arbitrary chunk
//! sizes, so frames arrive piecemeal. The accumulator buffers bytes until
//! a complete request frame closes, resynchronizing whenever the stream
//! does not start with the request header.

use crate::config::frame::{MAX_FRAME_SIZE, MIN_FRAME_LEN, REQUEST_HEADER, REQUEST_TAIL};
use heapless::Vec;

/// Accumulates incoming bytes and extracts complete request frames.
///
/// A frame spans from a leading [`REQUEST_HEADER`] to the first
/// [`REQUEST_TAIL`] at index 3 or later. Payload bytes at indices 1 and 2
/// (type and frame id) may legally equal the tail sentinel; they never
/// close a frame.
pub struct FrameAccumulator {
    buffer: Vec<u8, MAX_FRAME_SIZE>,
}

impl FrameAccumulator {
    /// Create a new empty frame accumulator.
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Push a byte into the accumulator.
    ///
    /// Returns `Some(frame)` when the byte closes a complete frame.
    /// Returns `None` while more bytes are needed; garbage that cannot
    /// start a frame is discarded silently.
    pub fn push(&mut self, byte: u8) -> Option<Vec<u8, MAX_FRAME_SIZE>> {
        if self.buffer.push(byte).is_err() {
            // No tail within capacity - the frame is malformed, drop it
            log::trace!("accumulator overflow, dropping {} bytes", self.buffer.len());
            self.buffer.clear();
            return None;
        }

        // Resynchronize: whatever we hold must begin with a request header
        if self.buffer[0] != REQUEST_HEADER {
            self.buffer.clear();
            return None;
        }

        if self.buffer.len() >= MIN_FRAME_LEN && byte == REQUEST_TAIL {
            let frame = core::mem::replace(&mut self.buffer, Vec::new());
            return Some(frame);
        }

        None
    }

    /// Reset the accumulator, discarding any partial frame.
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    /// Returns true if no partial frame is in progress.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns the current number of buffered bytes.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }
}

impl Default for FrameAccumulator {
    fn default() -> Self {
        Self::new()
    }
}
