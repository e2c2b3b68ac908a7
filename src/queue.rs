//! Outbound response queue
//!
//! A bounded FIFO of already-encoded response frames, written by service
//! handlers and drained by the transmit path. Frames are copied in on push
//! and copied out on pop; the queue exclusively owns its frames in between.
//!
//! The queue is a fixed-capacity ring rather than a per-frame heap
//! allocation, so `Alloc` here means the ring is full - sustained
//! backpressure from producers outpacing the poll loop.

use crate::config::frame::MAX_FRAME_SIZE;
use crate::config::queue::RESPONSE_QUEUE_CAPACITY;
use crate::protocol::codec::{ProtocolError, Result};
use heapless::{Deque, Vec};

/// FIFO of encoded response frames awaiting transmission.
pub struct ResponseQueue {
    frames: Deque<Vec<u8, MAX_FRAME_SIZE>, RESPONSE_QUEUE_CAPACITY>,
}

impl ResponseQueue {
    /// Create a new empty queue.
    pub fn new() -> Self {
        Self {
            frames: Deque::new(),
        }
    }

    /// Copy `frame` into owned storage and append it.
    ///
    /// Fails with `Arg` for an empty frame or one larger than
    /// [`MAX_FRAME_SIZE`], `Alloc` when the queue is at capacity.
    pub fn push(&mut self, frame: &[u8]) -> Result<()> {
        if frame.is_empty() {
            return Err(ProtocolError::Arg);
        }
        let owned = Vec::from_slice(frame).map_err(|_| ProtocolError::Arg)?;
        self.frames.push_back(owned).map_err(|_| {
            log::warn!(
                "response queue full ({} frames), dropping {}-byte frame",
                RESPONSE_QUEUE_CAPACITY,
                frame.len()
            );
            ProtocolError::Alloc
        })
    }

    /// Remove the oldest frame, copying it into `dest`.
    ///
    /// Returns the frame length, or `Ok(0)` when the queue is empty -
    /// an ordinary state the poll loop observes every cycle. If the front
    /// frame exceeds `dest`, it stays queued and `Range` is reported so
    /// the caller can retry with a larger buffer.
    pub fn pop(&mut self, dest: &mut [u8]) -> Result<usize> {
        let len = match self.frames.front() {
            Some(front) => front.len(),
            None => return Ok(0),
        };
        if len > dest.len() {
            return Err(ProtocolError::Range);
        }
        // Front exists and fits; now it can be consumed
        let frame = self.frames.pop_front().ok_or(ProtocolError::Arg)?;
        dest[..len].copy_from_slice(&frame);
        Ok(len)
    }

    /// Number of queued frames. O(1).
    pub fn count(&self) -> usize {
        self.frames.len()
    }

    /// Configured maximum number of queued frames.
    pub fn capacity(&self) -> usize {
        RESPONSE_QUEUE_CAPACITY
    }

    /// Returns true when no frames are queued.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl Default for ResponseQueue {
    fn default() -> Self {
        Self::new()
    }
}
