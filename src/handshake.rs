//! Handshake coordinator
//!
//! SPI gives the slave no independent interrupt line, so every transaction
//! the master clocks must read back something meaningful: a uniform READY
//! or BUSY pattern when nothing is pending, or a queued response frame.
//! The coordinator classifies each transaction and fills the transmit
//! buffer accordingly. It holds no persistent state; every call is a pure
//! function of its inputs.

use crate::config::handshake::{BUSY, READY};

/// Classification of one prepared transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionState {
    /// No response pending; buffer filled with the READY status
    Ready,
    /// Queue at capacity; buffer filled with the BUSY status
    Busy,
    /// A response frame was placed at the front of the buffer
    Response,
    /// A precondition was violated; buffer filled with the supplied byte
    /// as a fallback. Callers must treat this as an error to log or count.
    Unrecognized,
}

/// Result of preparing one transmit buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionOutcome {
    pub state: TransactionState,
    /// True when the supplied response frame was copied out and the caller
    /// may release it
    pub consumed: bool,
}

impl TransactionOutcome {
    fn new(state: TransactionState, consumed: bool) -> Self {
        Self { state, consumed }
    }
}

/// Decides READY/BUSY/RESPONSE for each transaction the master initiates.
pub struct HandshakeCoordinator {
    queue_capacity: usize,
}

impl HandshakeCoordinator {
    /// Create a coordinator advertising BUSY at `queue_capacity` queued
    /// frames.
    pub fn new(queue_capacity: usize) -> Self {
        Self { queue_capacity }
    }

    /// Status byte to advertise for the given queue occupancy.
    pub fn status_for(&self, queued: usize) -> u8 {
        if queued >= self.queue_capacity {
            BUSY
        } else {
            READY
        }
    }

    /// Prepare the transmit buffer for one transaction.
    ///
    /// With no response, the buffer is filled end to end with `status` so
    /// the master reads a uniform idle pattern however much it clocks. A
    /// response that fits is copied to the front and the remainder padded
    /// with `status`. Any precondition violation (empty buffer, unknown
    /// status byte, response longer than the buffer) degrades to
    /// [`TransactionState::Unrecognized`] with a uniform fill of the
    /// supplied byte - the bus always carries a well-formed pattern, but
    /// nothing is consumed.
    pub fn prepare(
        &self,
        status: u8,
        tx: &mut [u8],
        response: Option<&[u8]>,
    ) -> TransactionOutcome {
        tx.fill(status);

        if tx.is_empty() {
            log::debug!("handshake: empty transmit buffer");
            return TransactionOutcome::new(TransactionState::Unrecognized, false);
        }
        if status != READY && status != BUSY {
            log::debug!("handshake: invalid status byte {status:#04x}");
            return TransactionOutcome::new(TransactionState::Unrecognized, false);
        }

        match response {
            Some(frame) if !frame.is_empty() => {
                if frame.len() > tx.len() {
                    log::debug!(
                        "handshake: {}-byte response exceeds {}-byte buffer",
                        frame.len(),
                        tx.len()
                    );
                    return TransactionOutcome::new(TransactionState::Unrecognized, false);
                }
                tx[..frame.len()].copy_from_slice(frame);
                TransactionOutcome::new(TransactionState::Response, true)
            }
            Some(_) => TransactionOutcome::new(TransactionState::Unrecognized, false),
            None => {
                let state = if status == BUSY {
                    TransactionState::Busy
                } else {
                    TransactionState::Ready
                };
                TransactionOutcome::new(state, false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::handshake::CLIENT_POLL;

    fn coordinator() -> HandshakeCoordinator {
        HandshakeCoordinator::new(8)
    }

    #[test]
    fn test_status_busy_iff_at_capacity() {
        let hs = coordinator();
        assert_eq!(hs.status_for(0), READY);
        assert_eq!(hs.status_for(7), READY);
        assert_eq!(hs.status_for(8), BUSY);
        assert_eq!(hs.status_for(9), BUSY);
    }

    #[test]
    fn test_ready_fills_whole_buffer() {
        let hs = coordinator();
        let mut tx = [0u8; 16];

        let outcome = hs.prepare(READY, &mut tx, None);
        assert_eq!(outcome.state, TransactionState::Ready);
        assert!(!outcome.consumed);
        assert!(tx.iter().all(|&b| b == READY));
    }

    #[test]
    fn test_busy_fills_whole_buffer() {
        let hs = coordinator();
        let mut tx = [0u8; 16];

        let outcome = hs.prepare(BUSY, &mut tx, None);
        assert_eq!(outcome.state, TransactionState::Busy);
        assert!(!outcome.consumed);
        assert!(tx.iter().all(|&b| b == BUSY));
    }

    #[test]
    fn test_response_copied_and_padded() {
        let hs = coordinator();
        let frame = [0xAB, 0x04, 0xAA, 0x00, 0x03, 0x00, 0xAD, 0x54];
        let mut tx = [0u8; 16];

        let outcome = hs.prepare(READY, &mut tx, Some(&frame));
        assert_eq!(outcome.state, TransactionState::Response);
        assert!(outcome.consumed);
        assert_eq!(&tx[..8], &frame);
        assert!(tx[8..].iter().all(|&b| b == READY));
    }

    #[test]
    fn test_response_with_busy_status_pads_busy() {
        let hs = coordinator();
        let frame = [0xAB, 0x08, 0x01, 0x02, 0x00, 0x54];
        let mut tx = [0u8; 10];

        let outcome = hs.prepare(BUSY, &mut tx, Some(&frame));
        assert_eq!(outcome.state, TransactionState::Response);
        assert!(outcome.consumed);
        assert_eq!(&tx[..6], &frame);
        assert!(tx[6..].iter().all(|&b| b == BUSY));
    }

    #[test]
    fn test_response_exactly_filling_buffer() {
        let hs = coordinator();
        let frame = [0xAB, 0x08, 0x01, 0x02, 0x00, 0x54];
        let mut tx = [0u8; 6];

        let outcome = hs.prepare(READY, &mut tx, Some(&frame));
        assert_eq!(outcome.state, TransactionState::Response);
        assert_eq!(&tx, &frame);
    }

    #[test]
    fn test_oversized_response_degrades_but_fills() {
        let hs = coordinator();
        let frame = [0xAB, 0x04, 0xAA, 0x00, 0x03, 0x00, 0xAD, 0x54];
        let mut tx = [0u8; 4];

        let outcome = hs.prepare(READY, &mut tx, Some(&frame));
        assert_eq!(outcome.state, TransactionState::Unrecognized);
        assert!(!outcome.consumed, "frame must not be treated as sent");
        assert!(
            tx.iter().all(|&b| b == READY),
            "no byte may be left uninitialized"
        );
    }

    #[test]
    fn test_poll_sentinel_is_not_a_status() {
        let hs = coordinator();
        let mut tx = [0u8; 8];

        let outcome = hs.prepare(CLIENT_POLL, &mut tx, None);
        assert_eq!(outcome.state, TransactionState::Unrecognized);
        assert!(!outcome.consumed);
        assert!(tx.iter().all(|&b| b == CLIENT_POLL));
    }

    #[test]
    fn test_empty_buffer_unrecognized() {
        let hs = coordinator();
        let mut tx = [0u8; 0];

        let outcome = hs.prepare(READY, &mut tx, None);
        assert_eq!(outcome.state, TransactionState::Unrecognized);
        assert!(!outcome.consumed);
    }

    #[test]
    fn test_empty_response_unrecognized() {
        let hs = coordinator();
        let mut tx = [0u8; 8];

        let outcome = hs.prepare(READY, &mut tx, Some(&[]));
        assert_eq!(outcome.state, TransactionState::Unrecognized);
        assert!(!outcome.consumed);
        assert!(tx.iter().all(|&b| b == READY));
    }
}
