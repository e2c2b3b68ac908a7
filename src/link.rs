//! Slave-side link glue
//!
//! Ties the router, response queue, and handshake coordinator together
//! into the two entry points the transport driver calls: [`SpiSlaveLink::feed`]
//! from the receive-completion path and [`SpiSlaveLink::poll`] from the
//! periodic transmit path. Both take `&mut self`, so the single-context
//! discipline of the bus (no overlapping invocations) is enforced by the
//! borrow checker on a threaded host as well.

use crate::config::frame::MAX_FRAME_SIZE;
use crate::config::queue::RESPONSE_QUEUE_CAPACITY;
use crate::handshake::{HandshakeCoordinator, TransactionOutcome, TransactionState};
use crate::queue::ResponseQueue;
use crate::router::{FrameRouter, HandlerTable};

/// Shared context handed to every handler: the outbound queue plus the
/// caller's service state.
pub struct LinkState<S> {
    pub queue: ResponseQueue,
    pub services: S,
}

/// One slave endpoint of the SPI command link.
pub struct SpiSlaveLink<S> {
    router: FrameRouter<LinkState<S>>,
    handshake: HandshakeCoordinator,
    state: LinkState<S>,
}

impl<S> SpiSlaveLink<S> {
    /// Create a link from a populated handler table and the service state
    /// handlers operate on.
    pub fn new(handlers: HandlerTable<LinkState<S>>, services: S) -> Self {
        Self {
            router: FrameRouter::new(handlers),
            handshake: HandshakeCoordinator::new(RESPONSE_QUEUE_CAPACITY),
            state: LinkState {
                queue: ResponseQueue::new(),
                services,
            },
        }
    }

    /// Feed an inbound chunk from the receive path.
    ///
    /// Handlers run synchronously here and may push responses onto the
    /// queue. Returns the number of frames dispatched.
    pub fn feed(&mut self, chunk: &[u8]) -> usize {
        self.router.feed(chunk, &mut self.state)
    }

    /// Prepare the transmit buffer for the next transaction.
    ///
    /// Advertises BUSY once the queue is at capacity, drains at most one
    /// queued response per call, and otherwise fills `tx` with the idle
    /// status pattern.
    pub fn poll(&mut self, tx: &mut [u8]) -> TransactionOutcome {
        let status = self.handshake.status_for(self.state.queue.count());

        let mut scratch = [0u8; MAX_FRAME_SIZE];
        let cap = tx.len().min(MAX_FRAME_SIZE);
        match self.state.queue.pop(&mut scratch[..cap]) {
            Ok(0) => self.handshake.prepare(status, tx, None),
            Ok(len) => self.handshake.prepare(status, tx, Some(&scratch[..len])),
            Err(err) => {
                // Front frame cannot fit this transmit buffer; it stays
                // queued, which points at a sizing bug in the caller.
                log::warn!("poll: queued response does not fit transmit buffer ({err:?})");
                tx.fill(status);
                TransactionOutcome {
                    state: TransactionState::Unrecognized,
                    consumed: false,
                }
            }
        }
    }

    /// Drop any partially accumulated inbound frame.
    pub fn resync(&mut self) {
        self.router.resync();
    }

    /// The outbound queue, for producers outside the handler path.
    pub fn queue_mut(&mut self) -> &mut ResponseQueue {
        &mut self.state.queue
    }

    pub fn queue(&self) -> &ResponseQueue {
        &self.state.queue
    }

    pub fn services(&self) -> &S {
        &self.state.services
    }

    pub fn services_mut(&mut self) -> &mut S {
        &mut self.state.services
    }
}
