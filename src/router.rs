//! Frame router
//!
//! Converts the inbound byte stream - delivered in arbitrary chunks as DMA
//! half/full transfers complete - into dispatched, validated request
//! frames. The router performs no decoding itself; it synchronizes on the
//! frame sentinels and routes on the type byte. Handlers decode via the
//! message codecs and push any response they owe onto the response queue.
//!
//! The handler table is owned by the router instance and injected at
//! construction, so independent routers (one per bus, or per test) can
//! coexist. Routing is deliberately permissive: unregistered and unknown
//! type bytes are ignored so unrecognized or future message types never
//! stall the bus.
//!
//! Not reentrant: `feed` must only run from one execution context (the
//! receive-completion path), which `&mut self` enforces at compile time.

use crate::messages::types::MessageType;
use crate::protocol::codec::{ProtocolError, Result};
use crate::protocol::framing::FrameAccumulator;
use heapless::LinearMap;

/// Most handler slots a table can hold; one per known message type with
/// room to spare.
pub const MAX_HANDLERS: usize = 16;

/// Per-type handler callback.
///
/// Receives the shared context (services plus response queue) and the
/// complete validated frame, header through tail.
pub type Handler<C> = fn(&mut C, &[u8]);

/// Registration table mapping message types to handler callbacks.
pub struct HandlerTable<C> {
    slots: LinearMap<u8, Handler<C>, MAX_HANDLERS>,
}

impl<C> HandlerTable<C> {
    /// Create an empty table; every type starts unregistered.
    pub fn new() -> Self {
        Self {
            slots: LinearMap::new(),
        }
    }

    /// Register `handler` for `message_type`, replacing any previous one.
    ///
    /// Fails with `Alloc` if the table is out of slots.
    pub fn register(&mut self, message_type: MessageType, handler: Handler<C>) -> Result<()> {
        self.slots
            .insert(message_type as u8, handler)
            .map(|_| ())
            .map_err(|_| ProtocolError::Alloc)
    }

    fn lookup(&self, type_byte: u8) -> Option<Handler<C>> {
        self.slots.get(&type_byte).copied()
    }
}

impl<C> Default for HandlerTable<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Byte-stream synchronizer and dispatcher for inbound request frames.
pub struct FrameRouter<C> {
    accumulator: FrameAccumulator,
    handlers: HandlerTable<C>,
}

impl<C> FrameRouter<C> {
    /// Create a router around an already-populated handler table.
    pub fn new(handlers: HandlerTable<C>) -> Self {
        Self {
            accumulator: FrameAccumulator::new(),
            handlers,
        }
    }

    /// Feed an inbound chunk, dispatching every frame that completes.
    ///
    /// Chunks may split frames at any byte boundary. Returns the number of
    /// frames dispatched to a registered handler.
    pub fn feed(&mut self, chunk: &[u8], ctx: &mut C) -> usize {
        let mut dispatched = 0;
        for &byte in chunk {
            if let Some(frame) = self.accumulator.push(byte) {
                if self.dispatch(&frame, ctx) {
                    dispatched += 1;
                }
            }
        }
        dispatched
    }

    /// Drop any partially accumulated frame.
    pub fn resync(&mut self) {
        self.accumulator.reset();
    }

    fn dispatch(&self, frame: &[u8], ctx: &mut C) -> bool {
        let type_byte = frame[1];
        if MessageType::from_byte(type_byte).is_none() {
            log::trace!("ignoring frame with unknown type {type_byte:#04x}");
            return false;
        }
        match self.handlers.lookup(type_byte) {
            Some(handler) => {
                handler(ctx, frame);
                true
            }
            None => {
                log::trace!("no handler registered for type {type_byte:#04x}");
                false
            }
        }
    }
}
