//! Protocol constants for the host <-> motion controller SPI link

/// Frame sentinels and sizing
pub mod frame {
    /// First byte of every host -> controller frame
    pub const REQUEST_HEADER: u8 = 0xAA;

    /// Last byte of every host -> controller frame
    pub const REQUEST_TAIL: u8 = 0x55;

    /// First byte of every controller -> host frame
    pub const RESPONSE_HEADER: u8 = 0xAB;

    /// Last byte of every controller -> host frame
    pub const RESPONSE_TAIL: u8 = 0x54;

    /// Smallest legal frame: header + type + frame id + tail
    pub const MIN_FRAME_LEN: usize = 4;

    /// Accumulator capacity; a frame that does not close within this many
    /// bytes is considered malformed and dropped
    pub const MAX_FRAME_SIZE: usize = 64;

    /// Parity (where a message carries one) always covers bytes starting
    /// at the type byte
    pub const PARITY_START: usize = 1;
}

/// Handshake status bytes exchanged while no frame is in flight.
///
/// These must not collide with any frame header/tail sentinel or any
/// message type id in use.
pub mod handshake {
    /// Slave has room for more requests
    pub const READY: u8 = 0xCE;

    /// Slave's response queue is full; master should back off and re-poll
    pub const BUSY: u8 = 0xCF;

    /// Clocked out by the master while it waits for a non-poll reply.
    /// Never a valid slave status.
    pub const CLIENT_POLL: u8 = 0xCD;
}

/// Response queue sizing
pub mod queue {
    /// Maximum number of encoded response frames held between polls
    pub const RESPONSE_QUEUE_CAPACITY: usize = 8;
}

/// Firmware version reported by the version query
pub mod version {
    pub const MAJOR: u8 = 0;
    pub const MINOR: u8 = 3;
    pub const PATCH: u8 = 0;
}
