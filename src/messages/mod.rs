//! Message schemas for the SPI link
//!
//! # Frame format
//!
//! Every message travels in one frame:
//! ```text
//! [header][type][payload...][parity?][tail]
//! ```
//!
//! - `header`/`tail`: direction sentinels - `0xAA`/`0x55` for requests,
//!   `0xAB`/`0x54` for responses
//! - `type`: selects the message schema; all field offsets are implied by
//!   it (no length prefix, no tags)
//! - `frameId`: always the first payload byte (offset 2), caller-assigned,
//!   echoed by responses for correlation
//! - multi-byte integers are big-endian
//! - `parity` (where a schema declares one): XOR over bytes
//!   `[1, last_index]`, stored whole or folded to the low bit of a shared
//!   byte, at a fixed index before the tail

pub mod types;
pub mod wire;
