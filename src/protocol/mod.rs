//! Frame-level protocol building blocks: codec toolkit and byte-stream framing.

pub mod codec;
pub mod framing;

pub use codec::{ProtocolError, Result};
