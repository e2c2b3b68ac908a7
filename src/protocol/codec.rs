//! Frame codec toolkit
//!
//! Shared primitives every message codec is built on: big-endian field
//! access at fixed offsets, XOR parity in its byte and single-bit forms,
//! and header/tail validation for both frame directions.

use crate::config::frame::{
    MIN_FRAME_LEN, PARITY_START, REQUEST_HEADER, REQUEST_TAIL, RESPONSE_HEADER, RESPONSE_TAIL,
};

/// Protocol error taxonomy
///
/// Every fallible operation in the crate reports one of these. They are
/// local, recoverable signals; nothing in the core aborts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolError {
    /// Absent buffer, zero length, or a length too short for the operation
    Arg,
    /// Header, tail, or type byte does not match the expected frame shape
    Frame,
    /// Storage could not be obtained (response queue at capacity)
    Alloc,
    /// Destination too small for the data it must receive
    Range,
    /// XOR parity mismatch over the covered byte range
    Parity,
}

pub type Result<T> = core::result::Result<T, ProtocolError>;

/// Which way a frame travels; selects its header/tail sentinel pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Host -> controller
    Request,
    /// Controller -> host
    Response,
}

impl Direction {
    pub const fn header(self) -> u8 {
        match self {
            Direction::Request => REQUEST_HEADER,
            Direction::Response => RESPONSE_HEADER,
        }
    }

    pub const fn tail(self) -> u8 {
        match self {
            Direction::Request => REQUEST_TAIL,
            Direction::Response => RESPONSE_TAIL,
        }
    }
}

/// Validate header, tail, and minimum length of a complete frame.
///
/// Returns `Arg` for a buffer shorter than the minimum frame, `Frame` when
/// either sentinel is wrong. The type byte is the caller's concern.
pub fn validate_frame(buf: &[u8], direction: Direction) -> Result<()> {
    if buf.len() < MIN_FRAME_LEN {
        return Err(ProtocolError::Arg);
    }
    if buf[0] != direction.header() || buf[buf.len() - 1] != direction.tail() {
        return Err(ProtocolError::Frame);
    }
    Ok(())
}

/// Read a big-endian u16 at a fixed offset.
pub fn read_u16_be(buf: &[u8], offset: usize) -> Result<u16> {
    if offset + 2 > buf.len() {
        return Err(ProtocolError::Arg);
    }
    Ok(u16::from_be_bytes([buf[offset], buf[offset + 1]]))
}

/// Read a big-endian i32 at a fixed offset.
pub fn read_i32_be(buf: &[u8], offset: usize) -> Result<i32> {
    if offset + 4 > buf.len() {
        return Err(ProtocolError::Arg);
    }
    Ok(i32::from_be_bytes([
        buf[offset],
        buf[offset + 1],
        buf[offset + 2],
        buf[offset + 3],
    ]))
}

/// Write a big-endian u16 at a fixed offset.
pub fn write_u16_be(buf: &mut [u8], offset: usize, value: u16) -> Result<()> {
    if offset + 2 > buf.len() {
        return Err(ProtocolError::Arg);
    }
    buf[offset..offset + 2].copy_from_slice(&value.to_be_bytes());
    Ok(())
}

/// Write a big-endian i32 at a fixed offset.
pub fn write_i32_be(buf: &mut [u8], offset: usize, value: i32) -> Result<()> {
    if offset + 4 > buf.len() {
        return Err(ProtocolError::Arg);
    }
    buf[offset..offset + 4].copy_from_slice(&value.to_be_bytes());
    Ok(())
}

/// How a message stores its parity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParityScheme {
    /// Full XOR reduction stored as a dedicated byte
    Byte,
    /// XOR reduction folded to one bit, kept in the low bit of a byte
    /// whose upper bits carry other payload
    Bit,
}

/// Per-message parity description, fixed at design time.
///
/// Coverage always runs from the type byte (index 1) through `last_index`
/// inclusive; `parity_index` is strictly after `last_index` and before
/// the tail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParitySpec {
    pub scheme: ParityScheme,
    pub last_index: usize,
    pub parity_index: usize,
}

/// XOR-reduce the covered range `[PARITY_START, last_index]`.
pub fn xor_over(buf: &[u8], last_index: usize) -> Result<u8> {
    if last_index >= buf.len() || last_index < PARITY_START {
        return Err(ProtocolError::Arg);
    }
    Ok(buf[PARITY_START..=last_index].iter().fold(0, |acc, b| acc ^ b))
}

/// Fold a byte to its single-bit XOR parity by successive halving.
pub fn fold_to_bit(mut byte: u8) -> u8 {
    byte ^= byte >> 4;
    byte ^= byte >> 2;
    byte ^= byte >> 1;
    byte & 0x01
}

/// Stamp the parity described by `spec` into `buf`.
///
/// The bit scheme preserves the upper seven bits of the parity byte.
pub fn set_parity(buf: &mut [u8], spec: &ParitySpec) -> Result<()> {
    if spec.parity_index >= buf.len() || spec.parity_index <= spec.last_index {
        return Err(ProtocolError::Arg);
    }
    let reduced = xor_over(buf, spec.last_index)?;
    match spec.scheme {
        ParityScheme::Byte => buf[spec.parity_index] = reduced,
        ParityScheme::Bit => {
            buf[spec.parity_index] = (buf[spec.parity_index] & !0x01) | fold_to_bit(reduced);
        }
    }
    Ok(())
}

/// Verify the parity described by `spec`; `Parity` on mismatch.
pub fn check_parity(buf: &[u8], spec: &ParitySpec) -> Result<()> {
    if spec.parity_index >= buf.len() || spec.parity_index <= spec.last_index {
        return Err(ProtocolError::Arg);
    }
    let reduced = xor_over(buf, spec.last_index)?;
    let ok = match spec.scheme {
        ParityScheme::Byte => buf[spec.parity_index] == reduced,
        ParityScheme::Bit => buf[spec.parity_index] & 0x01 == fold_to_bit(reduced),
    };
    if ok {
        Ok(())
    } else {
        Err(ProtocolError::Parity)
    }
}
