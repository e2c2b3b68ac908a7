//! Message type ids and payload structs
//!
//! # Message set
//!
//! | ID   | Message      | Dir | Payload                                   |
//! |------|--------------|-----|-------------------------------------------|
//! | 0x01 | Move         | req | frameId, axis, target steps (i32 BE)      |
//! | 0x02 | Stop         | req | frameId                                   |
//! | 0x03 | SetLed       | req | frameId, r, g, b, mode                    |
//! | 0x04 | VersionReply | rsp | frameId, major, minor, patch              |
//! | 0x05 | VersionQuery | req | frameId                                   |
//! | 0x06 | StatusReply  | rsp | frameId, state, position steps (i32 BE)   |
//! | 0x07 | StatusQuery  | req | frameId                                   |
//! | 0x08 | Ack          | rsp | frameId, request type, status             |

/// Message type ids carried in the frame's type byte (offset 1)
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    /// Move one axis to an absolute step target (0x01)
    Move = 0x01,

    /// Halt all motion immediately (0x02)
    Stop = 0x02,

    /// Set the status LED colour and blink mode (0x03)
    SetLed = 0x03,

    /// Firmware version response (0x04)
    VersionReply = 0x04,

    /// Firmware version request (0x05)
    VersionQuery = 0x05,

    /// Axis status response (0x06)
    StatusReply = 0x06,

    /// Axis status request (0x07)
    StatusQuery = 0x07,

    /// Generic acknowledgement response (0x08)
    Ack = 0x08,
}

impl MessageType {
    /// Try to convert a raw type byte to a MessageType
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x01 => Some(Self::Move),
            0x02 => Some(Self::Stop),
            0x03 => Some(Self::SetLed),
            0x04 => Some(Self::VersionReply),
            0x05 => Some(Self::VersionQuery),
            0x06 => Some(Self::StatusReply),
            0x07 => Some(Self::StatusQuery),
            0x08 => Some(Self::Ack),
            _ => None,
        }
    }
}

/// Status codes carried by [`AckReply`]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AckStatus {
    /// Request accepted and executed (0x00)
    Ok = 0x00,

    /// Request was well-formed but could not be executed (0x01)
    Rejected = 0x01,

    /// Request failed its parity check (0x02)
    ParityError = 0x02,
}

impl AckStatus {
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x00 => Some(Self::Ok),
            0x01 => Some(Self::Rejected),
            0x02 => Some(Self::ParityError),
            _ => None,
        }
    }
}

/// Move one axis to an absolute target position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRequest {
    pub frame_id: u8,
    pub axis: u8,
    /// Absolute target in motor steps
    pub target_steps: i32,
}

/// Halt all motion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopRequest {
    pub frame_id: u8,
}

/// Set the status LED colour and blink mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetLedRequest {
    pub frame_id: u8,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    /// Blink mode, 7 bits; shares its wire byte with the parity bit
    pub mode: u8,
}

/// Firmware version request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionQuery {
    pub frame_id: u8,
}

/// Firmware version response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionReply {
    pub frame_id: u8,
    pub major: u8,
    pub minor: u8,
    pub patch: u8,
}

/// Axis status request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusQuery {
    pub frame_id: u8,
}

/// Axis status response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusReply {
    pub frame_id: u8,
    /// Controller state byte (idle/moving/fault, service-defined)
    pub state: u8,
    /// Current position in motor steps
    pub position_steps: i32,
}

/// Generic acknowledgement for requests without a dedicated reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AckReply {
    pub frame_id: u8,
    /// Type byte of the request being acknowledged
    pub request_type: u8,
    pub status: AckStatus,
}
