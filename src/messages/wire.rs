//! Per-message wire codecs
//!
//! Every message implements [`WireMessage`]: a fixed wire length, a
//! decode/encode pair, and an optional parity declaration. The codecs all
//! follow one pattern - validate the frame shell, then read or write
//! fixed-offset fields with the toolkit primitives - so the router and
//! tests can treat all message types uniformly.

use crate::config::version;
use crate::protocol::codec::{
    self, Direction, ParityScheme, ParitySpec, ProtocolError, Result,
};

use super::types::{
    AckReply, AckStatus, MessageType, MoveRequest, SetLedRequest, StatusQuery, StatusReply,
    StopRequest, VersionQuery, VersionReply,
};

/// Generic codec contract shared by every message type.
pub trait WireMessage: Sized {
    /// Type byte at offset 1
    const TYPE: MessageType;
    /// Selects the header/tail sentinel pair
    const DIRECTION: Direction;
    /// Exact frame length on the wire
    const WIRE_LEN: usize;
    /// Parity declaration; `None` for messages without a parity byte
    const PARITY: Option<ParitySpec> = None;

    /// Decode a frame into a message struct.
    ///
    /// Fails with `Arg` when the buffer is shorter than [`Self::WIRE_LEN`],
    /// `Frame` when the header, tail, or type byte does not match. Parity
    /// is deliberately not verified here; callers that care use
    /// [`Self::check_parity`].
    fn decode(buf: &[u8]) -> Result<Self>;

    /// Encode the message into `buf`, returning the bytes written.
    ///
    /// Fails with `Arg` when `buf` is shorter than [`Self::WIRE_LEN`];
    /// value-range correctness is the caller's responsibility. The parity
    /// byte (where declared) is stamped, so the output is transmit-ready.
    fn encode(&self, buf: &mut [u8]) -> Result<usize>;

    /// Validate the frame shell: length, header, tail, and type byte.
    fn validate(buf: &[u8]) -> Result<()> {
        if buf.len() < Self::WIRE_LEN {
            return Err(ProtocolError::Arg);
        }
        if buf[0] != Self::DIRECTION.header()
            || buf[Self::WIRE_LEN - 1] != Self::DIRECTION.tail()
            || buf[1] != Self::TYPE as u8
        {
            return Err(ProtocolError::Frame);
        }
        Ok(())
    }

    /// Write header, type, and tail into `buf`.
    fn write_shell(buf: &mut [u8]) -> Result<()> {
        if buf.len() < Self::WIRE_LEN {
            return Err(ProtocolError::Arg);
        }
        buf[0] = Self::DIRECTION.header();
        buf[1] = Self::TYPE as u8;
        buf[Self::WIRE_LEN - 1] = Self::DIRECTION.tail();
        Ok(())
    }

    /// Compute the parity value for an encoded frame; 0 when the message
    /// declares no parity.
    fn calculate_parity(buf: &[u8]) -> Result<u8> {
        match Self::PARITY {
            Some(spec) => {
                let reduced = codec::xor_over(buf, spec.last_index)?;
                Ok(match spec.scheme {
                    ParityScheme::Byte => reduced,
                    ParityScheme::Bit => codec::fold_to_bit(reduced),
                })
            }
            None => Ok(0),
        }
    }

    /// Stamp parity into an encoded frame; no-op when none is declared.
    fn set_parity(buf: &mut [u8]) -> Result<()> {
        match Self::PARITY {
            Some(spec) => codec::set_parity(buf, &spec),
            None => Ok(()),
        }
    }

    /// Verify parity of an encoded frame; always succeeds when none is
    /// declared.
    fn check_parity(buf: &[u8]) -> Result<()> {
        match Self::PARITY {
            Some(spec) => codec::check_parity(buf, &spec),
            None => Ok(()),
        }
    }
}

impl WireMessage for MoveRequest {
    const TYPE: MessageType = MessageType::Move;
    const DIRECTION: Direction = Direction::Request;
    const WIRE_LEN: usize = 10;
    const PARITY: Option<ParitySpec> = Some(ParitySpec {
        scheme: ParityScheme::Byte,
        last_index: 7,
        parity_index: 8,
    });

    fn decode(buf: &[u8]) -> Result<Self> {
        Self::validate(buf)?;
        Ok(Self {
            frame_id: buf[2],
            axis: buf[3],
            target_steps: codec::read_i32_be(buf, 4)?,
        })
    }

    fn encode(&self, buf: &mut [u8]) -> Result<usize> {
        Self::write_shell(buf)?;
        buf[2] = self.frame_id;
        buf[3] = self.axis;
        codec::write_i32_be(buf, 4, self.target_steps)?;
        Self::set_parity(&mut buf[..Self::WIRE_LEN])?;
        Ok(Self::WIRE_LEN)
    }
}

impl WireMessage for StopRequest {
    const TYPE: MessageType = MessageType::Stop;
    const DIRECTION: Direction = Direction::Request;
    const WIRE_LEN: usize = 4;

    fn decode(buf: &[u8]) -> Result<Self> {
        Self::validate(buf)?;
        Ok(Self { frame_id: buf[2] })
    }

    fn encode(&self, buf: &mut [u8]) -> Result<usize> {
        Self::write_shell(buf)?;
        buf[2] = self.frame_id;
        Ok(Self::WIRE_LEN)
    }
}

impl WireMessage for SetLedRequest {
    const TYPE: MessageType = MessageType::SetLed;
    const DIRECTION: Direction = Direction::Request;
    const WIRE_LEN: usize = 8;
    const PARITY: Option<ParitySpec> = Some(ParitySpec {
        scheme: ParityScheme::Bit,
        last_index: 5,
        parity_index: 6,
    });

    fn decode(buf: &[u8]) -> Result<Self> {
        Self::validate(buf)?;
        Ok(Self {
            frame_id: buf[2],
            red: buf[3],
            green: buf[4],
            blue: buf[5],
            // Mode shares byte 6 with the parity bit in its low bit
            mode: buf[6] >> 1,
        })
    }

    fn encode(&self, buf: &mut [u8]) -> Result<usize> {
        Self::write_shell(buf)?;
        buf[2] = self.frame_id;
        buf[3] = self.red;
        buf[4] = self.green;
        buf[5] = self.blue;
        buf[6] = self.mode << 1;
        Self::set_parity(&mut buf[..Self::WIRE_LEN])?;
        Ok(Self::WIRE_LEN)
    }
}

impl WireMessage for VersionQuery {
    const TYPE: MessageType = MessageType::VersionQuery;
    const DIRECTION: Direction = Direction::Request;
    const WIRE_LEN: usize = 4;

    fn decode(buf: &[u8]) -> Result<Self> {
        Self::validate(buf)?;
        Ok(Self { frame_id: buf[2] })
    }

    fn encode(&self, buf: &mut [u8]) -> Result<usize> {
        Self::write_shell(buf)?;
        buf[2] = self.frame_id;
        Ok(Self::WIRE_LEN)
    }
}

impl WireMessage for VersionReply {
    const TYPE: MessageType = MessageType::VersionReply;
    const DIRECTION: Direction = Direction::Response;
    const WIRE_LEN: usize = 8;
    const PARITY: Option<ParitySpec> = Some(ParitySpec {
        scheme: ParityScheme::Byte,
        last_index: 5,
        parity_index: 6,
    });

    fn decode(buf: &[u8]) -> Result<Self> {
        Self::validate(buf)?;
        Ok(Self {
            frame_id: buf[2],
            major: buf[3],
            minor: buf[4],
            patch: buf[5],
        })
    }

    fn encode(&self, buf: &mut [u8]) -> Result<usize> {
        Self::write_shell(buf)?;
        buf[2] = self.frame_id;
        buf[3] = self.major;
        buf[4] = self.minor;
        buf[5] = self.patch;
        Self::set_parity(&mut buf[..Self::WIRE_LEN])?;
        Ok(Self::WIRE_LEN)
    }
}

impl VersionReply {
    /// Reply carrying this firmware's version, echoing `frame_id`.
    pub fn current(frame_id: u8) -> Self {
        Self {
            frame_id,
            major: version::MAJOR,
            minor: version::MINOR,
            patch: version::PATCH,
        }
    }
}

impl WireMessage for StatusQuery {
    const TYPE: MessageType = MessageType::StatusQuery;
    const DIRECTION: Direction = Direction::Request;
    const WIRE_LEN: usize = 4;

    fn decode(buf: &[u8]) -> Result<Self> {
        Self::validate(buf)?;
        Ok(Self { frame_id: buf[2] })
    }

    fn encode(&self, buf: &mut [u8]) -> Result<usize> {
        Self::write_shell(buf)?;
        buf[2] = self.frame_id;
        Ok(Self::WIRE_LEN)
    }
}

impl WireMessage for StatusReply {
    const TYPE: MessageType = MessageType::StatusReply;
    const DIRECTION: Direction = Direction::Response;
    const WIRE_LEN: usize = 10;
    const PARITY: Option<ParitySpec> = Some(ParitySpec {
        scheme: ParityScheme::Byte,
        last_index: 7,
        parity_index: 8,
    });

    fn decode(buf: &[u8]) -> Result<Self> {
        Self::validate(buf)?;
        Ok(Self {
            frame_id: buf[2],
            state: buf[3],
            position_steps: codec::read_i32_be(buf, 4)?,
        })
    }

    fn encode(&self, buf: &mut [u8]) -> Result<usize> {
        Self::write_shell(buf)?;
        buf[2] = self.frame_id;
        buf[3] = self.state;
        codec::write_i32_be(buf, 4, self.position_steps)?;
        Self::set_parity(&mut buf[..Self::WIRE_LEN])?;
        Ok(Self::WIRE_LEN)
    }
}

impl WireMessage for AckReply {
    const TYPE: MessageType = MessageType::Ack;
    const DIRECTION: Direction = Direction::Response;
    const WIRE_LEN: usize = 6;

    fn decode(buf: &[u8]) -> Result<Self> {
        Self::validate(buf)?;
        let status = AckStatus::from_byte(buf[4]).ok_or(ProtocolError::Frame)?;
        Ok(Self {
            frame_id: buf[2],
            request_type: buf[3],
            status,
        })
    }

    fn encode(&self, buf: &mut [u8]) -> Result<usize> {
        Self::write_shell(buf)?;
        buf[2] = self.frame_id;
        buf[3] = self.request_type;
        buf[4] = self.status as u8;
        Ok(Self::WIRE_LEN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_roundtrip() {
        let msg = MoveRequest {
            frame_id: 0x07,
            axis: 2,
            target_steps: -1_500_000,
        };

        let mut buf = [0u8; MoveRequest::WIRE_LEN];
        let written = msg.encode(&mut buf).expect("Should encode");
        assert_eq!(written, 10);
        assert_eq!(buf[0], 0xAA);
        assert_eq!(buf[1], 0x01);
        assert_eq!(buf[9], 0x55);
        assert!(MoveRequest::check_parity(&buf).is_ok());

        let decoded = MoveRequest::decode(&buf).expect("Should decode");
        assert_eq!(decoded, msg);
    }

    #[test]
    fn test_stop_roundtrip() {
        let msg = StopRequest { frame_id: 0x42 };

        let mut buf = [0u8; StopRequest::WIRE_LEN];
        assert_eq!(msg.encode(&mut buf).unwrap(), 4);
        assert_eq!(buf, [0xAA, 0x02, 0x42, 0x55]);

        assert_eq!(StopRequest::decode(&buf).unwrap(), msg);
        // No parity declared: accessors are no-ops
        assert!(StopRequest::check_parity(&buf).is_ok());
        assert_eq!(StopRequest::calculate_parity(&buf).unwrap(), 0);
    }

    #[test]
    fn test_set_led_roundtrip() {
        let msg = SetLedRequest {
            frame_id: 0x11,
            red: 0xFF,
            green: 0x80,
            blue: 0x01,
            mode: 0x05,
        };

        let mut buf = [0u8; SetLedRequest::WIRE_LEN];
        msg.encode(&mut buf).expect("Should encode");
        assert_eq!(buf[6] >> 1, 0x05, "mode in the upper bits of byte 6");
        assert!(SetLedRequest::check_parity(&buf).is_ok());

        let decoded = SetLedRequest::decode(&buf).expect("Should decode");
        assert_eq!(decoded, msg);
    }

    #[test]
    fn test_set_led_bit_parity_flip() {
        let msg = SetLedRequest {
            frame_id: 0x11,
            red: 0x10,
            green: 0x20,
            blue: 0x30,
            mode: 0x00,
        };

        let mut buf = [0u8; SetLedRequest::WIRE_LEN];
        msg.encode(&mut buf).unwrap();

        buf[3] ^= 0x04;
        assert_eq!(
            SetLedRequest::check_parity(&buf),
            Err(ProtocolError::Parity)
        );
    }

    #[test]
    fn test_version_reply_exact_bytes() {
        let msg = VersionReply::current(0xAA);

        let mut buf = [0u8; VersionReply::WIRE_LEN];
        msg.encode(&mut buf).expect("Should encode");

        // 0x04 ^ 0xAA ^ 0x00 ^ 0x03 ^ 0x00 = 0xAD
        assert_eq!(buf, [0xAB, 0x04, 0xAA, 0x00, 0x03, 0x00, 0xAD, 0x54]);
        assert!(VersionReply::check_parity(&buf).is_ok());
        assert_eq!(VersionReply::calculate_parity(&buf).unwrap(), 0xAD);

        let decoded = VersionReply::decode(&buf).expect("Should decode");
        assert_eq!(decoded, msg);
    }

    #[test]
    fn test_status_roundtrip() {
        let query = StatusQuery { frame_id: 0x09 };
        let mut qbuf = [0u8; StatusQuery::WIRE_LEN];
        query.encode(&mut qbuf).unwrap();
        assert_eq!(qbuf, [0xAA, 0x07, 0x09, 0x55]);

        let reply = StatusReply {
            frame_id: 0x09,
            state: 0x01,
            position_steps: 123_456,
        };
        let mut rbuf = [0u8; StatusReply::WIRE_LEN];
        reply.encode(&mut rbuf).unwrap();
        assert_eq!(rbuf[0], 0xAB);
        assert_eq!(rbuf[9], 0x54);
        assert_eq!(StatusReply::decode(&rbuf).unwrap(), reply);
    }

    #[test]
    fn test_ack_roundtrip() {
        let msg = AckReply {
            frame_id: 0x33,
            request_type: MessageType::Stop as u8,
            status: AckStatus::Ok,
        };

        let mut buf = [0u8; AckReply::WIRE_LEN];
        msg.encode(&mut buf).unwrap();
        assert_eq!(buf, [0xAB, 0x08, 0x33, 0x02, 0x00, 0x54]);
        assert_eq!(AckReply::decode(&buf).unwrap(), msg);
    }

    #[test]
    fn test_decode_short_buffer() {
        assert_eq!(
            MoveRequest::decode(&[0xAA, 0x01, 0x07]),
            Err(ProtocolError::Arg)
        );
    }

    #[test]
    fn test_decode_wrong_type() {
        let msg = StopRequest { frame_id: 0x01 };
        let mut buf = [0u8; StopRequest::WIRE_LEN];
        msg.encode(&mut buf).unwrap();

        assert_eq!(VersionQuery::decode(&buf), Err(ProtocolError::Frame));
    }

    #[test]
    fn test_decode_wrong_sentinels() {
        // Request sentinels on a response schema
        let buf = [0xAA, 0x04, 0xAA, 0x00, 0x03, 0x00, 0xAD, 0x55];
        assert_eq!(VersionReply::decode(&buf), Err(ProtocolError::Frame));
    }

    #[test]
    fn test_encode_short_buffer() {
        let msg = MoveRequest {
            frame_id: 0,
            axis: 0,
            target_steps: 0,
        };
        let mut buf = [0u8; 6];
        assert_eq!(msg.encode(&mut buf), Err(ProtocolError::Arg));
    }

    #[test]
    fn test_decode_ignores_corrupt_parity() {
        // Decode does not verify parity; only the accessor raises Parity
        let mut buf = [0u8; VersionReply::WIRE_LEN];
        VersionReply::current(0x01).encode(&mut buf).unwrap();
        buf[6] ^= 0xFF;

        assert!(VersionReply::decode(&buf).is_ok());
        assert_eq!(
            VersionReply::check_parity(&buf),
            Err(ProtocolError::Parity)
        );
    }
}
