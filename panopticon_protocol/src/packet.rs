use crate::Result;
use binrw::{binrw, BinWrite};
use std::{
    io::Cursor,
    sync::atomic::{AtomicU32, Ordering},
};

/// Payload type tag, the first header field of a [ViscaPacket].
///
/// ## Format
///
/// A big-endian `u16`: `0x0100` for a command, `0x0110` for an inquiry.
#[binrw]
#[brw(big)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadType {
    #[brw(magic = 0x0100u16)]
    Command,
    #[brw(magic = 0x0110u16)]
    Inquiry,
}

/// [ViscaPacket] is the unit of communication with VISCA-over-IP cameras.
/// One packet is carried per UDP datagram.
///
/// ## Packet format
///
/// All fields big-endian:
///
/// * `u16`: [payload type][Self::payload_type]
/// * `u16`: payload length in bytes
/// * `u32`: [sequence number][Self::sequence]
/// * [payload][Self::payload]: device-native VISCA bytes, `0x81 .. 0xFF`
///
/// The length field is computed at write time and never stored. The read
/// path exists for tests and wire debugging; the client never parses
/// camera replies.
#[binrw]
#[brw(big)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViscaPacket {
    pub payload_type: PayloadType,

    #[br(temp)]
    #[bw(try_calc(u16::try_from(payload.len())))]
    length: u16,

    /// Sequence number, pre-incremented by [SequenceCounter] for every
    /// message sent, probes included.
    pub sequence: u32,

    #[br(count = length)]
    pub payload: Vec<u8>,
}

impl ViscaPacket {
    /// Header length in bytes.
    pub const HEADER_LENGTH: usize = 8;

    /// Builds a command packet.
    pub fn command(sequence: u32, payload: Vec<u8>) -> Self {
        Self {
            payload_type: PayloadType::Command,
            sequence,
            payload,
        }
    }

    /// Builds an inquiry packet.
    pub fn inquiry(sequence: u32, payload: Vec<u8>) -> Self {
        Self {
            payload_type: PayloadType::Inquiry,
            sequence,
            payload,
        }
    }

    /// Serialises the packet into datagram bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Cursor::new(Vec::with_capacity(Self::HEADER_LENGTH + self.payload.len()));
        self.write(&mut out)?;
        let out = out.into_inner();
        trace!(">>> {}", hex::encode(&out));
        Ok(out)
    }
}

/// Message sequence counter, one per client instance.
///
/// `next()` pre-increments: the first message of a connection carries
/// sequence 1. The counter wraps from `u32::MAX` to 0 rather than faulting,
/// and is never reset while the client stays up.
#[derive(Debug, Default)]
pub struct SequenceCounter(AtomicU32);

impl SequenceCounter {
    pub const fn new() -> Self {
        Self(AtomicU32::new(0))
    }

    /// Takes the next sequence number.
    pub fn next(&self) -> u32 {
        self.0.fetch_add(1, Ordering::SeqCst).wrapping_add(1)
    }
}
