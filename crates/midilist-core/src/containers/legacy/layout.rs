use std::ops::Range;

// List header.
pub const COUNT_RANGE: Range<usize> = 0..4;
pub const LIST_HEADER_LEN: usize = 4;

// Packet header, relative to the start of each packet.
pub const TIMESTAMP_RANGE: Range<usize> = 0..8;
pub const LENGTH_RANGE: Range<usize> = 8..10;
pub const PACKET_HEADER_LEN: usize = 10;

pub const ALIGNMENT: usize = 4;

pub const MAX_PAYLOAD_LEN: usize = u16::MAX as usize;
pub const MAX_LIST_BYTES: usize = 65_536;
pub const MAX_PACKETS: u32 = u16::MAX as u32;
