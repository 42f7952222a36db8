use std::ops::Range;

// List header.
pub const PROTOCOL_RANGE: Range<usize> = 0..4;
pub const COUNT_RANGE: Range<usize> = 4..8;
pub const LIST_HEADER_LEN: usize = 8;

// Packet header, relative to the start of each packet.
pub const TIMESTAMP_RANGE: Range<usize> = 0..8;
pub const WORD_COUNT_RANGE: Range<usize> = 8..12;
pub const PACKET_HEADER_LEN: usize = 12;

pub const WORD_LEN: usize = 4;

pub const PROTOCOL_MIDI_1_0: u32 = 1;
pub const PROTOCOL_MIDI_2_0: u32 = 2;

pub const MAX_PACKETS: u32 = u32::MAX;
