use std::fmt;
use std::iter::FusedIterator;
use std::ops::ControlFlow;

use super::layout;
use super::reader::{UniversalFormat, read_list_header};
use super::words::Words;
use crate::containers::common::driver::{DecodeStatus, RecordCursor, drive};
use crate::containers::common::error::DecodeError;
use crate::containers::common::limits::Limits;

/// Protocol declared in a universal list header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiProtocol {
    Midi1,
    Midi2,
    /// Unrecognised protocol id, kept verbatim.
    Other(u32),
}

impl MidiProtocol {
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            layout::PROTOCOL_MIDI_1_0 => Self::Midi1,
            layout::PROTOCOL_MIDI_2_0 => Self::Midi2,
            other => Self::Other(other),
        }
    }

    pub fn raw(&self) -> u32 {
        match self {
            Self::Midi1 => layout::PROTOCOL_MIDI_1_0,
            Self::Midi2 => layout::PROTOCOL_MIDI_2_0,
            Self::Other(raw) => *raw,
        }
    }
}

impl fmt::Display for MidiProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Midi1 => write!(f, "midi-1.0"),
            Self::Midi2 => write!(f, "midi-2.0"),
            Self::Other(raw) => write!(f, "unknown({raw})"),
        }
    }
}

/// A universal event list: word-count packets, naturally word-aligned.
#[derive(Debug, Clone, Copy)]
pub struct UniversalEventList<'a> {
    protocol: MidiProtocol,
    records: &'a [u8],
    count: u32,
}

impl<'a> UniversalEventList<'a> {
    /// Wrap a record region (no list header) with a caller-supplied count.
    pub fn new(records: &'a [u8], count: u32, protocol: MidiProtocol) -> Self {
        Self {
            protocol,
            records,
            count,
        }
    }

    /// Parse a full dump: `u32` protocol, `u32` packet count, then packets.
    pub fn parse(buf: &'a [u8]) -> Result<Self, DecodeError> {
        Self::parse_with_limits(buf, &Limits::universal())
    }

    pub fn parse_with_limits(buf: &'a [u8], limits: &Limits) -> Result<Self, DecodeError> {
        let header = read_list_header(buf)?;
        limits.check_count(header.count)?;
        Ok(Self {
            protocol: header.protocol,
            records: header.records,
            count: header.count,
        })
    }

    pub fn protocol(&self) -> MidiProtocol {
        self.protocol
    }

    pub fn declared_count(&self) -> u32 {
        self.count
    }

    pub fn records(&self) -> &'a [u8] {
        self.records
    }

    pub fn packets(&self) -> UniversalPackets<'a> {
        UniversalPackets {
            cursor: RecordCursor::new(self.records, self.count),
        }
    }

    /// Visit each packet in order until the list is exhausted or the visitor
    /// returns [`ControlFlow::Break`].
    pub fn for_each<V>(&self, mut visitor: V) -> Result<DecodeStatus, DecodeError>
    where
        V: FnMut(UniversalPacket<'_>) -> ControlFlow<()>,
    {
        drive(self.packets(), |packet| visitor(packet))
    }
}

/// Read-only view of one universal packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniversalPacket<'a> {
    timestamp: u64,
    words: Words<'a>,
}

impl<'a> UniversalPacket<'a> {
    pub(crate) fn new(timestamp: u64, words: Words<'a>) -> Self {
        Self { timestamp, words }
    }

    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Declared payload length in 32-bit words.
    pub fn word_count(&self) -> u32 {
        // The payload was sliced from a 32-bit word count.
        self.words.len() as u32
    }

    pub fn words(&self) -> Words<'a> {
        self.words
    }
}

/// Iterator returned by [`UniversalEventList::packets`].
pub struct UniversalPackets<'a> {
    cursor: RecordCursor<'a, UniversalFormat>,
}

impl<'a> Iterator for UniversalPackets<'a> {
    type Item = Result<UniversalPacket<'a>, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.cursor.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.cursor.size_hint()
    }
}

impl FusedIterator for UniversalPackets<'_> {}
