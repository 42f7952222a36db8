use std::iter::FusedIterator;
use std::ops::ControlFlow;

use super::reader::{LegacyFormat, read_list_header};
use crate::containers::common::driver::{DecodeStatus, RecordCursor, drive};
use crate::containers::common::error::DecodeError;
use crate::containers::common::limits::Limits;

/// A legacy packet list: byte-length packets with the legacy padding rule.
///
/// The list borrows its bytes; the caller keeps the buffer alive for as long
/// as the list or any packet view is in use.
#[derive(Debug, Clone, Copy)]
pub struct LegacyPacketList<'a> {
    records: &'a [u8],
    count: u32,
}

impl<'a> LegacyPacketList<'a> {
    /// Wrap a record region (no list header) with a caller-supplied count.
    pub fn new(records: &'a [u8], count: u16) -> Self {
        Self {
            records,
            count: u32::from(count),
        }
    }

    /// Parse a full dump: a `u32` packet count followed by the packets.
    pub fn parse(buf: &'a [u8]) -> Result<Self, DecodeError> {
        Self::parse_with_limits(buf, &Limits::legacy())
    }

    pub fn parse_with_limits(buf: &'a [u8], limits: &Limits) -> Result<Self, DecodeError> {
        let (count, records) = read_list_header(buf)?;
        limits.check_count(count)?;
        Ok(Self { records, count })
    }

    pub fn declared_count(&self) -> u32 {
        self.count
    }

    /// The record region, excluding any list header.
    pub fn records(&self) -> &'a [u8] {
        self.records
    }

    /// Lazily decode packets in order. Iteration ends after the declared
    /// count or after the first malformed packet.
    pub fn packets(&self) -> LegacyPackets<'a> {
        LegacyPackets {
            cursor: RecordCursor::new(self.records, self.count),
        }
    }

    /// Visit each packet in order until the list is exhausted or the visitor
    /// returns [`ControlFlow::Break`].
    ///
    /// The visitor only sees a packet for the duration of the call.
    ///
    /// # Examples
    /// ```
    /// use std::ops::ControlFlow;
    ///
    /// use midilist_core::containers::legacy::{LegacyListBuilder, LegacyPacketList};
    /// use midilist_core::DecodeStatus;
    ///
    /// let mut builder = LegacyListBuilder::new();
    /// builder.push(100, &[0x90, 0x40, 0x7F])?.push(200, &[])?;
    /// let bytes = builder.finish();
    ///
    /// let list = LegacyPacketList::parse(&bytes)?;
    /// let mut timestamps = Vec::new();
    /// let status = list.for_each(|packet| {
    ///     timestamps.push(packet.timestamp());
    ///     ControlFlow::Continue(())
    /// })?;
    /// assert_eq!(status, DecodeStatus::Completed { visited: 2 });
    /// assert_eq!(timestamps, [100, 200]);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn for_each<V>(&self, mut visitor: V) -> Result<DecodeStatus, DecodeError>
    where
        V: FnMut(LegacyPacket<'_>) -> ControlFlow<()>,
    {
        drive(self.packets(), |packet| visitor(packet))
    }
}

/// Read-only view of one legacy packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegacyPacket<'a> {
    timestamp: u64,
    data: &'a [u8],
}

impl<'a> LegacyPacket<'a> {
    pub(crate) fn new(timestamp: u64, data: &'a [u8]) -> Self {
        Self { timestamp, data }
    }

    /// Opaque host timestamp; its unit belongs to the producer.
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Declared payload length in bytes.
    pub fn len(&self) -> u16 {
        // The payload was sliced using a 16-bit length field.
        self.data.len() as u16
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }
}

/// Iterator returned by [`LegacyPacketList::packets`].
pub struct LegacyPackets<'a> {
    cursor: RecordCursor<'a, LegacyFormat>,
}

impl<'a> Iterator for LegacyPackets<'a> {
    type Item = Result<LegacyPacket<'a>, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.cursor.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.cursor.size_hint()
    }
}

impl FusedIterator for LegacyPackets<'_> {}
