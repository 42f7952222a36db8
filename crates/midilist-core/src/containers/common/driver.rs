//! Shared record walk used by both list variants.
//!
//! A variant only describes its record header, how many payload bytes the
//! header announces and how much padding follows the payload. The cursor owns
//! the offset arithmetic: every advance is checked before any byte is read and
//! a record is yielded only after its full payload has been validated.

use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ops::ControlFlow;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::error::{DecodeError, MalformedReason};
use super::reader::{ByteReader, OutOfBounds};

/// Outcome of a successful walk over a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DecodeStatus {
    /// Every declared record was visited.
    Completed { visited: u32 },
    /// The visitor asked to stop after `visited` records.
    Stopped { visited: u32 },
}

impl DecodeStatus {
    pub fn visited(&self) -> u32 {
        match self {
            Self::Completed { visited } | Self::Stopped { visited } => *visited,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}

/// Fixed fields common to every record header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RecordHeader {
    pub timestamp: u64,
    /// Raw length field, in the variant's own unit.
    pub length: u32,
}

pub(crate) trait RecordFormat {
    type View<'a>;

    const HEADER_LEN: usize;

    /// Decode the fixed header; `header` is exactly `HEADER_LEN` bytes.
    fn read_header(header: ByteReader<'_>) -> Result<RecordHeader, OutOfBounds>;

    /// Payload size in bytes for a raw length field, `None` if unrepresentable.
    fn payload_bytes(length: u32) -> Option<usize>;

    /// Bytes skipped between the end of a payload and the next record.
    fn padding(payload_bytes: usize) -> usize;

    fn view(header: RecordHeader, payload: &[u8]) -> Self::View<'_>;
}

/// Lazy walk over a record region with a declared record count.
///
/// The cursor fuses after the first malformed record.
pub(crate) struct RecordCursor<'a, F> {
    reader: ByteReader<'a>,
    offset: usize,
    index: u32,
    count: u32,
    halted: bool,
    format: PhantomData<fn() -> F>,
}

impl<'a, F: RecordFormat> RecordCursor<'a, F> {
    pub fn new(records: &'a [u8], count: u32) -> Self {
        Self {
            reader: ByteReader::new(records),
            offset: 0,
            index: 0,
            count,
            halted: false,
            format: PhantomData,
        }
    }

    fn advance(&mut self) -> Result<F::View<'a>, MalformedReason> {
        let offset = self.offset;
        let header = self
            .reader
            .read_slice_at(offset, F::HEADER_LEN)
            .and_then(|bytes| F::read_header(ByteReader::new(bytes)))
            .map_err(|_| MalformedReason::TruncatedHeader {
                offset,
                needed: F::HEADER_LEN,
                available: self.reader.remaining_from(offset),
            })?;

        let payload_offset = offset
            .checked_add(F::HEADER_LEN)
            .ok_or(MalformedReason::OffsetOverflow { offset })?;
        let length =
            F::payload_bytes(header.length).ok_or(MalformedReason::OffsetOverflow { offset })?;
        let payload = self
            .reader
            .read_slice_at(payload_offset, length)
            .map_err(|_| MalformedReason::TruncatedPayload {
                offset: payload_offset,
                length,
                available: self.reader.remaining_from(payload_offset),
            })?;

        // The payload fits, so its end is within the buffer; padding may not be.
        self.offset = (payload_offset + length)
            .checked_add(F::padding(length))
            .ok_or(MalformedReason::OffsetOverflow { offset })?;
        Ok(F::view(header, payload))
    }
}

impl<'a, F: RecordFormat> Iterator for RecordCursor<'a, F> {
    type Item = Result<F::View<'a>, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.halted || self.index >= self.count {
            return None;
        }
        let index = self.index;
        match self.advance() {
            Ok(view) => {
                trace!(index, next_offset = self.offset, "record decoded");
                self.index += 1;
                Some(Ok(view))
            }
            Err(reason) => {
                debug!(index, %reason, buffer_len = self.reader.len(), "malformed container");
                self.halted = true;
                Some(Err(DecodeError::MalformedContainer { index, reason }))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.halted {
            return (0, Some(0));
        }
        let remaining = self.count.saturating_sub(self.index) as usize;
        (0, Some(remaining))
    }
}

impl<F: RecordFormat> FusedIterator for RecordCursor<'_, F> {}

/// Feed decoded records to `visitor` until the records run out, the visitor
/// breaks, or a record fails to decode.
pub(crate) fn drive<T, I, V>(records: I, mut visitor: V) -> Result<DecodeStatus, DecodeError>
where
    I: Iterator<Item = Result<T, DecodeError>>,
    V: FnMut(T) -> ControlFlow<()>,
{
    let mut visited = 0u32;
    for record in records {
        let record = record?;
        visited += 1;
        if visitor(record).is_break() {
            debug!(visited, "visitor stopped iteration");
            return Ok(DecodeStatus::Stopped { visited });
        }
    }
    Ok(DecodeStatus::Completed { visited })
}
