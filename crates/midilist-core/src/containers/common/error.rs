use thiserror::Error;

/// Errors returned while walking a packet or event list.
///
/// Early termination requested by a visitor is not an error; it is reported
/// through [`DecodeStatus::Stopped`](super::DecodeStatus::Stopped).
///
/// # Examples
/// ```
/// use midilist_core::{DecodeError, MalformedReason};
///
/// let err = DecodeError::MalformedContainer {
///     index: 3,
///     reason: MalformedReason::TruncatedPayload {
///         offset: 24,
///         length: 8,
///         available: 2,
///     },
/// };
/// assert_eq!(err.record_index(), Some(3));
/// assert!(err.to_string().contains("record 3"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("container too short: need {needed} bytes, got {actual}")]
    ListTooShort { needed: usize, actual: usize },
    #[error("implausible record count: {count} exceeds limit {limit}")]
    ImplausibleCount { count: u32, limit: u32 },
    #[error("malformed container at record {index}: {reason}")]
    MalformedContainer { index: u32, reason: MalformedReason },
}

impl DecodeError {
    /// Index of the first record that could not be decoded, if the error is
    /// tied to a record rather than to the list header.
    pub fn record_index(&self) -> Option<u32> {
        match self {
            Self::MalformedContainer { index, .. } => Some(*index),
            Self::ListTooShort { .. } | Self::ImplausibleCount { .. } => None,
        }
    }
}

/// Why a record was rejected. Offsets are relative to the start of the record
/// region (the first byte after the list header).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MalformedReason {
    #[error("record header at offset {offset} needs {needed} bytes, {available} available")]
    TruncatedHeader {
        offset: usize,
        needed: usize,
        available: usize,
    },
    #[error("payload of {length} bytes at offset {offset} exceeds {available} available bytes")]
    TruncatedPayload {
        offset: usize,
        length: usize,
        available: usize,
    },
    #[error("record at offset {offset} overflows the addressable range")]
    OffsetOverflow { offset: usize },
}

/// Errors returned while assembling a list with one of the builders.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("payload too long: {length} exceeds {max}")]
    PayloadTooLong { length: usize, max: usize },
    #[error("packet list too large: {bytes} bytes exceeds {max}")]
    ListTooLarge { bytes: usize, max: usize },
    #[error("too many packets: limit is {limit}")]
    TooManyPackets { limit: u32 },
}
