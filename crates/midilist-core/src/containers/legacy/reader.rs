use super::layout;
use super::parser::LegacyPacket;
use crate::containers::common::driver::{RecordFormat, RecordHeader};
use crate::containers::common::error::DecodeError;
use crate::containers::common::reader::{ByteReader, OutOfBounds};

/// Padding that follows a legacy payload of `len` bytes.
///
/// Legacy producers treat the first payload byte as already aligned: empty
/// and single-byte payloads are followed directly by the next packet header.
/// Longer payloads are padded up to the next multiple of four bytes.
///
/// # Examples
/// ```
/// use midilist_core::containers::legacy::payload_padding;
///
/// assert_eq!(payload_padding(0), 0);
/// assert_eq!(payload_padding(1), 0);
/// assert_eq!(payload_padding(2), 2);
/// assert_eq!(payload_padding(3), 1);
/// ```
pub const fn payload_padding(len: usize) -> usize {
    if len <= 1 {
        0
    } else {
        (layout::ALIGNMENT - len % layout::ALIGNMENT) % layout::ALIGNMENT
    }
}

/// Split a legacy dump into its declared packet count and record region.
pub(crate) fn read_list_header(buf: &[u8]) -> Result<(u32, &[u8]), DecodeError> {
    let reader = ByteReader::new(buf);
    let too_short = |err: OutOfBounds| DecodeError::ListTooShort {
        needed: err.needed,
        actual: err.actual,
    };
    reader.require_len(layout::LIST_HEADER_LEN).map_err(too_short)?;
    let count = reader.read_u32_le(layout::COUNT_RANGE).map_err(too_short)?;
    let records = reader
        .read_slice(layout::LIST_HEADER_LEN..buf.len())
        .map_err(too_short)?;
    Ok((count, records))
}

pub(crate) struct LegacyFormat;

impl RecordFormat for LegacyFormat {
    type View<'a> = LegacyPacket<'a>;

    const HEADER_LEN: usize = layout::PACKET_HEADER_LEN;

    fn read_header(header: ByteReader<'_>) -> Result<RecordHeader, OutOfBounds> {
        Ok(RecordHeader {
            timestamp: header.read_u64_le(layout::TIMESTAMP_RANGE)?,
            length: u32::from(header.read_u16_le(layout::LENGTH_RANGE)?),
        })
    }

    fn payload_bytes(length: u32) -> Option<usize> {
        usize::try_from(length).ok()
    }

    fn padding(payload_bytes: usize) -> usize {
        payload_padding(payload_bytes)
    }

    fn view(header: RecordHeader, payload: &[u8]) -> LegacyPacket<'_> {
        LegacyPacket::new(header.timestamp, payload)
    }
}

#[cfg(test)]
mod tests {
    use super::{payload_padding, read_list_header};
    use crate::DecodeError;

    #[test]
    fn padding_follows_legacy_convention() {
        let expected = [0, 0, 2, 1, 0, 3, 2, 1, 0];
        for (len, pad) in expected.iter().enumerate() {
            assert_eq!(payload_padding(len), *pad, "payload length {len}");
        }
    }

    #[test]
    fn padded_payloads_end_on_word_boundary() {
        for len in 2..64 {
            assert_eq!((len + payload_padding(len)) % 4, 0);
        }
    }

    #[test]
    fn list_header_splits_count_and_records() {
        let buf = [2, 0, 0, 0, 0xAA, 0xBB];
        let (count, records) = read_list_header(&buf).unwrap();
        assert_eq!(count, 2);
        assert_eq!(records, &[0xAA, 0xBB]);
    }

    #[test]
    fn list_header_too_short() {
        let err = read_list_header(&[1, 0]).unwrap_err();
        assert_eq!(
            err,
            DecodeError::ListTooShort {
                needed: 4,
                actual: 2
            }
        );
    }
}
