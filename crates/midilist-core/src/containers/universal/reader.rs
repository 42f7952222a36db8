use super::layout;
use super::parser::{MidiProtocol, UniversalPacket};
use super::words::Words;
use crate::containers::common::driver::{RecordFormat, RecordHeader};
use crate::containers::common::error::DecodeError;
use crate::containers::common::reader::{ByteReader, OutOfBounds};

#[derive(Debug)]
pub(crate) struct ListHeader<'a> {
    pub protocol: MidiProtocol,
    pub count: u32,
    pub records: &'a [u8],
}

/// Split a universal dump into protocol, declared packet count and record region.
pub(crate) fn read_list_header(buf: &[u8]) -> Result<ListHeader<'_>, DecodeError> {
    let reader = ByteReader::new(buf);
    let too_short = |err: OutOfBounds| DecodeError::ListTooShort {
        needed: err.needed,
        actual: err.actual,
    };
    reader.require_len(layout::LIST_HEADER_LEN).map_err(too_short)?;
    let protocol = reader.read_u32_le(layout::PROTOCOL_RANGE).map_err(too_short)?;
    let count = reader.read_u32_le(layout::COUNT_RANGE).map_err(too_short)?;
    let records = reader
        .read_slice(layout::LIST_HEADER_LEN..buf.len())
        .map_err(too_short)?;
    Ok(ListHeader {
        protocol: MidiProtocol::from_raw(protocol),
        count,
        records,
    })
}

pub(crate) struct UniversalFormat;

impl RecordFormat for UniversalFormat {
    type View<'a> = UniversalPacket<'a>;

    const HEADER_LEN: usize = layout::PACKET_HEADER_LEN;

    fn read_header(header: ByteReader<'_>) -> Result<RecordHeader, OutOfBounds> {
        Ok(RecordHeader {
            timestamp: header.read_u64_le(layout::TIMESTAMP_RANGE)?,
            length: header.read_u32_le(layout::WORD_COUNT_RANGE)?,
        })
    }

    fn payload_bytes(length: u32) -> Option<usize> {
        usize::try_from(length).ok()?.checked_mul(layout::WORD_LEN)
    }

    // Every field is a whole number of words, so records stay word-aligned.
    fn padding(_payload_bytes: usize) -> usize {
        0
    }

    fn view(header: RecordHeader, payload: &[u8]) -> UniversalPacket<'_> {
        UniversalPacket::new(header.timestamp, Words::from_bytes(payload))
    }
}

#[cfg(test)]
mod tests {
    use super::{UniversalFormat, read_list_header};
    use crate::DecodeError;
    use crate::containers::common::driver::RecordFormat;
    use crate::containers::universal::MidiProtocol;

    #[test]
    fn list_header_fields() {
        let mut buf = 2u32.to_le_bytes().to_vec();
        buf.extend_from_slice(&5u32.to_le_bytes());
        buf.extend_from_slice(&[0xAA; 4]);
        let header = read_list_header(&buf).unwrap();
        assert_eq!(header.protocol, MidiProtocol::Midi2);
        assert_eq!(header.count, 5);
        assert_eq!(header.records.len(), 4);
    }

    #[test]
    fn list_header_too_short() {
        let err = read_list_header(&[1, 0, 0, 0, 1]).unwrap_err();
        assert!(matches!(err, DecodeError::ListTooShort { needed: 8, actual: 5 }));
    }

    #[test]
    fn word_count_converts_to_bytes() {
        assert_eq!(UniversalFormat::payload_bytes(3), Some(12));
        assert_eq!(UniversalFormat::padding(12), 0);
    }
}
