use super::layout;
use super::parser::MidiProtocol;
use crate::containers::common::error::EncodeError;

/// Assembles a universal event list in the layout [`UniversalEventList`] reads.
///
/// [`UniversalEventList`]: super::UniversalEventList
#[derive(Debug, Clone)]
pub struct UniversalListBuilder {
    protocol: MidiProtocol,
    records: Vec<u8>,
    count: u32,
}

impl UniversalListBuilder {
    pub fn new(protocol: MidiProtocol) -> Self {
        Self {
            protocol,
            records: Vec::new(),
            count: 0,
        }
    }

    pub fn push(&mut self, timestamp: u64, words: &[u32]) -> Result<&mut Self, EncodeError> {
        let word_count = u32::try_from(words.len()).map_err(|_| EncodeError::PayloadTooLong {
            length: words.len(),
            max: u32::MAX as usize,
        })?;
        if self.count >= layout::MAX_PACKETS {
            return Err(EncodeError::TooManyPackets {
                limit: layout::MAX_PACKETS,
            });
        }

        self.records.reserve(layout::PACKET_HEADER_LEN + words.len() * layout::WORD_LEN);
        self.records.extend_from_slice(&timestamp.to_le_bytes());
        self.records.extend_from_slice(&word_count.to_le_bytes());
        for word in words {
            self.records.extend_from_slice(&word.to_le_bytes());
        }
        self.count += 1;
        Ok(self)
    }

    pub fn len(&self) -> u32 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn records(&self) -> &[u8] {
        &self.records
    }

    pub fn finish(self) -> Vec<u8> {
        let mut out = Vec::with_capacity(layout::LIST_HEADER_LEN + self.records.len());
        out.extend_from_slice(&self.protocol.raw().to_le_bytes());
        out.extend_from_slice(&self.count.to_le_bytes());
        out.extend_from_slice(&self.records);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::UniversalListBuilder;
    use crate::containers::universal::{MidiProtocol, UniversalEventList, layout};

    #[test]
    fn builder_writes_header() {
        let mut builder = UniversalListBuilder::new(MidiProtocol::Midi2);
        builder.push(5, &[0x4191_3C02, 0x8000_1234]).unwrap();
        let bytes = builder.finish();
        assert_eq!(&bytes[..4], &2u32.to_le_bytes());
        assert_eq!(&bytes[4..8], &1u32.to_le_bytes());
        assert_eq!(&bytes[8..16], &5u64.to_le_bytes());
        assert_eq!(&bytes[16..20], &2u32.to_le_bytes());
        assert_eq!(bytes.len(), layout::LIST_HEADER_LEN + layout::PACKET_HEADER_LEN + 8);
    }

    #[test]
    fn builder_output_decodes() {
        let mut builder = UniversalListBuilder::new(MidiProtocol::Midi1);
        builder
            .push(1, &[0x2090_3C7F])
            .unwrap()
            .push(2, &[])
            .unwrap()
            .push(3, &[0x3016_7E7F, 0x0601_0000])
            .unwrap();
        assert_eq!(builder.len(), 3);
        let bytes = builder.finish();
        let list = UniversalEventList::parse(&bytes).unwrap();
        assert_eq!(list.protocol(), MidiProtocol::Midi1);
        let counts: Vec<_> = list.packets().map(|p| p.unwrap().word_count()).collect();
        assert_eq!(counts, vec![1, 0, 2]);
    }
}
