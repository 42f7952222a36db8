use super::layout;
use super::reader::payload_padding;
use crate::containers::common::error::EncodeError;

/// Assembles a legacy packet list in the layout [`LegacyPacketList`] reads.
///
/// Packets are padded with zeros following [`payload_padding`]. The whole
/// list, header included, is capped at 65536 bytes.
///
/// [`LegacyPacketList`]: super::LegacyPacketList
#[derive(Debug, Clone, Default)]
pub struct LegacyListBuilder {
    records: Vec<u8>,
    count: u32,
}

impl LegacyListBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, timestamp: u64, data: &[u8]) -> Result<&mut Self, EncodeError> {
        let length = u16::try_from(data.len()).map_err(|_| EncodeError::PayloadTooLong {
            length: data.len(),
            max: layout::MAX_PAYLOAD_LEN,
        })?;
        if self.count >= layout::MAX_PACKETS {
            return Err(EncodeError::TooManyPackets {
                limit: layout::MAX_PACKETS,
            });
        }

        let padding = payload_padding(data.len());
        let total = layout::LIST_HEADER_LEN
            + self.records.len()
            + layout::PACKET_HEADER_LEN
            + data.len()
            + padding;
        if total > layout::MAX_LIST_BYTES {
            return Err(EncodeError::ListTooLarge {
                bytes: total,
                max: layout::MAX_LIST_BYTES,
            });
        }

        self.records.extend_from_slice(&timestamp.to_le_bytes());
        self.records.extend_from_slice(&length.to_le_bytes());
        self.records.extend_from_slice(data);
        self.records.resize(self.records.len() + padding, 0);
        self.count += 1;
        Ok(self)
    }

    pub fn len(&self) -> u32 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Record region assembled so far, without the list header.
    pub fn records(&self) -> &[u8] {
        &self.records
    }

    /// Prepend the list header and return the complete dump.
    pub fn finish(self) -> Vec<u8> {
        let mut out = Vec::with_capacity(layout::LIST_HEADER_LEN + self.records.len());
        out.extend_from_slice(&self.count.to_le_bytes());
        out.extend_from_slice(&self.records);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::LegacyListBuilder;
    use crate::EncodeError;
    use crate::containers::legacy::{LegacyPacketList, layout};

    #[test]
    fn builder_writes_header_and_padding() {
        let mut builder = LegacyListBuilder::new();
        builder.push(100, &[0x90, 0x40, 0x7F]).unwrap();
        builder.push(200, &[]).unwrap();
        assert_eq!(builder.len(), 2);

        let bytes = builder.finish();
        assert_eq!(&bytes[..4], &2u32.to_le_bytes());
        assert_eq!(&bytes[4..12], &100u64.to_le_bytes());
        assert_eq!(&bytes[12..14], &3u16.to_le_bytes());
        assert_eq!(&bytes[14..17], &[0x90, 0x40, 0x7F]);
        assert_eq!(bytes[17], 0);
        assert_eq!(&bytes[18..26], &200u64.to_le_bytes());
        assert_eq!(bytes.len(), 4 + 14 + layout::PACKET_HEADER_LEN);
    }

    #[test]
    fn builder_output_decodes() {
        let mut builder = LegacyListBuilder::new();
        builder
            .push(1, &[0xF0, 0x7E, 0x7F, 0x06, 0x01, 0xF7])
            .unwrap()
            .push(2, &[0xF8])
            .unwrap()
            .push(3, &[0xB0, 0x07])
            .unwrap();
        let bytes = builder.finish();
        let list = LegacyPacketList::parse(&bytes).unwrap();
        let lens: Vec<_> = list.packets().map(|p| p.unwrap().len()).collect();
        assert_eq!(lens, vec![6, 1, 2]);
    }

    #[test]
    fn builder_rejects_oversized_list() {
        let mut builder = LegacyListBuilder::new();
        let chunk = vec![0u8; 40_000];
        builder.push(0, &chunk).unwrap();
        let err = builder.push(0, &chunk).unwrap_err();
        assert!(matches!(err, EncodeError::ListTooLarge { max: 65_536, .. }));
        assert_eq!(builder.len(), 1);
    }

    #[test]
    fn builder_rejects_oversized_payload() {
        let mut builder = LegacyListBuilder::new();
        let data = vec![0u8; layout::MAX_PAYLOAD_LEN + 1];
        let err = builder.push(0, &data).unwrap_err();
        assert!(matches!(err, EncodeError::PayloadTooLong { .. }));
        assert!(builder.is_empty());
    }
}
