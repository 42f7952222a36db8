use std::fmt;
use std::iter::FusedIterator;
use std::slice::ChunksExact;

use super::layout::WORD_LEN;
use super::ump::Umps;

/// Borrowed run of little-endian 32-bit words.
///
/// The underlying bytes need not be 4-byte aligned in memory; words are
/// decoded on access and never copied unless asked for.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Words<'a> {
    bytes: &'a [u8],
}

impl<'a> Words<'a> {
    /// `bytes.len()` must be a multiple of [`WORD_LEN`]; a trailing partial
    /// word is ignored.
    pub(crate) fn from_bytes(bytes: &'a [u8]) -> Self {
        let whole = bytes.len() - bytes.len() % WORD_LEN;
        Self {
            bytes: &bytes[..whole],
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len() / WORD_LEN
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<u32> {
        let start = index.checked_mul(WORD_LEN)?;
        let raw = self.bytes.get(start..start.checked_add(WORD_LEN)?)?;
        raw.try_into().ok().map(u32::from_le_bytes)
    }

    /// Sub-run of words `start..end`, `None` when out of range.
    pub fn slice(&self, start: usize, end: usize) -> Option<Words<'a>> {
        let bytes = self
            .bytes
            .get(start.checked_mul(WORD_LEN)?..end.checked_mul(WORD_LEN)?)?;
        Some(Self { bytes })
    }

    pub fn iter(&self) -> WordIter<'a> {
        WordIter {
            chunks: self.bytes.chunks_exact(WORD_LEN),
        }
    }

    /// Raw little-endian bytes as stored in the list.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    pub fn to_vec(&self) -> Vec<u32> {
        self.iter().collect()
    }

    /// Words rendered most significant byte first, the order MIDI messages
    /// are written on the wire.
    pub fn to_be_bytes(&self) -> Vec<u8> {
        self.iter().flat_map(u32::to_be_bytes).collect()
    }

    /// Split into Universal MIDI Packets by message type.
    pub fn umps(&self) -> Umps<'a> {
        Umps::new(*self)
    }
}

impl fmt::Debug for Words<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.iter().map(HexWord))
            .finish()
    }
}

struct HexWord(u32);

impl fmt::Debug for HexWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

impl<'a> IntoIterator for Words<'a> {
    type Item = u32;
    type IntoIter = WordIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the words of a [`Words`] view.
#[derive(Debug, Clone)]
pub struct WordIter<'a> {
    chunks: ChunksExact<'a, u8>,
}

impl Iterator for WordIter<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        self.chunks
            .next()
            .map(|chunk| u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chunks.size_hint()
    }
}

impl ExactSizeIterator for WordIter<'_> {}

impl FusedIterator for WordIter<'_> {}

#[cfg(test)]
mod tests {
    use super::Words;

    fn le_bytes(words: &[u32]) -> Vec<u8> {
        words.iter().flat_map(|word| word.to_le_bytes()).collect()
    }

    #[test]
    fn reads_words_in_order() {
        let bytes = le_bytes(&[0x4191_3C02, 0x8000_1234]);
        let words = Words::from_bytes(&bytes);
        assert_eq!(words.len(), 2);
        assert_eq!(words.get(0), Some(0x4191_3C02));
        assert_eq!(words.get(1), Some(0x8000_1234));
        assert_eq!(words.get(2), None);
        assert_eq!(words.to_vec(), vec![0x4191_3C02, 0x8000_1234]);
    }

    #[test]
    fn be_bytes_follow_midi_order() {
        let bytes = le_bytes(&[0x4191_3C02, 0x8000_1234]);
        let words = Words::from_bytes(&bytes);
        assert_eq!(
            words.to_be_bytes(),
            vec![0x41, 0x91, 0x3C, 0x02, 0x80, 0x00, 0x12, 0x34]
        );
    }

    #[test]
    fn slice_bounds() {
        let bytes = le_bytes(&[1, 2, 3]);
        let words = Words::from_bytes(&bytes);
        assert_eq!(words.slice(1, 3).unwrap().to_vec(), vec![2, 3]);
        assert!(words.slice(2, 4).is_none());
        assert!(words.slice(0, 0).unwrap().is_empty());
    }

    #[test]
    fn unaligned_storage_is_supported() {
        let mut bytes = vec![0xFF];
        bytes.extend(le_bytes(&[0x2090_3C7F]));
        let words = Words::from_bytes(&bytes[1..]);
        assert_eq!(words.iter().collect::<Vec<_>>(), vec![0x2090_3C7F]);
    }

    #[test]
    fn debug_lists_hex_words() {
        let bytes = le_bytes(&[0x10F8_0000]);
        let words = Words::from_bytes(&bytes);
        assert_eq!(format!("{words:?}"), "[0x10f80000]");
    }
}
