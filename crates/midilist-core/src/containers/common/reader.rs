use std::ops::Range;

/// A read that would cross the end of the underlying bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct OutOfBounds {
    pub needed: usize,
    pub actual: usize,
}

/// Bounds-checked little-endian access over a borrowed byte span.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ByteReader<'a> {
    bytes: &'a [u8],
}

impl<'a> ByteReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn remaining_from(&self, offset: usize) -> usize {
        self.bytes.len().saturating_sub(offset)
    }

    pub fn require_len(&self, needed: usize) -> Result<(), OutOfBounds> {
        if self.bytes.len() < needed {
            return Err(OutOfBounds {
                needed,
                actual: self.bytes.len(),
            });
        }
        Ok(())
    }

    pub fn read_slice(&self, range: Range<usize>) -> Result<&'a [u8], OutOfBounds> {
        self.bytes.get(range.clone()).ok_or(OutOfBounds {
            needed: range.end,
            actual: self.bytes.len(),
        })
    }

    pub fn read_slice_at(&self, offset: usize, len: usize) -> Result<&'a [u8], OutOfBounds> {
        let end = offset.checked_add(len).ok_or(OutOfBounds {
            needed: usize::MAX,
            actual: self.bytes.len(),
        })?;
        self.read_slice(offset..end)
    }

    pub fn read_u16_le(&self, range: Range<usize>) -> Result<u16, OutOfBounds> {
        self.read_array(range).map(u16::from_le_bytes)
    }

    pub fn read_u32_le(&self, range: Range<usize>) -> Result<u32, OutOfBounds> {
        self.read_array(range).map(u32::from_le_bytes)
    }

    pub fn read_u64_le(&self, range: Range<usize>) -> Result<u64, OutOfBounds> {
        self.read_array(range).map(u64::from_le_bytes)
    }

    fn read_array<const N: usize>(&self, range: Range<usize>) -> Result<[u8; N], OutOfBounds> {
        let bytes = self.read_slice(range)?;
        bytes.try_into().map_err(|_| OutOfBounds {
            needed: N,
            actual: bytes.len(),
        })
    }
}
