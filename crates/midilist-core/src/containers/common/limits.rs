use super::error::DecodeError;

/// Header plausibility limits applied when a list is parsed from a dump.
///
/// The declared record count cannot be verified against the buffer length
/// alone, so the only upfront check is a ceiling on the count itself.
/// Records are still bounds-checked one by one during iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Largest record count accepted from a list header.
    pub max_packets: u32,
}

impl Limits {
    /// Limits for legacy packet lists (16-bit packet count).
    pub const fn legacy() -> Self {
        Self {
            max_packets: u16::MAX as u32,
        }
    }

    /// Limits for universal event lists (no practical count ceiling).
    pub const fn universal() -> Self {
        Self {
            max_packets: u32::MAX,
        }
    }

    pub(crate) fn check_count(&self, count: u32) -> Result<(), DecodeError> {
        if count > self.max_packets {
            return Err(DecodeError::ImplausibleCount {
                count,
                limit: self.max_packets,
            });
        }
        Ok(())
    }
}
