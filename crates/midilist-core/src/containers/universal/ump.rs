//! Splitting event-list payloads into Universal MIDI Packets.
//!
//! A packet in a universal list may carry several UMPs back to back. The size
//! of each one is fixed by the message-type nibble in the top four bits of its
//! first word, so the words can be split without interpreting the messages.

use std::iter::FusedIterator;

use super::error::UmpError;
use super::words::Words;

/// UMP message type, taken from the high nibble of a UMP's first word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UmpMessageType {
    Utility,
    SystemRealTimeAndCommon,
    Midi1ChannelVoice,
    Data64,
    Midi2ChannelVoice,
    Data128,
    FlexData,
    UmpStream,
    /// Reserved type; the nibble is kept so the size can still be derived.
    Reserved(u8),
}

impl UmpMessageType {
    pub fn from_nibble(nibble: u8) -> Self {
        match nibble & 0x0F {
            0x0 => Self::Utility,
            0x1 => Self::SystemRealTimeAndCommon,
            0x2 => Self::Midi1ChannelVoice,
            0x3 => Self::Data64,
            0x4 => Self::Midi2ChannelVoice,
            0x5 => Self::Data128,
            0xD => Self::FlexData,
            0xF => Self::UmpStream,
            other => Self::Reserved(other),
        }
    }

    pub fn nibble(&self) -> u8 {
        match self {
            Self::Utility => 0x0,
            Self::SystemRealTimeAndCommon => 0x1,
            Self::Midi1ChannelVoice => 0x2,
            Self::Data64 => 0x3,
            Self::Midi2ChannelVoice => 0x4,
            Self::Data128 => 0x5,
            Self::FlexData => 0xD,
            Self::UmpStream => 0xF,
            Self::Reserved(nibble) => *nibble,
        }
    }

    /// Number of 32-bit words in a UMP of this type.
    pub fn word_count(&self) -> usize {
        match self.nibble() {
            0x0 | 0x1 | 0x2 | 0x6 | 0x7 => 1,
            0x3 | 0x4 | 0x8 | 0x9 | 0xA => 2,
            0xB | 0xC => 3,
            _ => 4,
        }
    }
}

/// One Universal MIDI Packet borrowed from an event-list payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ump<'a> {
    message_type: UmpMessageType,
    group: u8,
    words: Words<'a>,
}

impl<'a> Ump<'a> {
    pub fn message_type(&self) -> UmpMessageType {
        self.message_type
    }

    /// UMP group (low nibble of the first byte).
    pub fn group(&self) -> u8 {
        self.group
    }

    pub fn words(&self) -> Words<'a> {
        self.words
    }
}

/// Iterator returned by [`Words::umps`]. Fuses after a truncated UMP.
#[derive(Debug, Clone)]
pub struct Umps<'a> {
    words: Words<'a>,
    position: usize,
    halted: bool,
}

impl<'a> Umps<'a> {
    pub(crate) fn new(words: Words<'a>) -> Self {
        Self {
            words,
            position: 0,
            halted: false,
        }
    }
}

impl<'a> Iterator for Umps<'a> {
    type Item = Result<Ump<'a>, UmpError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.halted {
            return None;
        }
        let first = self.words.get(self.position)?;
        let message_type = UmpMessageType::from_nibble((first >> 28) as u8);
        let needed = message_type.word_count();
        let end = self.position + needed;
        match self.words.slice(self.position, end) {
            Some(words) => {
                self.position = end;
                Some(Ok(Ump {
                    message_type,
                    group: ((first >> 24) & 0x0F) as u8,
                    words,
                }))
            }
            None => {
                self.halted = true;
                Some(Err(UmpError::Truncated {
                    word_offset: self.position,
                    message_type: message_type.nibble(),
                    needed,
                    available: self.words.len() - self.position,
                }))
            }
        }
    }
}

impl FusedIterator for Umps<'_> {}

#[cfg(test)]
mod tests {
    use super::UmpMessageType;
    use crate::containers::universal::error::UmpError;
    use crate::containers::universal::words::Words;

    fn le_bytes(words: &[u32]) -> Vec<u8> {
        words.iter().flat_map(|word| word.to_le_bytes()).collect()
    }

    #[test]
    fn word_counts_by_message_type() {
        let expected = [1, 1, 1, 2, 2, 4, 1, 1, 2, 2, 2, 3, 3, 4, 4, 4];
        for (nibble, words) in expected.iter().enumerate() {
            let message_type = UmpMessageType::from_nibble(nibble as u8);
            assert_eq!(message_type.word_count(), *words, "nibble {nibble:#x}");
            assert_eq!(message_type.nibble(), nibble as u8);
        }
    }

    #[test]
    fn splits_two_midi2_messages() {
        let bytes = le_bytes(&[0x4191_3C02, 0x8000_1234, 0x43B1_0100, 0x1234_5678]);
        let words = Words::from_bytes(&bytes);
        let umps: Vec<_> = words.umps().collect::<Result<_, _>>().unwrap();
        assert_eq!(umps.len(), 2);
        assert_eq!(umps[0].message_type(), UmpMessageType::Midi2ChannelVoice);
        assert_eq!(umps[0].group(), 1);
        assert_eq!(umps[0].words().to_vec(), vec![0x4191_3C02, 0x8000_1234]);
        assert_eq!(umps[1].group(), 3);
        assert_eq!(
            umps[1].words().to_be_bytes(),
            vec![0x43, 0xB1, 0x01, 0x00, 0x12, 0x34, 0x56, 0x78]
        );
    }

    #[test]
    fn splits_mixed_sizes() {
        let bytes = le_bytes(&[0x2090_3C7F, 0x10F8_0000, 0x3016_7E7F, 0x0601_0000]);
        let words = Words::from_bytes(&bytes);
        let types: Vec<_> = words
            .umps()
            .map(|ump| ump.unwrap().message_type())
            .collect();
        assert_eq!(
            types,
            vec![
                UmpMessageType::Midi1ChannelVoice,
                UmpMessageType::SystemRealTimeAndCommon,
                UmpMessageType::Data64,
            ]
        );
    }

    #[test]
    fn truncated_ump_is_reported_once() {
        let bytes = le_bytes(&[0x2090_3C7F, 0x5001_0203]);
        let words = Words::from_bytes(&bytes);
        let mut umps = words.umps();
        assert!(umps.next().unwrap().is_ok());
        let err = umps.next().unwrap().unwrap_err();
        assert_eq!(
            err,
            UmpError::Truncated {
                word_offset: 1,
                message_type: 0x5,
                needed: 4,
                available: 1,
            }
        );
        assert!(umps.next().is_none());
    }

    #[test]
    fn empty_payload_has_no_umps() {
        let words = Words::from_bytes(&[]);
        assert_eq!(words.umps().count(), 0);
    }
}
