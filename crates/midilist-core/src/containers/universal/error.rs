use thiserror::Error;

/// Errors returned while splitting a packet's words into Universal MIDI Packets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UmpError {
    #[error(
        "truncated UMP at word {word_offset}: message type {message_type:#x} needs {needed} words, {available} available"
    )]
    Truncated {
        word_offset: usize,
        message_type: u8,
        needed: usize,
        available: usize,
    },
}
