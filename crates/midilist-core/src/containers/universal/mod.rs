//! Universal event-list decoding.
//!
//! A universal list starts with a `u32` protocol id and a `u32` packet count.
//! Each packet holds a 64-bit timestamp, a 32-bit word count and that many
//! little-endian 32-bit words. Every field is word sized, so packets follow
//! each other with no padding.
//!
//! Payloads are exposed as [`Words`] and can be split into Universal MIDI
//! Packets with [`Words::umps`].

pub mod builder;
pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;
pub mod ump;
pub mod words;

pub use builder::UniversalListBuilder;
pub use error::UmpError;
pub use parser::{MidiProtocol, UniversalEventList, UniversalPacket, UniversalPackets};
pub use ump::{Ump, UmpMessageType, Umps};
pub use words::{WordIter, Words};
