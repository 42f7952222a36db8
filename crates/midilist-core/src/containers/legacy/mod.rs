//! Legacy packet-list decoding.
//!
//! A legacy list is a `u32` packet count followed by packets, each holding a
//! 64-bit timestamp, a 16-bit byte length and the payload bytes. Packets are
//! separated by the historical padding rule in `reader`: payloads of zero or
//! one byte are not padded, longer payloads are padded to a 4-byte multiple.
//!
//! Offsets and sizes live in `layout`, the padding convention in `reader`,
//! and the list and packet views in `parser`.

pub mod builder;
pub mod layout;
pub mod parser;
pub mod reader;

pub use builder::LegacyListBuilder;
pub use parser::{LegacyPacket, LegacyPacketList, LegacyPackets};
pub use reader::payload_padding;
