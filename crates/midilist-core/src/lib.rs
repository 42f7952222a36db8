//! midilist core library for decoding packed MIDI packet and event lists.
//!
//! Two container variants batch timestamped MIDI messages into one buffer:
//! legacy packet lists (byte-length packets with a historical padding rule)
//! and universal event lists (word-count packets, naturally word-aligned).
//! This crate walks those buffers packet by packet against the declared
//! packet count, validating every length field before the packet is handed
//! to the caller. Decoding is byte-oriented and side-effect free; the only
//! I/O lives in `source`, and `inspect` turns a decoded list into a
//! deterministic report.
//!
//! Invariants:
//! - A packet is never yielded before its full payload is known to fit.
//! - The first malformed packet ends iteration with its index; nothing after
//!   it is visited.
//! - A visitor stopping early is a status, not an error.
//!
//! # Examples
//! ```
//! use std::ops::ControlFlow;
//!
//! use midilist_core::containers::universal::{MidiProtocol, UniversalEventList, UniversalListBuilder};
//!
//! let mut builder = UniversalListBuilder::new(MidiProtocol::Midi2);
//! builder.push(0, &[0x4191_3C02, 0x8000_1234])?;
//! let bytes = builder.finish();
//!
//! let list = UniversalEventList::parse(&bytes)?;
//! let status = list.for_each(|packet| {
//!     assert_eq!(packet.word_count(), 2);
//!     ControlFlow::Continue(())
//! })?;
//! assert!(status.is_completed());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};

pub mod containers;
mod inspect;
mod source;

pub use containers::common::{DecodeError, DecodeStatus, EncodeError, Limits, MalformedReason};
pub use inspect::{InspectError, InspectOptions, inspect_bytes, inspect_file};
pub use source::{ContainerFile, SourceError};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;

/// Container variant of a dump.
///
/// # Examples
/// ```
/// use midilist_core::{Limits, Variant};
///
/// assert_eq!(Variant::Legacy.default_limits(), Limits::legacy());
/// assert_eq!(Variant::Universal.as_str(), "universal");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Legacy packet list (16-bit byte lengths).
    Legacy,
    /// Universal event list (32-bit word counts).
    Universal,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::Universal => "universal",
        }
    }

    pub fn default_limits(&self) -> Limits {
        match self {
            Self::Legacy => Limits::legacy(),
            Self::Universal => Limits::universal(),
        }
    }
}

/// Inspection report for one container dump.
///
/// # Examples
/// ```
/// use midilist_core::{Variant, make_stub_report};
///
/// let report = make_stub_report("dump.bin", 64, Variant::Legacy);
/// assert_eq!(report.report_version, midilist_core::REPORT_VERSION);
/// assert!(report.packets.is_empty());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerReport {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    /// Tool identification metadata.
    pub tool: ToolInfo,
    /// Input dump metadata.
    pub input: InputInfo,
    /// Container variant the dump was decoded as.
    pub variant: Variant,
    /// Protocol declared by a universal list header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    /// Packet count declared by the list header.
    pub declared_count: u32,
    /// How the walk over the list ended.
    pub status: ReportStatus,
    /// Packets in list order (possibly fewer than declared).
    pub packets: Vec<PacketSummary>,
}

/// Tool metadata embedded in reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

/// Input metadata embedded in reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path as provided to the inspector.
    pub path: String,
    /// Input size in bytes.
    pub bytes: u64,
}

/// How a report's walk over the list ended.
///
/// # Examples
/// ```
/// use midilist_core::ReportStatus;
///
/// let status = ReportStatus::Malformed {
///     index: 2,
///     message: "truncated".to_string(),
/// };
/// assert!(status.is_malformed());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ReportStatus {
    Completed { visited: u32 },
    Stopped { visited: u32 },
    Malformed { index: u32, message: String },
}

impl ReportStatus {
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed { .. })
    }
}

impl From<DecodeStatus> for ReportStatus {
    fn from(status: DecodeStatus) -> Self {
        match status {
            DecodeStatus::Completed { visited } => Self::Completed { visited },
            DecodeStatus::Stopped { visited } => Self::Stopped { visited },
        }
    }
}

/// Summary of one decoded packet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacketSummary {
    /// Position in the list, starting at zero.
    pub index: u32,
    /// Opaque producer timestamp.
    pub timestamp: u64,
    /// Declared length: bytes for legacy packets, words for universal ones.
    pub length: u32,
    /// Payload as lowercase hex, MIDI byte order.
    pub payload: String,
    /// Universal packets only: each UMP as space-separated hex words.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub umps: Vec<String>,
    /// Universal packets only: why UMP splitting stopped early.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ump_error: Option<String>,
}

/// Build a report with metadata filled and an empty, completed walk.
pub fn make_stub_report(input_path: &str, input_bytes: u64, variant: Variant) -> ContainerReport {
    ContainerReport {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "midilist".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        input: InputInfo {
            path: input_path.to_string(),
            bytes: input_bytes,
        },
        variant,
        protocol: None,
        declared_count: 0,
        status: ReportStatus::Completed { visited: 0 },
        packets: vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_omits_optional_fields_when_empty() {
        let mut report = make_stub_report("dump.bin", 4, Variant::Legacy);
        report.packets.push(PacketSummary {
            index: 0,
            timestamp: 1,
            length: 1,
            payload: "f8".to_string(),
            umps: Vec::new(),
            ump_error: None,
        });

        let value = serde_json::to_value(&report).expect("report json");
        assert!(value.get("protocol").is_none());
        assert_eq!(value["variant"], "legacy");
        assert_eq!(value["status"]["kind"], "completed");
        let packet = &value["packets"][0];
        assert!(packet.get("umps").is_none());
        assert!(packet.get("ump_error").is_none());
    }

    #[test]
    fn malformed_status_serializes_index() {
        let status = ReportStatus::Malformed {
            index: 3,
            message: "bad".to_string(),
        };
        let value = serde_json::to_value(&status).expect("status json");
        assert_eq!(value["kind"], "malformed");
        assert_eq!(value["index"], 3);
    }

    #[test]
    fn decode_status_converts() {
        let status = ReportStatus::from(DecodeStatus::Stopped { visited: 2 });
        assert_eq!(status, ReportStatus::Stopped { visited: 2 });
        assert!(!status.is_malformed());
    }
}
