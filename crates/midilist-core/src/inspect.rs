use std::num::NonZeroUsize;
use std::ops::ControlFlow;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, warn};

use crate::containers::legacy::{LegacyPacket, LegacyPacketList};
use crate::containers::universal::{UniversalEventList, UniversalPacket, Words};
use crate::source::{ContainerFile, SourceError};
use crate::{
    ContainerReport, DecodeError, DecodeStatus, Limits, PacketSummary, ReportStatus, Variant,
    make_stub_report,
};

#[derive(Debug, Error)]
pub enum InspectError {
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),
}

/// Knobs for [`inspect_bytes`] and [`inspect_file`].
#[derive(Debug, Clone, Copy, Default)]
pub struct InspectOptions {
    /// Header limits; the variant's defaults when `None`.
    pub limits: Option<Limits>,
    /// Stop after listing this many packets.
    pub list_limit: Option<NonZeroUsize>,
}

pub fn inspect_file(
    path: &Path,
    variant: Variant,
    options: &InspectOptions,
) -> Result<ContainerReport, InspectError> {
    let file = ContainerFile::open(path)?;
    inspect_bytes(&path.display().to_string(), file.bytes(), variant, options)
}

/// Decode `bytes` as a full dump of `variant` and summarise every packet.
///
/// A malformed packet is recorded in the report status; only header-level
/// failures (short header, implausible count) are returned as errors.
pub fn inspect_bytes(
    input_path: &str,
    bytes: &[u8],
    variant: Variant,
    options: &InspectOptions,
) -> Result<ContainerReport, InspectError> {
    debug!(input_path, variant = variant.as_str(), bytes = bytes.len(), "inspecting container");
    let limits = options
        .limits
        .unwrap_or_else(|| variant.default_limits());
    let mut report = make_stub_report(input_path, bytes.len() as u64, variant);
    let mut packets = Vec::new();

    let outcome = match variant {
        Variant::Legacy => {
            let list = LegacyPacketList::parse_with_limits(bytes, &limits)?;
            report.declared_count = list.declared_count();
            list.for_each(|packet| {
                packets.push(summarize_legacy(packets.len() as u32, &packet));
                keep_listing(packets.len(), options.list_limit)
            })
        }
        Variant::Universal => {
            let list = UniversalEventList::parse_with_limits(bytes, &limits)?;
            report.declared_count = list.declared_count();
            report.protocol = Some(list.protocol().to_string());
            list.for_each(|packet| {
                packets.push(summarize_universal(packets.len() as u32, &packet));
                keep_listing(packets.len(), options.list_limit)
            })
        }
    };

    report.status = status_from_outcome(outcome)?;
    report.packets = packets;
    Ok(report)
}

fn status_from_outcome(
    outcome: Result<DecodeStatus, DecodeError>,
) -> Result<ReportStatus, DecodeError> {
    match outcome {
        Ok(status) => Ok(status.into()),
        Err(err) => match err.record_index() {
            Some(index) => {
                warn!(index, error = %err, "container is malformed");
                Ok(ReportStatus::Malformed {
                    index,
                    message: err.to_string(),
                })
            }
            None => Err(err),
        },
    }
}

fn keep_listing(listed: usize, limit: Option<NonZeroUsize>) -> ControlFlow<()> {
    match limit {
        Some(limit) if listed >= limit.get() => ControlFlow::Break(()),
        _ => ControlFlow::Continue(()),
    }
}

fn summarize_legacy(index: u32, packet: &LegacyPacket<'_>) -> PacketSummary {
    PacketSummary {
        index,
        timestamp: packet.timestamp(),
        length: u32::from(packet.len()),
        payload: hex(packet.data()),
        umps: Vec::new(),
        ump_error: None,
    }
}

fn summarize_universal(index: u32, packet: &UniversalPacket<'_>) -> PacketSummary {
    let mut umps = Vec::new();
    let mut ump_error = None;
    for ump in packet.words().umps() {
        match ump {
            Ok(ump) => umps.push(hex_words(ump.words())),
            Err(err) => ump_error = Some(err.to_string()),
        }
    }
    PacketSummary {
        index,
        timestamp: packet.timestamp(),
        length: packet.word_count(),
        payload: hex(&packet.words().to_be_bytes()),
        umps,
        ump_error,
    }
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn hex_words(words: Words<'_>) -> String {
    words
        .iter()
        .map(|word| format!("{:08x}", word))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use super::{InspectError, InspectOptions, inspect_bytes};
    use crate::containers::legacy::LegacyListBuilder;
    use crate::containers::universal::{MidiProtocol, UniversalListBuilder};
    use crate::{DecodeError, Limits, ReportStatus, Variant};

    fn legacy_dump() -> Vec<u8> {
        let mut builder = LegacyListBuilder::new();
        builder
            .push(100, &[0x90, 0x40, 0x7F])
            .unwrap()
            .push(200, &[])
            .unwrap()
            .push(300, &[0xF8])
            .unwrap();
        builder.finish()
    }

    #[test]
    fn legacy_report_lists_packets() {
        let bytes = legacy_dump();
        let report =
            inspect_bytes("dump.bin", &bytes, Variant::Legacy, &InspectOptions::default())
                .unwrap();
        assert_eq!(report.declared_count, 3);
        assert_eq!(report.status, ReportStatus::Completed { visited: 3 });
        assert_eq!(report.packets.len(), 3);
        assert_eq!(report.packets[0].payload, "90407f");
        assert_eq!(report.packets[0].length, 3);
        assert_eq!(report.packets[1].payload, "");
        assert_eq!(report.packets[2].index, 2);
        assert!(report.protocol.is_none());
    }

    #[test]
    fn list_limit_stops_early() {
        let bytes = legacy_dump();
        let options = InspectOptions {
            list_limit: NonZeroUsize::new(1),
            ..InspectOptions::default()
        };
        let report = inspect_bytes("dump.bin", &bytes, Variant::Legacy, &options).unwrap();
        assert_eq!(report.status, ReportStatus::Stopped { visited: 1 });
        assert_eq!(report.packets.len(), 1);
    }

    #[test]
    fn malformed_dump_is_reported_not_returned() {
        let mut bytes = legacy_dump();
        bytes.truncate(bytes.len() - 1);
        let report =
            inspect_bytes("dump.bin", &bytes, Variant::Legacy, &InspectOptions::default())
                .unwrap();
        assert!(matches!(report.status, ReportStatus::Malformed { index: 2, .. }));
        assert_eq!(report.packets.len(), 2);
    }

    #[test]
    fn header_failures_are_errors() {
        let err = inspect_bytes("dump.bin", &[0, 1], Variant::Universal, &InspectOptions::default())
            .unwrap_err();
        assert!(matches!(
            err,
            InspectError::Decode(DecodeError::ListTooShort { .. })
        ));

        let bytes = legacy_dump();
        let options = InspectOptions {
            limits: Some(Limits { max_packets: 2 }),
            ..InspectOptions::default()
        };
        let err = inspect_bytes("dump.bin", &bytes, Variant::Legacy, &options).unwrap_err();
        assert!(matches!(
            err,
            InspectError::Decode(DecodeError::ImplausibleCount { count: 3, limit: 2 })
        ));
    }

    #[test]
    fn universal_report_splits_umps() {
        let mut builder = UniversalListBuilder::new(MidiProtocol::Midi2);
        builder
            .push(0, &[0x4191_3C02, 0x8000_1234, 0x43B1_0100, 0x1234_5678])
            .unwrap()
            .push(1, &[0x5001_0203])
            .unwrap();
        let bytes = builder.finish();
        let report =
            inspect_bytes("events.bin", &bytes, Variant::Universal, &InspectOptions::default())
                .unwrap();
        assert_eq!(report.protocol.as_deref(), Some("midi-2.0"));
        let first = &report.packets[0];
        assert_eq!(first.length, 4);
        assert_eq!(first.payload, "41913c028000123443b1010012345678");
        assert_eq!(first.umps, vec!["41913c02 80001234", "43b10100 12345678"]);
        assert!(first.ump_error.is_none());
        let second = &report.packets[1];
        assert!(second.umps.is_empty());
        assert!(second.ump_error.as_deref().unwrap().contains("truncated UMP"));
    }
}
