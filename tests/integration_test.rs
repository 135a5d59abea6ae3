//! Integration tests for channel-file-utils.
//!
//! These tests construct synthetic channel files section by section and run
//! the full decode pipeline against them.

mod common;

use std::io::Write;

use tempfile::NamedTempFile;

use cfr::channel::decoder::{DecodeOptions, Decoder};
use cfr::channel::document::ChannelFile;
use cfr::channel::marker::DfpMarkerMode;
use cfr::channel::refs::{resolve_references, ReferenceKind};
use cfr::ChannelError;

use common::{full_file, minimal_file, ChannelWriter, DfpLayout};

fn options(mode: DfpMarkerMode) -> DecodeOptions {
    DecodeOptions { dfp_marker: mode }
}

// ========== Minimal and malformed files ==========

#[test]
fn test_minimal_file() {
    let data = minimal_file();
    let decoded = ChannelFile::decode_with(&data, DecodeOptions::default()).unwrap();
    let file = &decoded.document;

    assert_eq!(file.header.channel_name(), "B12");
    assert_eq!(file.header.operator_name, "J. Smith");
    assert!(file.calibrations.is_empty());
    assert!(!file.rolled_joints.inlet.is_present());
    assert!(!file.rolled_joints.outlet.is_present());
    assert!(file.indications.is_empty());
    assert!(file.scan_file_records.is_empty());
    assert!(decoded.diagnostics.is_clean());
    assert_eq!(decoded.diagnostics.bytes_consumed, data.len() as u64);
}

#[test]
fn test_truncated_after_magic() {
    let err = ChannelFile::from_bytes(b"CF").unwrap_err();
    match err {
        ChannelError::UnexpectedEndOfInput {
            offset, section, ..
        } => {
            assert_eq!(offset, 2);
            assert_eq!(section.as_deref(), Some("header"));
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_wrong_magic_rejected() {
    let mut data = minimal_file();
    data[0] = b'X';
    let err = ChannelFile::from_bytes(&data).unwrap_err();
    assert!(matches!(err, ChannelError::InvalidFormat { offset: 0, .. }));
    assert!(err.to_string().contains("CF"));
}

#[test]
fn test_one_byte_input_rejected() {
    let err = ChannelFile::from_bytes(b"C").unwrap_err();
    assert!(matches!(err, ChannelError::InvalidFormat { .. }));
}

#[test]
fn test_trailing_bytes_reported() {
    let mut data = minimal_file();
    data.extend_from_slice(&[0xde, 0xad]);
    let decoded = ChannelFile::decode_with(&data, DecodeOptions::default()).unwrap();
    assert_eq!(decoded.diagnostics.trailing_bytes, 2);
    assert_eq!(decoded.diagnostics.bytes_consumed, data.len() as u64 - 2);
    assert!(!decoded.diagnostics.is_clean());
}

#[test]
fn test_truncation_inside_second_indication() {
    let mut w = ChannelWriter::new();
    common::header(&mut w);
    common::calibrations(&mut w);
    common::rolled_joints(&mut w);
    common::elements(&mut w);
    w.long(2);
    common::indication(&mut w, 1, &[30], &[20]);
    common::extended(&mut w, DfpLayout::Tagged);
    let second = w.len();
    common::indication(&mut w, 2, &[], &[20]);

    let mut data = w.finish();
    data.truncate(second + 10);

    let err = ChannelFile::from_bytes(&data).unwrap_err();
    assert_eq!(err.section(), Some("indications[1]"));
    // The float at second+8 needs four bytes but only two remain.
    assert_eq!(err.offset(), Some(second as u64 + 8));
}

#[test]
fn test_huge_count_fails_cleanly() {
    let mut w = ChannelWriter::new();
    common::header(&mut w);
    w.long(u32::MAX);
    let err = ChannelFile::from_bytes(&w.finish()).unwrap_err();
    assert!(matches!(err, ChannelError::UnexpectedEndOfInput { .. }));
    assert_eq!(err.section(), Some("calibrations[0]"));
}

// ========== Full document ==========

#[test]
fn test_full_file_sections() {
    let data = full_file(DfpLayout::Tagged);
    let decoded = ChannelFile::decode_with(&data, DecodeOptions::default()).unwrap();
    let file = &decoded.document;

    assert!(decoded.diagnostics.is_clean());

    let cal = &file.calibrations[0];
    assert_eq!(cal.start_time, 1_000);
    assert_eq!(cal.entries.len(), 2);
    assert_eq!(cal.entries[1].levels, [1u8; 14]);
    assert_eq!(cal.pv_calibration_filename, "pv.cal");

    let inlet = file.rolled_joints.inlet.as_joint().unwrap();
    assert_eq!(inlet.burnish_mark.effective_value(), Some(35.5));
    assert_eq!(inlet.rolls[2].effective_value(), Some(40.0));
    assert_eq!(inlet.end, 1);
    assert!(!file.rolled_joints.outlet.is_present());

    assert_eq!(file.rescan_elements[0].kind, 2);
    assert!(file.rescan_elements[0].resolved);
    assert!(file.bscan_elements[0].mandatory);
    assert_eq!(file.reportable_elements[0].element.description, "reportable");

    assert_eq!(file.indications.len(), 2);
    let first = &file.indications[0];
    let ext = first.extended.as_ref().unwrap();
    assert_eq!(ext.depth_profile_elements.len(), 2);
    assert_eq!(ext.analyst_id, 7);
    let dfp = ext.dfp.as_ref().unwrap();
    assert_eq!(dfp.dfp_wall_thickness_measurements.len(), 1);
    assert_eq!(
        dfp.dfp_wall_thickness_measurements[0].us_to_mm_conversion_description,
        "water"
    );
    assert!(file.indications[1].extended.is_none());

    assert_eq!(file.scan_file_records[0].filename, "scan001.dat");
    assert_eq!(file.bscan_records[0].elements, vec![20]);

    let counts = file.counts();
    assert_eq!(counts.calibration_entries, 2);
    assert_eq!(counts.rolled_joints, 1);
    assert_eq!(counts.extended_indications, 1);
    assert_eq!(counts.dfp_blocks, 1);
}

#[test]
fn test_decode_is_deterministic() {
    let data = full_file(DfpLayout::Tagged);
    let a = ChannelFile::from_bytes(&data).unwrap();
    let b = ChannelFile::from_bytes(&data).unwrap();
    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn test_open_from_disk() {
    let data = full_file(DfpLayout::Tagged);
    let mut tmp = NamedTempFile::new().unwrap();
    tmp.write_all(&data).unwrap();
    tmp.flush().unwrap();

    let file = ChannelFile::open(tmp.path()).unwrap();
    assert_eq!(file, ChannelFile::from_bytes(&data).unwrap());
}

#[test]
fn test_open_missing_file() {
    let err = ChannelFile::open("/nonexistent/B12.cf").unwrap_err();
    assert!(matches!(err, ChannelError::Io(_)));
}

// ========== DFP marker handling ==========

#[test]
fn test_dfp_filler_compatible_consumes() {
    let data = full_file(DfpLayout::Filler);
    let decoded = ChannelFile::decode_with(&data, options(DfpMarkerMode::Compatible)).unwrap();

    let ext = decoded.document.indications[0].extended.as_ref().unwrap();
    assert!(ext.dfp.is_none());
    assert_eq!(decoded.document.indications.len(), 2);
    assert_eq!(decoded.diagnostics.trailing_bytes, 0);

    let events = &decoded.diagnostics.ambiguities;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].found, "58595a");
    assert_eq!(events[0].section, "indications[0].extended.dfp");
    assert!(!events[0].rewound);
}

#[test]
fn test_dfp_missing_rewind_realigns() {
    let data = full_file(DfpLayout::Missing);
    let decoded = ChannelFile::decode_with(&data, options(DfpMarkerMode::Rewind)).unwrap();

    assert_eq!(decoded.document.indications.len(), 2);
    assert_eq!(decoded.document.indications[1].id, 2);
    assert_eq!(decoded.document.scan_file_records[0].filename, "scan001.dat");

    let events = &decoded.diagnostics.ambiguities;
    assert_eq!(events.len(), 1);
    assert!(events[0].rewound);
    // Bytes left unread are the id of the next indication.
    assert_eq!(events[0].found, "020000");
}

#[test]
fn test_dfp_missing_compatible_misaligns() {
    let data = full_file(DfpLayout::Missing);
    let rewound = ChannelFile::decode_with(&data, options(DfpMarkerMode::Rewind))
        .unwrap()
        .document;
    match ChannelFile::decode_with(&data, options(DfpMarkerMode::Compatible)) {
        Ok(decoded) => assert_ne!(decoded.document, rewound),
        Err(e) => assert!(e.offset().is_some()),
    }
}

#[test]
fn test_dfp_reject_mode() {
    let data = full_file(DfpLayout::Filler);
    let err = ChannelFile::decode_with(&data, options(DfpMarkerMode::Reject)).unwrap_err();
    match err {
        ChannelError::StructuralAmbiguity { found, section, .. } => {
            assert_eq!(found, b"XYZ".to_vec());
            assert_eq!(section, "indications[0].extended.dfp");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_tagged_file_same_in_every_mode() {
    let data = full_file(DfpLayout::Tagged);
    let base = ChannelFile::from_bytes(&data).unwrap();
    for mode in [DfpMarkerMode::Rewind, DfpMarkerMode::Reject] {
        let decoded = ChannelFile::decode_with(&data, options(mode)).unwrap();
        assert_eq!(decoded.document, base);
    }
}

// ========== Tracing ==========

#[test]
fn test_trace_names_sections_and_counts() {
    let data = full_file(DfpLayout::Tagged);
    let mut trace = Vec::new();
    Decoder::new(&data).with_trace(&mut trace).decode().unwrap();
    let text = String::from_utf8(trace).unwrap();

    assert!(text.contains("Reading header at offset 2..."));
    assert!(text.contains("Reading 2 indications..."));
    assert!(text.contains("Reading indications[0].extended.dfp at offset"));
}

// ========== Serialization ==========

#[test]
fn test_json_shape() {
    let file = ChannelFile::from_bytes(&full_file(DfpLayout::Tagged)).unwrap();
    let json: serde_json::Value = serde_json::to_value(&file).unwrap();

    assert_eq!(json["header"]["operator_name"], "J. Smith");
    assert!(json["rolled_joints"]["outlet"].is_null());
    assert_eq!(json["rescan_elements"][0]["type"], 2);
    assert_eq!(json["rescan_elements"][0]["id"], 10);
    assert!(json["indications"][1]["extended"].is_null());
}

#[test]
fn test_yaml_contains_sections() {
    let file = ChannelFile::from_bytes(&full_file(DfpLayout::Tagged)).unwrap();
    let yaml = serde_yaml::to_string(&file).unwrap();
    assert!(yaml.contains("header:"));
    assert!(yaml.contains("dfp_wall_thickness_measurements:"));
    assert!(yaml.contains("scan001.dat"));
}

// ========== Cross references ==========

#[test]
fn test_references_resolve() {
    let file = ChannelFile::from_bytes(&full_file(DfpLayout::Tagged)).unwrap();
    let report = resolve_references(&file);
    assert!(report.passed());
    // indications: 1+1, 0+1; rescan 1; bscan 1; scan file 3
    assert_eq!(report.references_checked, 8);
}

#[test]
fn test_dangling_reference_reported() {
    let mut file = ChannelFile::from_bytes(&full_file(DfpLayout::Tagged)).unwrap();
    file.indications[1].bscan_element_ids.push(99);
    let report = resolve_references(&file);
    assert!(!report.passed());
    assert_eq!(report.dangling.len(), 1);
    let d = &report.dangling[0];
    assert_eq!(d.kind, ReferenceKind::IndicationBscanElement);
    assert_eq!(d.source, "indications[1].bscan_element_ids");
    assert_eq!(d.id, 99);
}
