//! Cross-reference resolution between document sections.
//!
//! Sections refer to each other only by numeric ID, and the decoder takes
//! those IDs at face value. This module resolves them after the fact and
//! reports IDs with no matching target, which is often the first visible
//! symptom of a misaligned decode.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::channel::document::ChannelFile;

/// Which ID list a reference came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    /// `indications[].reportable_element_ids` -> `reportable_elements`
    IndicationReportableElement,
    /// `indications[].bscan_element_ids` -> `bscan_elements`
    IndicationBscanElement,
    /// `rescan_records[].elements` -> `rescan_elements`
    RescanRecordElement,
    /// `bscan_records[].elements` -> `bscan_elements`
    BscanRecordElement,
    /// `scan_file_records[].rescan_record_ids` -> `rescan_records`
    ScanFileRescanRecord,
    /// `scan_file_records[].bscan_record_ids` -> `bscan_records`
    ScanFileBscanRecord,
    /// `scan_file_records[].reportable_element_ids` -> `reportable_elements`
    ScanFileReportableElement,
}

impl ReferenceKind {
    /// Name of the section the ID should resolve into.
    pub fn target(&self) -> &'static str {
        match self {
            ReferenceKind::IndicationReportableElement
            | ReferenceKind::ScanFileReportableElement => "reportable_elements",
            ReferenceKind::IndicationBscanElement | ReferenceKind::BscanRecordElement => {
                "bscan_elements"
            }
            ReferenceKind::RescanRecordElement => "rescan_elements",
            ReferenceKind::ScanFileRescanRecord => "rescan_records",
            ReferenceKind::ScanFileBscanRecord => "bscan_records",
        }
    }
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReferenceKind::IndicationReportableElement => "indication_reportable_element",
            ReferenceKind::IndicationBscanElement => "indication_bscan_element",
            ReferenceKind::RescanRecordElement => "rescan_record_element",
            ReferenceKind::BscanRecordElement => "bscan_record_element",
            ReferenceKind::ScanFileRescanRecord => "scan_file_rescan_record",
            ReferenceKind::ScanFileBscanRecord => "scan_file_bscan_record",
            ReferenceKind::ScanFileReportableElement => "scan_file_reportable_element",
        };
        f.write_str(name)
    }
}

/// An ID with no matching record in its target section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DanglingReference {
    pub kind: ReferenceKind,
    /// Path of the list holding the ID, e.g. `indications[3].bscan_element_ids`.
    pub source: String,
    pub id: u32,
    pub target: &'static str,
}

/// Outcome of resolving every reference in a document.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReferenceReport {
    pub references_checked: u64,
    pub dangling: Vec<DanglingReference>,
}

impl ReferenceReport {
    pub fn passed(&self) -> bool {
        self.dangling.is_empty()
    }
}

struct Resolver {
    report: ReferenceReport,
}

impl Resolver {
    fn check(
        &mut self,
        kind: ReferenceKind,
        source: impl Fn() -> String,
        ids: &[u32],
        targets: &HashSet<u32>,
    ) {
        for &id in ids {
            self.report.references_checked += 1;
            if !targets.contains(&id) {
                self.report.dangling.push(DanglingReference {
                    kind,
                    source: source(),
                    id,
                    target: kind.target(),
                });
            }
        }
    }
}

/// Resolve every ID reference in `file` against its target section.
pub fn resolve_references(file: &ChannelFile) -> ReferenceReport {
    let reportable: HashSet<u32> = file.reportable_elements.iter().map(|e| e.element.id).collect();
    let bscan: HashSet<u32> = file.bscan_elements.iter().map(|e| e.element.id).collect();
    let rescan: HashSet<u32> = file.rescan_elements.iter().map(|e| e.element.id).collect();
    let rescan_records: HashSet<u32> = file.rescan_records.iter().map(|r| r.id).collect();
    let bscan_records: HashSet<u32> = file.bscan_records.iter().map(|r| r.id).collect();

    let mut r = Resolver {
        report: ReferenceReport::default(),
    };

    for (i, ind) in file.indications.iter().enumerate() {
        r.check(
            ReferenceKind::IndicationReportableElement,
            || format!("indications[{}].reportable_element_ids", i),
            &ind.reportable_element_ids,
            &reportable,
        );
        r.check(
            ReferenceKind::IndicationBscanElement,
            || format!("indications[{}].bscan_element_ids", i),
            &ind.bscan_element_ids,
            &bscan,
        );
    }

    for (i, rec) in file.rescan_records.iter().enumerate() {
        r.check(
            ReferenceKind::RescanRecordElement,
            || format!("rescan_records[{}].elements", i),
            &rec.elements,
            &rescan,
        );
    }

    for (i, rec) in file.bscan_records.iter().enumerate() {
        r.check(
            ReferenceKind::BscanRecordElement,
            || format!("bscan_records[{}].elements", i),
            &rec.elements,
            &bscan,
        );
    }

    for (i, rec) in file.scan_file_records.iter().enumerate() {
        r.check(
            ReferenceKind::ScanFileRescanRecord,
            || format!("scan_file_records[{}].rescan_record_ids", i),
            &rec.rescan_record_ids,
            &rescan_records,
        );
        r.check(
            ReferenceKind::ScanFileBscanRecord,
            || format!("scan_file_records[{}].bscan_record_ids", i),
            &rec.bscan_record_ids,
            &bscan_records,
        );
        r.check(
            ReferenceKind::ScanFileReportableElement,
            || format!("scan_file_records[{}].reportable_element_ids", i),
            &rec.reportable_element_ids,
            &reportable,
        );
    }

    r.report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::byte_string::ByteString;
    use crate::channel::element::{AnalysisElement, BscanElement};
    use crate::channel::header::Header;
    use crate::channel::record::{BscanRecord, ScanFileRecord};
    use crate::channel::rolled_joint::{RolledJointSlot, RolledJoints};

    fn element(id: u32) -> AnalysisElement {
        AnalysisElement {
            id,
            axial_start: 0.0,
            axial_end: 1.0,
            rotary_start: 0.0,
            rotary_end: 1.0,
            channel: 0,
            description: ByteString::default(),
            calibration_id: 0,
            enabled: true,
            redundant_master: 0,
            disable_reason: ByteString::default(),
            accepted: false,
            custom: false,
        }
    }

    fn empty_file() -> ChannelFile {
        ChannelFile {
            header: Header {
                generating_station: 0,
                unit_number: 0,
                year: 0,
                month: 0,
                day: 0,
                channel_abscissa: 0,
                channel_ordinate: 0,
                channel_end: 0,
                reactor_face: 0,
                inspection_head: ByteString::default(),
                operator_name: ByteString::default(),
                date: ByteString::default(),
                time: ByteString::default(),
            },
            calibrations: vec![],
            rolled_joints: RolledJoints {
                inlet: RolledJointSlot::Absent,
                outlet: RolledJointSlot::Absent,
            },
            rescan_elements: vec![],
            bscan_elements: vec![],
            reportable_elements: vec![],
            indications: vec![],
            rescan_records: vec![],
            bscan_records: vec![],
            scan_file_records: vec![],
        }
    }

    #[test]
    fn test_empty_document_passes() {
        let report = resolve_references(&empty_file());
        assert!(report.passed());
        assert_eq!(report.references_checked, 0);
    }

    #[test]
    fn test_dangling_bscan_reference() {
        let mut file = empty_file();
        file.bscan_elements.push(BscanElement {
            element: element(4),
            mandatory: false,
        });
        file.bscan_records.push(BscanRecord {
            id: 1,
            axial_start: 0.0,
            axial_end: 1.0,
            rotary_start: 0.0,
            rotary_end: 1.0,
            completed: true,
            mandatory_region: false,
            calibration_id: 0,
            elements: vec![4, 5],
        });
        file.scan_file_records.push(ScanFileRecord {
            filename: ByteString::from("scan.001"),
            rescan_record_ids: vec![],
            bscan_record_ids: vec![1],
            reportable_element_ids: vec![],
        });

        let report = resolve_references(&file);
        assert_eq!(report.references_checked, 3);
        assert_eq!(report.dangling.len(), 1);
        let dangling = &report.dangling[0];
        assert_eq!(dangling.kind, ReferenceKind::BscanRecordElement);
        assert_eq!(dangling.source, "bscan_records[0].elements");
        assert_eq!(dangling.id, 5);
        assert_eq!(dangling.target, "bscan_elements");
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(
            ReferenceKind::ScanFileReportableElement.to_string(),
            "scan_file_reportable_element"
        );
    }
}
