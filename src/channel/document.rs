//! Top-level channel file document.
//!
//! A channel file is the `CF` magic followed by these sections, in order:
//!
//! | # | Section | Shape |
//! |---|---------|-------|
//! | 1 | header | [`Header`] |
//! | 2 | calibrations | list of [`Calibration`] |
//! | 3 | rolled joints | inlet + outlet [`RolledJointSlot`] |
//! | 4 | rescan elements | list of [`RescanElement`] |
//! | 5 | bscan elements | list of [`BscanElement`] |
//! | 6 | reportable elements | list of [`ReportableElement`] |
//! | 7 | indications | list of [`Indication`] |
//! | 8 | rescan records | list of [`RescanRecord`] |
//! | 9 | bscan records | list of [`BscanRecord`] |
//! | 10 | scan file records | list of [`ScanFileRecord`] |
//!
//! Every list is prefixed with a long count. Nothing in the stream marks
//! where one section ends and the next begins.

use serde::Serialize;

use crate::channel::calibration::Calibration;
use crate::channel::constants::FILE_MAGIC;
use crate::channel::decoder::{DecodeOptions, Decoder, Decoded};
use crate::channel::element::{BscanElement, ReportableElement, RescanElement};
use crate::channel::header::Header;
use crate::channel::indication::Indication;
use crate::channel::record::{BscanRecord, RescanRecord, ScanFileRecord};
use crate::channel::rolled_joint::{RolledJointSlot, RolledJoints};
use crate::ChannelError;

/// A decoded channel file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelFile {
    pub header: Header,
    pub calibrations: Vec<Calibration>,
    pub rolled_joints: RolledJoints,
    pub rescan_elements: Vec<RescanElement>,
    pub bscan_elements: Vec<BscanElement>,
    pub reportable_elements: Vec<ReportableElement>,
    pub indications: Vec<Indication>,
    pub rescan_records: Vec<RescanRecord>,
    pub bscan_records: Vec<BscanRecord>,
    pub scan_file_records: Vec<ScanFileRecord>,
}

/// Number of records in each section of a [`ChannelFile`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SectionCounts {
    pub calibrations: usize,
    pub calibration_entries: usize,
    pub rolled_joints: usize,
    pub rescan_elements: usize,
    pub bscan_elements: usize,
    pub reportable_elements: usize,
    pub indications: usize,
    pub extended_indications: usize,
    pub dfp_blocks: usize,
    pub rescan_records: usize,
    pub bscan_records: usize,
    pub scan_file_records: usize,
}

impl ChannelFile {
    /// Read and decode a channel file from disk with default options.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn open<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ChannelError> {
        let path = path.as_ref();
        let data = std::fs::read(path)
            .map_err(|e| ChannelError::Io(format!("Cannot read {}: {}", path.display(), e)))?;
        Self::from_bytes(&data)
    }

    /// Decode a channel file held in memory with default options.
    pub fn from_bytes(data: &[u8]) -> Result<Self, ChannelError> {
        Ok(Self::decode_with(data, DecodeOptions::default())?.document)
    }

    /// Decode with explicit options, keeping the diagnostics.
    pub fn decode_with(data: &[u8], options: DecodeOptions) -> Result<Decoded, ChannelError> {
        Decoder::new(data).with_options(options).decode()
    }

    /// Drive every section decoder in file order.
    pub(crate) fn assemble(d: &mut Decoder<'_, '_>) -> Result<Self, ChannelError> {
        d.section("marker", read_magic)?;
        Ok(ChannelFile {
            header: d.section("header", Header::decode)?,
            calibrations: d.list("calibrations", Calibration::decode)?,
            rolled_joints: d.section("rolled_joints", RolledJoints::decode)?,
            rescan_elements: d.list("rescan_elements", RescanElement::decode)?,
            bscan_elements: d.list("bscan_elements", BscanElement::decode)?,
            reportable_elements: d.list("reportable_elements", ReportableElement::decode)?,
            indications: d.list("indications", Indication::decode)?,
            rescan_records: d.list("rescan_records", RescanRecord::decode)?,
            bscan_records: d.list("bscan_records", BscanRecord::decode)?,
            scan_file_records: d.list("scan_file_records", ScanFileRecord::decode)?,
        })
    }

    pub fn counts(&self) -> SectionCounts {
        let extended = self.indications.iter().filter_map(|i| i.extended.as_ref());
        SectionCounts {
            calibrations: self.calibrations.len(),
            calibration_entries: self.calibrations.iter().map(|c| c.entries.len()).sum(),
            rolled_joints: [&self.rolled_joints.inlet, &self.rolled_joints.outlet]
                .iter()
                .filter(|slot| slot.is_present())
                .count(),
            rescan_elements: self.rescan_elements.len(),
            bscan_elements: self.bscan_elements.len(),
            reportable_elements: self.reportable_elements.len(),
            indications: self.indications.len(),
            extended_indications: extended.clone().count(),
            dfp_blocks: extended.filter(|e| e.dfp.is_some()).count(),
            rescan_records: self.rescan_records.len(),
            bscan_records: self.bscan_records.len(),
            scan_file_records: self.scan_file_records.len(),
        }
    }

    /// Both rolled joints, labelled, in file order.
    pub fn rolled_joint_slots(&self) -> [(&'static str, &RolledJointSlot); 2] {
        [
            ("inlet", &self.rolled_joints.inlet),
            ("outlet", &self.rolled_joints.outlet),
        ]
    }
}

fn read_magic(d: &mut Decoder<'_, '_>) -> Result<(), ChannelError> {
    let offset = d.position() as u64;
    let available = d.cursor().remaining().min(FILE_MAGIC.len());
    let peeked = d.cursor().peek(available)?;
    if !peeked.matches(FILE_MAGIC) {
        return Err(ChannelError::InvalidFormat {
            offset,
            found: peeked.bytes().to_vec(),
        });
    }
    d.cursor_mut().commit(peeked);
    Ok(())
}
