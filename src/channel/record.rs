//! Scan bookkeeping records.
//!
//! Rescan and B-scan records group analysis elements by ID; scan-file
//! records tie a raw scan file to the records and reportable elements
//! derived from it.

use serde::Serialize;

use crate::channel::byte_string::ByteString;
use crate::channel::decoder::Decoder;
use crate::ChannelError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RescanRecord {
    pub id: u32,
    pub axial_start: f32,
    pub axial_end: f32,
    pub flags: u32,
    pub completed: bool,
    pub calibration_id: u32,
    /// Rescan element IDs.
    pub elements: Vec<u32>,
}

impl RescanRecord {
    pub fn decode(d: &mut Decoder<'_, '_>) -> Result<Self, ChannelError> {
        Ok(RescanRecord {
            id: d.long()?,
            axial_start: d.float()?,
            axial_end: d.float()?,
            flags: d.long()?,
            completed: d.bool()?,
            calibration_id: d.long()?,
            elements: d.ids("elements")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BscanRecord {
    pub id: u32,
    pub axial_start: f32,
    pub axial_end: f32,
    pub rotary_start: f32,
    pub rotary_end: f32,
    pub completed: bool,
    pub mandatory_region: bool,
    pub calibration_id: u32,
    /// B-scan element IDs.
    pub elements: Vec<u32>,
}

impl BscanRecord {
    pub fn decode(d: &mut Decoder<'_, '_>) -> Result<Self, ChannelError> {
        Ok(BscanRecord {
            id: d.long()?,
            axial_start: d.float()?,
            axial_end: d.float()?,
            rotary_start: d.float()?,
            rotary_end: d.float()?,
            completed: d.bool()?,
            mandatory_region: d.bool()?,
            calibration_id: d.long()?,
            elements: d.ids("elements")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanFileRecord {
    pub filename: ByteString,
    pub rescan_record_ids: Vec<u32>,
    pub bscan_record_ids: Vec<u32>,
    pub reportable_element_ids: Vec<u32>,
}

impl ScanFileRecord {
    pub fn decode(d: &mut Decoder<'_, '_>) -> Result<Self, ChannelError> {
        Ok(ScanFileRecord {
            filename: d.string()?,
            rescan_record_ids: d.ids("rescan_record_ids")?,
            bscan_record_ids: d.ids("bscan_record_ids")?,
            reportable_element_ids: d.ids("reportable_element_ids")?,
        })
    }
}
