//! Calibration records.
//!
//! Each calibration carries a list of entries, one per calibration file
//! applied, with four 14-value per-channel arrays.

use serde::Serialize;

use crate::channel::byte_string::ByteString;
use crate::channel::constants::CALIBRATION_CHANNELS;
use crate::channel::decoder::Decoder;
use crate::ChannelError;

/// One calibration pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Calibration {
    pub state: u32,
    pub start_time: u32,
    pub inspection_head: ByteString,
    pub entries: Vec<CalibrationEntry>,
    pub pv_calibration_filename: ByteString,
}

/// Per-channel levels and gains from a single calibration file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalibrationEntry {
    pub state: u32,
    pub filename: ByteString,
    pub levels: [u8; CALIBRATION_CHANNELS],
    pub raw_levels: [u8; CALIBRATION_CHANNELS],
    pub hardware_gains: [u8; CALIBRATION_CHANNELS],
    pub software_gains: [u8; CALIBRATION_CHANNELS],
    pub description: ByteString,
}

impl Calibration {
    pub fn decode(d: &mut Decoder<'_, '_>) -> Result<Self, ChannelError> {
        Ok(Calibration {
            state: d.long()?,
            start_time: d.long()?,
            inspection_head: d.string()?,
            entries: d.list("entries", CalibrationEntry::decode)?,
            pv_calibration_filename: d.string()?,
        })
    }
}

impl CalibrationEntry {
    pub fn decode(d: &mut Decoder<'_, '_>) -> Result<Self, ChannelError> {
        Ok(CalibrationEntry {
            state: d.long()?,
            filename: d.string()?,
            levels: d.array()?,
            raw_levels: d.array()?,
            hardware_gains: d.array()?,
            software_gains: d.array()?,
            description: d.string()?,
        })
    }
}
