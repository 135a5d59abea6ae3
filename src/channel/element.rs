//! Analysis elements.
//!
//! Rescan, B-scan and reportable elements share a common leading shape
//! ([`AnalysisElement`]); rescan and B-scan elements append a few fields of
//! their own. Indications and records refer to elements by `id`.

use serde::Serialize;

use crate::channel::byte_string::ByteString;
use crate::channel::decoder::Decoder;
use crate::ChannelError;

/// Fields common to every analysis element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisElement {
    pub id: u32,
    pub axial_start: f32,
    pub axial_end: f32,
    pub rotary_start: f32,
    pub rotary_end: f32,
    pub channel: u32,
    pub description: ByteString,
    pub calibration_id: u32,
    pub enabled: bool,
    pub redundant_master: u32,
    pub disable_reason: ByteString,
    pub accepted: bool,
    pub custom: bool,
}

impl AnalysisElement {
    pub fn decode(d: &mut Decoder<'_, '_>) -> Result<Self, ChannelError> {
        Ok(AnalysisElement {
            id: d.long()?,
            axial_start: d.float()?,
            axial_end: d.float()?,
            rotary_start: d.float()?,
            rotary_end: d.float()?,
            channel: d.long()?,
            description: d.string()?,
            calibration_id: d.long()?,
            enabled: d.bool()?,
            redundant_master: d.long()?,
            disable_reason: d.string()?,
            accepted: d.bool()?,
            custom: d.bool()?,
        })
    }

    /// Axial extent of the element.
    pub fn axial_length(&self) -> f32 {
        self.axial_end - self.axial_start
    }
}

/// A region flagged for rescanning.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RescanElement {
    #[serde(flatten)]
    pub element: AnalysisElement,
    #[serde(rename = "type")]
    pub kind: u32,
    pub resolved: bool,
}

impl RescanElement {
    pub fn decode(d: &mut Decoder<'_, '_>) -> Result<Self, ChannelError> {
        Ok(RescanElement {
            element: AnalysisElement::decode(d)?,
            kind: d.long()?,
            resolved: d.bool()?,
        })
    }
}

/// A region selected for B-scan review.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BscanElement {
    #[serde(flatten)]
    pub element: AnalysisElement,
    pub mandatory: bool,
}

impl BscanElement {
    pub fn decode(d: &mut Decoder<'_, '_>) -> Result<Self, ChannelError> {
        Ok(BscanElement {
            element: AnalysisElement::decode(d)?,
            mandatory: d.bool()?,
        })
    }
}

/// A region that appears in the inspection report. Adds nothing to the
/// common shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ReportableElement {
    pub element: AnalysisElement,
}

impl ReportableElement {
    pub fn decode(d: &mut Decoder<'_, '_>) -> Result<Self, ChannelError> {
        Ok(ReportableElement {
            element: AnalysisElement::decode(d)?,
        })
    }
}
