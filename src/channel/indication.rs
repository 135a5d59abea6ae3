//! Indications and their optional extended measurement blocks.
//!
//! An [`Indication`] may be followed by an `EI`-tagged
//! [`ExtendedIndication`], which in turn may end with a `DFP`-tagged
//! [`Dfp`] wall-thickness block. Both are decoded through the marker
//! protocol in [`marker`](crate::channel::marker).

use serde::Serialize;

use crate::channel::byte_string::ByteString;
use crate::channel::decoder::Decoder;
use crate::ChannelError;

/// A detected flaw or feature.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Indication {
    pub id: u32,
    pub axial_centre: f32,
    pub rotary_centre: f32,
    pub width: f32,
    pub length: f32,
    pub angle: f32,
    pub tube_radius: f32,
    pub maximum_amplitude: f32,
    pub maximum_depth_in_us: f32,
    pub maximum_depth_us_to_mm_conversion: f32,
    pub maximum_depth_axial_location: f32,
    pub maximum_depth_rotary_location: f32,
    pub wall_thickness_in_us: f32,
    pub wall_thickness_us_to_mm_conversion: f32,
    pub maximum_depth_us_to_mm_conversion_description: ByteString,
    pub wall_thickness_us_to_mm_conversion_description: ByteString,
    pub comments: ByteString,
    #[serde(rename = "type")]
    pub kind: u32,
    pub location: u32,
    pub reportable_element_ids: Vec<u32>,
    pub bscan_element_ids: Vec<u32>,
    pub extended: Option<ExtendedIndication>,
}

impl Indication {
    pub fn decode(d: &mut Decoder<'_, '_>) -> Result<Self, ChannelError> {
        Ok(Indication {
            id: d.long()?,
            axial_centre: d.float()?,
            rotary_centre: d.float()?,
            width: d.float()?,
            length: d.float()?,
            angle: d.float()?,
            tube_radius: d.float()?,
            maximum_amplitude: d.float()?,
            maximum_depth_in_us: d.float()?,
            maximum_depth_us_to_mm_conversion: d.float()?,
            maximum_depth_axial_location: d.float()?,
            maximum_depth_rotary_location: d.float()?,
            wall_thickness_in_us: d.float()?,
            wall_thickness_us_to_mm_conversion: d.float()?,
            maximum_depth_us_to_mm_conversion_description: d.string()?,
            wall_thickness_us_to_mm_conversion_description: d.string()?,
            comments: d.string()?,
            kind: d.long()?,
            location: d.long()?,
            reportable_element_ids: d.ids("reportable_element_ids")?,
            bscan_element_ids: d.ids("bscan_element_ids")?,
            extended: d.section("extended", |d| {
                d.extended_indication_block(ExtendedIndication::decode)
            })?,
        })
    }

    /// Maximum depth converted to millimetres.
    pub fn maximum_depth_mm(&self) -> f32 {
        self.maximum_depth_in_us * self.maximum_depth_us_to_mm_conversion
    }

    /// Wall thickness converted to millimetres.
    pub fn wall_thickness_mm(&self) -> f32 {
        self.wall_thickness_in_us * self.wall_thickness_us_to_mm_conversion
    }
}

/// Detailed amplitude, depth and automation data for an indication.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtendedIndication {
    pub maximum_cw_amplitude: f32,
    pub maximum_ccw_amplitude: f32,
    pub maximum_fwd_amplitude: f32,
    pub maximum_back_amplitude: f32,
    pub scan_sensitivity_relative_to_notch: f32,
    pub maximum_amplitude_screen_height: u8,
    pub maximum_cw_amplitude_screen_height: u8,
    pub maximum_ccw_amplitude_screen_height: u8,
    pub maximum_fwd_amplitude_screen_height: u8,
    pub maximum_back_amplitude_screen_height: u8,
    pub nb_second_backwall_background_level_screen_height: u8,
    pub nb_flaw_max_drop_screen_height: u8,
    pub flaw_6db_drop_level_screen_height: u8,
    pub nb_flaw_max_drop_relative_to_background_level: f32,
    pub flaw_6db_drop_relative_to_background_level: f32,
    pub max_cpc_depth_in_us: f32,
    pub max_cpc_depth_us_to_mm_conversion: f32,
    pub max_cpc_depth_axial_location: f32,
    pub max_cpc_depth_rotary_location: f32,
    pub max_apc_depth_in_us: f32,
    pub max_apc_depth_us_to_mm_conversion: f32,
    pub max_apc_depth_axial_location: f32,
    pub max_apc_depth_rotary_location: f32,
    pub sizing_automatic: bool,
    pub maximum_amplitude_automatic: bool,
    pub maximum_depth_automatic: bool,
    pub wall_thickness_automatic: bool,
    pub depth_profile_automatic: bool,
    pub cpc_depth_profile_automatic: bool,
    pub apc_depth_profile_automatic: bool,
    /// Raw depth profile.
    pub depth_profile_elements: Vec<DepthProfileElement>,
    /// Cross-power-corrected depth profile.
    pub cpc_depth_profile_elements: Vec<DepthProfileElement>,
    /// Along-power-corrected depth profile.
    pub apc_depth_profile_elements: Vec<DepthProfileElement>,
    pub indication_label: ByteString,
    pub analyst_id: u32,
    pub manually_created: bool,
    pub depth_was_from_20mhz: bool,
    pub dfp: Option<Dfp>,
}

impl ExtendedIndication {
    pub fn decode(d: &mut Decoder<'_, '_>) -> Result<Self, ChannelError> {
        Ok(ExtendedIndication {
            maximum_cw_amplitude: d.float()?,
            maximum_ccw_amplitude: d.float()?,
            maximum_fwd_amplitude: d.float()?,
            maximum_back_amplitude: d.float()?,
            scan_sensitivity_relative_to_notch: d.float()?,
            maximum_amplitude_screen_height: d.byte()?,
            maximum_cw_amplitude_screen_height: d.byte()?,
            maximum_ccw_amplitude_screen_height: d.byte()?,
            maximum_fwd_amplitude_screen_height: d.byte()?,
            maximum_back_amplitude_screen_height: d.byte()?,
            nb_second_backwall_background_level_screen_height: d.byte()?,
            nb_flaw_max_drop_screen_height: d.byte()?,
            flaw_6db_drop_level_screen_height: d.byte()?,
            nb_flaw_max_drop_relative_to_background_level: d.float()?,
            flaw_6db_drop_relative_to_background_level: d.float()?,
            max_cpc_depth_in_us: d.float()?,
            max_cpc_depth_us_to_mm_conversion: d.float()?,
            max_cpc_depth_axial_location: d.float()?,
            max_cpc_depth_rotary_location: d.float()?,
            max_apc_depth_in_us: d.float()?,
            max_apc_depth_us_to_mm_conversion: d.float()?,
            max_apc_depth_axial_location: d.float()?,
            max_apc_depth_rotary_location: d.float()?,
            sizing_automatic: d.bool()?,
            maximum_amplitude_automatic: d.bool()?,
            maximum_depth_automatic: d.bool()?,
            wall_thickness_automatic: d.bool()?,
            depth_profile_automatic: d.bool()?,
            cpc_depth_profile_automatic: d.bool()?,
            apc_depth_profile_automatic: d.bool()?,
            depth_profile_elements: d
                .list("depth_profile_elements", DepthProfileElement::decode)?,
            cpc_depth_profile_elements: d
                .list("cpc_depth_profile_elements", DepthProfileElement::decode)?,
            apc_depth_profile_elements: d
                .list("apc_depth_profile_elements", DepthProfileElement::decode)?,
            indication_label: d.string()?,
            analyst_id: d.long()?,
            manually_created: d.bool()?,
            depth_was_from_20mhz: d.bool()?,
            dfp: d.section("dfp", |d| d.dfp_block(Dfp::decode))?,
        })
    }
}

/// One point of a depth profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DepthProfileElement {
    pub axial: f32,
    pub rotary: f32,
    pub max_depth: f32,
}

impl DepthProfileElement {
    pub fn decode(d: &mut Decoder<'_, '_>) -> Result<Self, ChannelError> {
        Ok(DepthProfileElement {
            axial: d.float()?,
            rotary: d.float()?,
            max_depth: d.float()?,
        })
    }
}

/// Wall-thickness measurements taken for depth-from-profile sizing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dfp {
    pub dfp_wall_thickness_measurements: Vec<DfpWallThicknessMeasurement>,
}

impl Dfp {
    pub fn decode(d: &mut Decoder<'_, '_>) -> Result<Self, ChannelError> {
        Ok(Dfp {
            dfp_wall_thickness_measurements: d.list(
                "dfp_wall_thickness_measurements",
                DfpWallThicknessMeasurement::decode,
            )?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DfpWallThicknessMeasurement {
    pub axial: f32,
    pub rotary: f32,
    pub wall_thickness_in_us: f32,
    pub us_to_mm_conversion: f32,
    pub us_to_mm_conversion_description: ByteString,
}

impl DfpWallThicknessMeasurement {
    pub fn decode(d: &mut Decoder<'_, '_>) -> Result<Self, ChannelError> {
        Ok(DfpWallThicknessMeasurement {
            axial: d.float()?,
            rotary: d.float()?,
            wall_thickness_in_us: d.float()?,
            us_to_mm_conversion: d.float()?,
            us_to_mm_conversion_description: d.string()?,
        })
    }

    pub fn wall_thickness_mm(&self) -> f32 {
        self.wall_thickness_in_us * self.us_to_mm_conversion
    }
}
