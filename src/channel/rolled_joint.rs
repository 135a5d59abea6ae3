//! Rolled-joint measurements at the inlet and outlet ends of the tube.
//!
//! Each joint is preceded by a presence flag. A joint holds six
//! [`OverridableLocation`]s plus three roll locations and a closing long.

use serde::Serialize;

use crate::channel::constants::ROLL_COUNT;
use crate::channel::decoder::Decoder;
use crate::ChannelError;

/// An automatically detected value that an analyst may override.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct OverridableLocation {
    pub detected: bool,
    pub detected_value: f32,
    pub overridden: bool,
    pub manual_value: f32,
}

impl OverridableLocation {
    pub fn decode(d: &mut Decoder<'_, '_>) -> Result<Self, ChannelError> {
        Ok(OverridableLocation {
            detected: d.bool()?,
            detected_value: d.float()?,
            overridden: d.bool()?,
            manual_value: d.float()?,
        })
    }

    /// The value in effect: the manual value if overridden, else the
    /// detected value if one was detected.
    pub fn effective_value(&self) -> Option<f32> {
        if self.overridden {
            Some(self.manual_value)
        } else if self.detected {
            Some(self.detected_value)
        } else {
            None
        }
    }
}

/// Rolled-joint measurement set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RolledJoint {
    pub axial_start: OverridableLocation,
    pub axial_end: OverridableLocation,
    pub burnish_mark: OverridableLocation,
    pub rolls: [OverridableLocation; ROLL_COUNT],
    pub end_of_pressure_tube: OverridableLocation,
    pub taper: OverridableLocation,
    pub end: u32,
}

impl RolledJoint {
    pub fn decode(d: &mut Decoder<'_, '_>) -> Result<Self, ChannelError> {
        Ok(RolledJoint {
            axial_start: d.section("axial_start", OverridableLocation::decode)?,
            axial_end: d.section("axial_end", OverridableLocation::decode)?,
            burnish_mark: d.section("burnish_mark", OverridableLocation::decode)?,
            rolls: d.section("rolls", decode_rolls)?,
            end_of_pressure_tube: d.section("end_of_pressure_tube", OverridableLocation::decode)?,
            taper: d.section("taper", OverridableLocation::decode)?,
            end: d.long()?,
        })
    }
}

fn decode_rolls(
    d: &mut Decoder<'_, '_>,
) -> Result<[OverridableLocation; ROLL_COUNT], ChannelError> {
    let mut rolls = [OverridableLocation::default(); ROLL_COUNT];
    for (i, roll) in rolls.iter_mut().enumerate() {
        *roll = d.section(format!("[{}]", i), OverridableLocation::decode)?;
    }
    Ok(rolls)
}

/// A rolled joint that may or may not have been recorded.
///
/// Serializes as the joint itself, or `null` when absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RolledJointSlot {
    Absent,
    Present(RolledJoint),
}

impl RolledJointSlot {
    /// Read the presence flag and, if set, the joint. An absent joint
    /// consumes only the flag byte.
    pub fn decode(d: &mut Decoder<'_, '_>) -> Result<Self, ChannelError> {
        if d.bool()? {
            Ok(RolledJointSlot::Present(RolledJoint::decode(d)?))
        } else {
            Ok(RolledJointSlot::Absent)
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, RolledJointSlot::Present(_))
    }

    pub fn as_joint(&self) -> Option<&RolledJoint> {
        match self {
            RolledJointSlot::Present(joint) => Some(joint),
            RolledJointSlot::Absent => None,
        }
    }
}

/// Inlet and outlet rolled joints, in file order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RolledJoints {
    pub inlet: RolledJointSlot,
    pub outlet: RolledJointSlot,
}

impl RolledJoints {
    pub fn decode(d: &mut Decoder<'_, '_>) -> Result<Self, ChannelError> {
        Ok(RolledJoints {
            inlet: d.section("inlet", RolledJointSlot::decode)?,
            outlet: d.section("outlet", RolledJointSlot::decode)?,
        })
    }
}
