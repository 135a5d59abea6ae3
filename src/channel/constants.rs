//! Channel file layout constants.

/// Magic marker at offset 0 of every channel file.
pub const FILE_MAGIC: &[u8; 2] = b"CF";

/// Tag preceding an extended indication block.
pub const EXTENDED_INDICATION_TAG: &[u8; 2] = b"EI";

/// Tag preceding the DFP wall-thickness block of an extended indication.
pub const DFP_TAG: &[u8; 3] = b"DFP";

/// Number of per-channel values in each calibration entry array.
pub const CALIBRATION_CHANNELS: usize = 14;

/// Number of roll locations in a rolled joint.
pub const ROLL_COUNT: usize = 3;

/// Width of a boolean field in bytes.
pub const SIZE_BOOL: usize = 1;
/// Width of a byte field.
pub const SIZE_BYTE: usize = 1;
/// Width of a short field.
pub const SIZE_SHORT: usize = 2;
/// Width of a long field (also the width of list counts and string lengths).
pub const SIZE_LONG: usize = 4;
/// Width of a single-precision float field.
pub const SIZE_FLOAT: usize = 4;
