//! Channel file header.
//!
//! Follows the `CF` magic: nine single-byte identification fields, then four
//! length-prefixed strings.

use serde::Serialize;

use crate::channel::byte_string::ByteString;
use crate::channel::decoder::Decoder;
use crate::ChannelError;

/// Identifies the station, unit, channel and inspection session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Header {
    pub generating_station: u8,
    pub unit_number: u8,
    /// Two-digit year.
    pub year: u8,
    pub month: u8,
    pub day: u8,
    /// Channel grid column.
    pub channel_abscissa: u8,
    /// Channel grid row.
    pub channel_ordinate: u8,
    pub channel_end: u8,
    pub reactor_face: u8,
    pub inspection_head: ByteString,
    pub operator_name: ByteString,
    pub date: ByteString,
    pub time: ByteString,
}

impl Header {
    pub fn decode(d: &mut Decoder<'_, '_>) -> Result<Self, ChannelError> {
        Ok(Header {
            generating_station: d.byte()?,
            unit_number: d.byte()?,
            year: d.byte()?,
            month: d.byte()?,
            day: d.byte()?,
            channel_abscissa: d.byte()?,
            channel_ordinate: d.byte()?,
            channel_end: d.byte()?,
            reactor_face: d.byte()?,
            inspection_head: d.string()?,
            operator_name: d.string()?,
            date: d.string()?,
            time: d.string()?,
        })
    }

    /// Channel designation as printed on inspection reports, e.g. `"M12"`.
    ///
    /// Rows are lettered from `A`; values past `Z` fall back to the number.
    pub fn channel_name(&self) -> String {
        let row = match self.channel_ordinate {
            n @ 1..=26 => ((b'A' + n - 1) as char).to_string(),
            n => format!("#{}", n),
        };
        format!("{}{:02}", row, self.channel_abscissa)
    }
}
