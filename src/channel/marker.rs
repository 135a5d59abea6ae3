//! Optional-block marker protocol.
//!
//! Two optional blocks are announced by a short ASCII tag instead of a flag:
//!
//! | Block | Tag | On mismatch |
//! |-------|-----|-------------|
//! | Extended indication | `EI` (2 bytes) | bytes left unread |
//! | DFP wall thickness | `DFP` (3 bytes) | bytes consumed (see below) |
//!
//! The instruments' own reader consumes the three `DFP` bytes even when they
//! turn out not to be a tag, so every file written against that reader
//! expects the stream to continue three bytes later. [`DfpMarkerMode`] makes
//! the choice explicit: `Compatible` reproduces the consumption, `Rewind`
//! leaves the bytes in place, `Reject` refuses the file. The first two record
//! an [`AmbiguityEvent`] in the decode diagnostics so affected files can be
//! found.

use serde::Serialize;

use crate::channel::constants::{DFP_TAG, EXTENDED_INDICATION_TAG};
use crate::channel::decoder::{Decoder, Lookahead};
use crate::util::hex::format_bytes;
use crate::ChannelError;

/// A tag announcing an optional block.
#[derive(Debug, Clone, Copy)]
pub struct Marker {
    pub name: &'static str,
    pub tag: &'static [u8],
}

pub const EXTENDED_INDICATION_MARKER: Marker = Marker {
    name: "extended indication",
    tag: EXTENDED_INDICATION_TAG,
};

pub const DFP_MARKER: Marker = Marker {
    name: "DFP",
    tag: DFP_TAG,
};

/// Handling of a missing `DFP` tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DfpMarkerMode {
    /// Consume the three bytes anyway, as existing files expect.
    #[default]
    Compatible,
    /// Leave the three bytes unread.
    Rewind,
    /// Fail the decode with [`ChannelError::StructuralAmbiguity`].
    Reject,
}

/// A `DFP` tag mismatch seen during decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AmbiguityEvent {
    /// Offset of the first byte that was expected to be the tag.
    pub offset: u64,
    /// The bytes found there, as hex.
    pub found: String,
    pub section: String,
    /// True if the bytes were left unread (`Rewind` mode).
    pub rewound: bool,
}

impl<'a, 'w> Decoder<'a, 'w> {
    /// Decode an `EI`-guarded block, or leave the stream untouched if the
    /// tag is absent.
    pub fn extended_indication_block<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ChannelError>,
    ) -> Result<Option<T>, ChannelError> {
        match self.guarded(&EXTENDED_INDICATION_MARKER, f)? {
            Lookahead::Present(block) => Ok(Some(block)),
            Lookahead::Mismatch(peeked) => {
                self.trace(format_args!(
                    "No extended indication marker, leaving {} bytes unread",
                    peeked.len()
                ))?;
                Ok(None)
            }
        }
    }

    /// Decode a `DFP`-guarded block, handling a missing tag according to
    /// [`DecodeOptions::dfp_marker`](crate::channel::decoder::DecodeOptions).
    pub fn dfp_block<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ChannelError>,
    ) -> Result<Option<T>, ChannelError> {
        let peeked = match self.guarded(&DFP_MARKER, f)? {
            Lookahead::Present(block) => return Ok(Some(block)),
            Lookahead::Mismatch(peeked) => peeked,
        };

        let offset = peeked.offset() as u64;
        let section = self.path();
        match self.options().dfp_marker {
            DfpMarkerMode::Reject => {
                return Err(ChannelError::StructuralAmbiguity {
                    offset,
                    found: peeked.bytes().to_vec(),
                    section,
                });
            }
            DfpMarkerMode::Compatible => {
                self.cursor_mut().commit(peeked);
                self.trace(format_args!(
                    "No DFP marker, consuming {} bytes at offset {}",
                    peeked.len(),
                    offset
                ))?;
            }
            DfpMarkerMode::Rewind => {
                self.trace(format_args!(
                    "No DFP marker, leaving {} bytes at offset {} unread",
                    peeked.len(),
                    offset
                ))?;
            }
        }

        let rewound = self.options().dfp_marker == DfpMarkerMode::Rewind;
        self.record_ambiguity(AmbiguityEvent {
            offset,
            found: format_bytes(peeked.bytes()),
            section,
            rewound,
        });
        Ok(None)
    }
}
