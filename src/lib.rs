//! Inspection channel file decoding toolkit.
//!
//! The `channel-file-utils` crate (library name `cfr`) decodes the binary
//! "channel file" container written by ultrasonic/eddy-current tube
//! inspection instruments. A channel file carries one inspection channel's
//! calibrations, rolled-joint measurements, analysis elements, indications,
//! and scan bookkeeping records, packed back to back with no type tags and
//! almost no length envelopes.
//!
//! # CLI Reference
//!
//! ```text
//! cargo install channel-file-utils
//! ```
//!
//! | Command | Purpose |
//! |---------|---------|
//! | [`cfr dump`](cli::app::Commands::Dump) | Decode a channel file and emit the full document as YAML or JSON |
//! | [`cfr info`](cli::app::Commands::Info) | Header summary, section counts, and decode diagnostics |
//! | [`cfr refs`](cli::app::Commands::Refs) | Resolve cross-reference IDs and report dangling ones |
//! | [`cfr completions`](cli::app::Commands::Completions) | Generate shell completions |
//!
//! All subcommands accept `--color <auto|always|never>`, `--output <file>`
//! and `--mmap`.
//!
//! # Library API
//!
//! ```no_run
//! use cfr::channel::document::ChannelFile;
//!
//! let file = ChannelFile::open("B12-inlet.cf").unwrap();
//! println!("Operator: {}", file.header.operator_name);
//! println!("Indications: {}", file.indications.len());
//! ```
//!
//! For control over the `DFP` marker handling, verbose tracing, or access to
//! decode diagnostics, drive a [`Decoder`](channel::decoder::Decoder)
//! directly:
//!
//! ```no_run
//! use cfr::channel::decoder::{DecodeOptions, Decoder};
//! use cfr::channel::marker::DfpMarkerMode;
//!
//! let data = std::fs::read("B12-inlet.cf").unwrap();
//! let options = DecodeOptions { dfp_marker: DfpMarkerMode::Rewind };
//! let decoded = Decoder::new(&data).with_options(options).decode().unwrap();
//! for event in &decoded.diagnostics.ambiguities {
//!     eprintln!("DFP marker mismatch at {}", event.offset);
//! }
//! ```
//!
//! ## Module overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`channel::cursor`] | Byte cursor, primitive reads, peek/commit/rewind |
//! | [`channel::decoder`] | Section tracking, list decoding, tracing, diagnostics |
//! | [`channel::marker`] | `EI` / `DFP` optional-block marker protocol |
//! | [`channel::header`] | File header |
//! | [`channel::calibration`] | Calibration records and per-channel entries |
//! | [`channel::rolled_joint`] | Overridable locations and inlet/outlet rolled joints |
//! | [`channel::element`] | Rescan, B-scan and reportable analysis elements |
//! | [`channel::indication`] | Indications, extended indications, depth profiles, DFP |
//! | [`channel::record`] | Rescan, B-scan and scan-file records |
//! | [`channel::document`] | Top-level document assembly |
//! | [`channel::refs`] | Consumer-side cross-reference resolution |

#[cfg(feature = "cli")]
pub mod cli;
pub mod channel;
pub mod util;
#[cfg(target_arch = "wasm32")]
pub mod wasm;

use thiserror::Error;

use crate::util::hex::format_marker;

/// Errors returned by `cfr` operations.
#[derive(Error, Debug)]
pub enum ChannelError {
    /// An I/O error occurred (file open, read, or write failure).
    #[error("I/O error: {0}")]
    Io(String),

    /// The stream does not start with the `CF` magic marker.
    #[error("Not a channel file: expected marker \"CF\" at offset {offset}, found {}", format_marker(.found))]
    InvalidFormat { offset: u64, found: Vec<u8> },

    /// A read ran past the end of the available bytes.
    #[error(
        "Unexpected end of input at offset {offset} while reading {}: needed {needed} byte(s), {available} available",
        .section.as_deref().unwrap_or("<top level>")
    )]
    UnexpectedEndOfInput {
        offset: u64,
        needed: usize,
        available: usize,
        section: Option<String>,
    },

    /// A `DFP` marker mismatch was encountered while decoding in reject mode.
    #[error("Structural ambiguity at offset {offset} in {section}: expected \"DFP\" marker, found {}", format_marker(.found))]
    StructuralAmbiguity {
        offset: u64,
        found: Vec<u8>,
        section: String,
    },

    /// An invalid argument was supplied.
    #[error("Invalid argument: {0}")]
    Argument(String),
}

impl ChannelError {
    /// Byte offset at which the failure was detected, if it has one.
    pub fn offset(&self) -> Option<u64> {
        match self {
            ChannelError::InvalidFormat { offset, .. }
            | ChannelError::UnexpectedEndOfInput { offset, .. }
            | ChannelError::StructuralAmbiguity { offset, .. } => Some(*offset),
            ChannelError::Io(_) | ChannelError::Argument(_) => None,
        }
    }

    /// Section path the failure occurred in, if known.
    pub fn section(&self) -> Option<&str> {
        match self {
            ChannelError::UnexpectedEndOfInput { section, .. } => section.as_deref(),
            ChannelError::StructuralAmbiguity { section, .. } => Some(section),
            _ => None,
        }
    }

    /// Attach a section path to an end-of-input error that has none yet.
    ///
    /// The innermost section wins: once set, outer sections leave it alone.
    pub(crate) fn in_section(self, path: impl FnOnce() -> String) -> Self {
        match self {
            ChannelError::UnexpectedEndOfInput {
                offset,
                needed,
                available,
                section: None,
            } => ChannelError::UnexpectedEndOfInput {
                offset,
                needed,
                available,
                section: Some(path()),
            },
            other => other,
        }
    }
}
