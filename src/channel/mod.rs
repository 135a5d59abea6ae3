//! Channel file structures and decoding.
//!
//! This module contains the core decoder for inspection channel files. A
//! channel file has no self-describing structure: every record is a fixed
//! sequence of little-endian fields, lists carry a leading count, and two
//! optional blocks are announced by short ASCII tags. The decoders therefore
//! *are* the format definition, and each reads exactly the bytes its record
//! occupies.
//!
//! Start with [`document::ChannelFile::open`] or
//! [`document::ChannelFile::from_bytes`] for a one-shot decode, or build a
//! [`decoder::Decoder`] for options, tracing, and diagnostics.

pub mod byte_string;
pub mod calibration;
pub mod constants;
pub mod cursor;
pub mod decoder;
pub mod document;
pub mod element;
pub mod header;
pub mod indication;
pub mod marker;
pub mod record;
pub mod refs;
pub mod rolled_joint;
