//! Decoding driver shared by every record decoder.
//!
//! A [`Decoder`] owns the [`Cursor`] for one input and adds what the record
//! decoders need on top of raw primitive reads:
//!
//! - **Section tracking.** [`Decoder::section`] pushes a named frame for the
//!   duration of a nested decode. An end-of-input failure is stamped with the
//!   innermost path (for example `indications[2].extended.dfp`) on its way
//!   out, so the caller learns both the byte offset and the record that was
//!   being read.
//! - **Count-prefixed lists.** [`Decoder::list`] reads a long count and runs
//!   the element decoder exactly that many times.
//! - **Marker lookahead.** [`Decoder::guarded`] peeks a tag and hands the
//!   mismatch back to the caller, who decides whether to consume it (see
//!   [`marker`](crate::channel::marker)).
//! - **Tracing.** With a sink attached via [`Decoder::with_trace`], one
//!   `Reading ...` line is written per section entered.
//!
//! Decoding is strictly sequential: each read starts where the previous one
//! stopped, and the first failure aborts the whole decode.

use std::fmt;
use std::io::Write;

use serde::Serialize;

use crate::channel::byte_string::ByteString;
use crate::channel::cursor::{Cursor, Peeked};
use crate::channel::document::ChannelFile;
use crate::channel::marker::{AmbiguityEvent, DfpMarkerMode, Marker};
use crate::ChannelError;

/// Library-level decode configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// What to do when a `DFP` marker is expected but absent.
    pub dfp_marker: DfpMarkerMode,
}

/// Facts about a decode that are not part of the document itself.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Diagnostics {
    /// `DFP` marker mismatches, in stream order.
    pub ambiguities: Vec<AmbiguityEvent>,
    /// Bytes consumed by the document.
    pub bytes_consumed: u64,
    /// Bytes left over after the last section.
    pub trailing_bytes: u64,
}

impl Diagnostics {
    /// Returns true if nothing unusual was seen during the decode.
    pub fn is_clean(&self) -> bool {
        self.ambiguities.is_empty() && self.trailing_bytes == 0
    }
}

/// A fully decoded channel file plus its diagnostics.
#[derive(Debug, Clone)]
pub struct Decoded {
    pub document: ChannelFile,
    pub diagnostics: Diagnostics,
}

/// Outcome of a marker lookahead.
pub enum Lookahead<'a, T> {
    /// The tag matched; its bytes were consumed and the block decoded.
    Present(T),
    /// The tag did not match. Nothing has been consumed yet.
    Mismatch(Peeked<'a>),
}

/// Sequential decoder over one channel file.
pub struct Decoder<'a, 'w> {
    cursor: Cursor<'a>,
    options: DecodeOptions,
    path: Vec<String>,
    diagnostics: Diagnostics,
    trace_sink: Option<&'w mut dyn Write>,
}

impl<'a, 'w> Decoder<'a, 'w> {
    pub fn new(data: &'a [u8]) -> Self {
        Decoder {
            cursor: Cursor::new(data),
            options: DecodeOptions::default(),
            path: Vec::new(),
            diagnostics: Diagnostics::default(),
            trace_sink: None,
        }
    }

    pub fn with_options(mut self, options: DecodeOptions) -> Self {
        self.options = options;
        self
    }

    /// Write a `Reading ...` line to `sink` for every section decoded.
    pub fn with_trace(mut self, sink: &'w mut dyn Write) -> Self {
        self.trace_sink = Some(sink);
        self
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    pub fn cursor(&self) -> &Cursor<'a> {
        &self.cursor
    }

    pub(crate) fn cursor_mut(&mut self) -> &mut Cursor<'a> {
        &mut self.cursor
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub(crate) fn record_ambiguity(&mut self, event: AmbiguityEvent) {
        self.diagnostics.ambiguities.push(event);
    }

    /// Decode the whole input into a [`ChannelFile`].
    pub fn decode(mut self) -> Result<Decoded, ChannelError> {
        let document = ChannelFile::assemble(&mut self)?;

        self.diagnostics.bytes_consumed = self.cursor.position() as u64;
        self.diagnostics.trailing_bytes = self.cursor.remaining() as u64;
        if self.diagnostics.trailing_bytes > 0 {
            let trailing = self.diagnostics.trailing_bytes;
            self.trace(format_args!("Ignoring {} trailing bytes", trailing))?;
        }

        Ok(Decoded {
            document,
            diagnostics: self.diagnostics,
        })
    }

    /// Dotted path of the sections currently being decoded.
    pub fn path(&self) -> String {
        let mut out = String::new();
        for seg in &self.path {
            if !out.is_empty() && !seg.starts_with('[') {
                out.push('.');
            }
            out.push_str(seg);
        }
        out
    }

    /// Write one line to the trace sink, indented by section depth.
    pub fn trace(&mut self, args: fmt::Arguments<'_>) -> Result<(), ChannelError> {
        let indent = self.path.len() * 2;
        if let Some(sink) = self.trace_sink.as_mut() {
            writeln!(sink, "{:indent$}{}", "", args, indent = indent)
                .map_err(|e| ChannelError::Io(e.to_string()))?;
        }
        Ok(())
    }

    /// Run `f` inside a named section frame.
    pub fn section<T>(
        &mut self,
        name: impl Into<String>,
        f: impl FnOnce(&mut Self) -> Result<T, ChannelError>,
    ) -> Result<T, ChannelError> {
        self.path.push(name.into());
        let offset = self.cursor.position();
        let traced = if self.trace_sink.is_some() {
            let path = self.path();
            self.trace(format_args!("Reading {} at offset {}...", path, offset))
        } else {
            Ok(())
        };
        let result = traced
            .and_then(|_| f(self))
            .map_err(|e| e.in_section(|| self.path()));
        self.path.pop();
        result
    }

    /// Read a long count, then decode exactly that many elements.
    ///
    /// The count is taken at face value. The up-front allocation is capped so
    /// that it never takes more memory than the input bytes still unread, and
    /// a corrupted count ends in an end-of-input error instead of an enormous
    /// allocation.
    pub fn list<T>(
        &mut self,
        name: &str,
        mut f: impl FnMut(&mut Self) -> Result<T, ChannelError>,
    ) -> Result<Vec<T>, ChannelError> {
        self.section(name, |d| {
            let count = d.long()? as usize;
            d.trace(format_args!("Reading {} {}...", count, name))?;
            let capacity = prealloc_capacity::<T>(count, d.cursor.remaining());
            let mut items = Vec::with_capacity(capacity);
            for i in 0..count {
                items.push(d.section(format!("[{}]", i), &mut f)?);
            }
            Ok(items)
        })
    }

    /// Read a count-prefixed list of long IDs.
    pub fn ids(&mut self, name: &str) -> Result<Vec<u32>, ChannelError> {
        self.section(name, |d| {
            let count = d.long()? as usize;
            d.trace(format_args!("Reading {} ids...", count))?;
            let capacity = prealloc_capacity::<u32>(count, d.cursor.remaining());
            let mut ids = Vec::with_capacity(capacity);
            for _ in 0..count {
                ids.push(d.long()?);
            }
            Ok(ids)
        })
    }

    /// Peek at `marker`'s tag. On a match, consume it and run `f`; otherwise
    /// return the untouched peek so the caller can decide what to do with it.
    pub fn guarded<T>(
        &mut self,
        marker: &Marker,
        f: impl FnOnce(&mut Self) -> Result<T, ChannelError>,
    ) -> Result<Lookahead<'a, T>, ChannelError> {
        let peeked = self.cursor.peek(marker.tag.len())?;
        if peeked.matches(marker.tag) {
            self.cursor.commit(peeked);
            self.trace(format_args!("Found {} marker", marker.name))?;
            f(self).map(Lookahead::Present)
        } else {
            Ok(Lookahead::Mismatch(peeked))
        }
    }

    pub fn bool(&mut self) -> Result<bool, ChannelError> {
        self.cursor.read_bool()
    }

    pub fn byte(&mut self) -> Result<u8, ChannelError> {
        self.cursor.read_byte()
    }

    pub fn short(&mut self) -> Result<u16, ChannelError> {
        self.cursor.read_short()
    }

    pub fn long(&mut self) -> Result<u32, ChannelError> {
        self.cursor.read_long()
    }

    pub fn float(&mut self) -> Result<f32, ChannelError> {
        self.cursor.read_float()
    }

    pub fn string(&mut self) -> Result<ByteString, ChannelError> {
        self.cursor.read_string()
    }

    pub fn array<const N: usize>(&mut self) -> Result<[u8; N], ChannelError> {
        self.cursor.read_array()
    }
}

/// Elements of `T` to reserve for a list of `count` when `remaining` input
/// bytes are left: never more than `remaining` bytes' worth of `T`.
pub(crate) fn prealloc_capacity<T>(count: usize, remaining: usize) -> usize {
    count.min(remaining / std::mem::size_of::<T>().max(1))
}
