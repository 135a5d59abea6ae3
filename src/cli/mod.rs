//! CLI subcommand implementations for the `cfr` binary.
//!
//! CLI argument parsing uses clap derive macros, with the top-level
//! [`app::Cli`] struct and [`app::Commands`] enum defined in [`app`] and
//! shared between `main.rs` and `build.rs` (for man page generation) via
//! `include!()`.
//!
//! Each subcommand module follows the same pattern: an `Options` struct
//! holding the parsed arguments and a
//! `pub fn execute(opts, writer) -> Result<(), ChannelError>` entry point. The
//! `writer: &mut dyn Write` parameter allows output to be captured in tests or
//! redirected to a file via the global `--output` flag.
//!
//! # Subcommands
//!
//! | Command | Module | Purpose |
//! |---------|--------|---------|
//! | `cfr dump` | [`dump`] | Decode and emit the whole document as YAML or JSON |
//! | `cfr info` | [`info`] | Header, section counts, rolled joints, diagnostics |
//! | `cfr refs` | [`refs`] | Resolve cross-reference IDs, list dangling ones |
//!
//! The `wprintln!` and `wprint!` macros wrap `writeln!`/`write!` to convert
//! `io::Error` into `ChannelError`.

pub mod app;
pub mod dump;
pub mod info;
pub mod refs;

/// Write a line to the given writer, converting io::Error to ChannelError.
macro_rules! wprintln {
    ($w:expr) => {
        writeln!($w).map_err(|e| $crate::ChannelError::Io(e.to_string()))
    };
    ($w:expr, $($arg:tt)*) => {
        writeln!($w, $($arg)*).map_err(|e| $crate::ChannelError::Io(e.to_string()))
    };
}

/// Write (without newline) to the given writer, converting io::Error to ChannelError.
macro_rules! wprint {
    ($w:expr, $($arg:tt)*) => {
        write!($w, $($arg)*).map_err(|e| $crate::ChannelError::Io(e.to_string()))
    };
}

pub(crate) use wprint;
pub(crate) use wprintln;

use std::io::{self, Write};
use std::ops::Deref;

use colored::Colorize;

use crate::channel::decoder::DecodeOptions;
use crate::channel::marker::DfpMarkerMode;
use crate::cli::app::DfpMarker;
use crate::util::hex::{format_offset, hex_dump_around};
use crate::ChannelError;

/// Bytes of a channel file, either read into memory or mapped.
pub(crate) enum InputBytes {
    Owned(Vec<u8>),
    Mapped(memmap2::Mmap),
}

impl Deref for InputBytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            InputBytes::Owned(v) => v.as_slice(),
            InputBytes::Mapped(m) => &m[..],
        }
    }
}

/// Load a channel file, selecting mmap or a plain read based on the flag.
///
/// # Safety
///
/// The mapping is read-only; the file must not be truncated by another
/// process while it is being decoded.
pub(crate) fn read_input(path: &str, use_mmap: bool) -> Result<InputBytes, ChannelError> {
    if !use_mmap {
        return std::fs::read(path)
            .map(InputBytes::Owned)
            .map_err(|e| ChannelError::Io(format!("Cannot read {}: {}", path, e)));
    }

    let file = std::fs::File::open(path)
        .map_err(|e| ChannelError::Io(format!("Cannot open {}: {}", path, e)))?;
    let mmap = unsafe {
        memmap2::Mmap::map(&file)
            .map_err(|e| ChannelError::Io(format!("Cannot mmap {}: {}", path, e)))?
    };
    Ok(InputBytes::Mapped(mmap))
}

/// Library decode options for a `--dfp-marker` choice.
pub(crate) fn decode_options(dfp_marker: DfpMarker) -> DecodeOptions {
    DecodeOptions {
        dfp_marker: match dfp_marker {
            DfpMarker::Compatible => DfpMarkerMode::Compatible,
            DfpMarker::Rewind => DfpMarkerMode::Rewind,
            DfpMarker::Reject => DfpMarkerMode::Reject,
        },
    }
}

/// Print the bytes surrounding a failed decode to stderr.
pub(crate) fn print_failure_context(data: &[u8], err: &ChannelError) {
    let Some(offset) = err.offset() else {
        return;
    };
    eprintln!(
        "{} {}",
        "Decode stopped at offset".red(),
        format_offset(offset)
    );
    if let Some(section) = err.section() {
        eprintln!("  section: {}", section);
    }
    let dump = hex_dump_around(data, offset, 32);
    if !dump.is_empty() {
        eprintln!("{}", dump);
    }
}

/// Line-buffered trace sink that writes dimmed lines to stderr.
pub(crate) struct StderrTrace {
    line: Vec<u8>,
}

impl StderrTrace {
    pub(crate) fn new() -> Self {
        StderrTrace { line: Vec::new() }
    }

    fn emit(&mut self) {
        let text = String::from_utf8_lossy(&self.line);
        eprintln!("{}", text.trim_end_matches('\n').dimmed());
        self.line.clear();
    }
}

impl Write for StderrTrace {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for &b in buf {
            self.line.push(b);
            if b == b'\n' {
                self.emit();
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.line.is_empty() {
            self.emit();
        }
        Ok(())
    }
}
