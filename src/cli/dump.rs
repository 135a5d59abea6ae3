use std::io::Write;

use colored::Colorize;

use crate::channel::decoder::{Decoder, Diagnostics};
use crate::channel::document::ChannelFile;
use crate::cli::app::{DfpMarker, DocumentFormat};
use crate::cli::{decode_options, print_failure_context, read_input, wprint, wprintln, StderrTrace};
use crate::ChannelError;

/// Options for the `cfr dump` subcommand.
pub struct DumpOptions {
    pub file: String,
    pub verbose: bool,
    pub format: DocumentFormat,
    pub dfp_marker: DfpMarker,
    pub mmap: bool,
}

/// Decode a channel file and write the whole document as a YAML or JSON tree.
///
/// With `--verbose`, every section is traced to stderr as it is decoded and a
/// failed decode is followed by a hex dump of the bytes around the failure.
pub fn execute(opts: &DumpOptions, writer: &mut dyn Write) -> Result<(), ChannelError> {
    let data = read_input(&opts.file, opts.mmap)?;
    let mut trace = StderrTrace::new();

    let decoder = Decoder::new(&data).with_options(decode_options(opts.dfp_marker));
    let decoder = if opts.verbose {
        decoder.with_trace(&mut trace)
    } else {
        decoder
    };

    let result = decoder.decode();
    trace
        .flush()
        .map_err(|e| ChannelError::Io(e.to_string()))?;

    let decoded = match result {
        Ok(d) => d,
        Err(e) => {
            if opts.verbose {
                print_failure_context(&data, &e);
            }
            return Err(e);
        }
    };

    render_document(&decoded.document, opts.format, writer)?;
    warn_diagnostics(&decoded.diagnostics);
    Ok(())
}

/// Serialize `document` to `writer` in the requested tree format.
pub fn render_document(
    document: &ChannelFile,
    format: DocumentFormat,
    writer: &mut dyn Write,
) -> Result<(), ChannelError> {
    match format {
        DocumentFormat::Yaml => {
            let text = serde_yaml::to_string(document)
                .map_err(|e| ChannelError::Io(format!("Cannot serialize document: {}", e)))?;
            wprint!(writer, "{}", text)?;
        }
        DocumentFormat::Json => {
            let text = serde_json::to_string_pretty(document)
                .map_err(|e| ChannelError::Io(format!("Cannot serialize document: {}", e)))?;
            wprintln!(writer, "{}", text)?;
        }
    }
    Ok(())
}

fn warn_diagnostics(diagnostics: &Diagnostics) {
    let events = &diagnostics.ambiguities;
    if !events.is_empty() {
        let rewound = events.iter().filter(|e| e.rewound).count();
        eprintln!(
            "{} {} DFP marker mismatch(es) ({} rewound, {} consumed); run `cfr info` for offsets",
            "warning:".yellow().bold(),
            events.len(),
            rewound,
            events.len() - rewound
        );
    }
    if diagnostics.trailing_bytes > 0 {
        eprintln!(
            "{} {} trailing byte(s) after the last section",
            "warning:".yellow().bold(),
            diagnostics.trailing_bytes
        );
    }
}
