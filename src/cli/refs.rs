use std::collections::BTreeMap;
use std::io::Write;

use colored::Colorize;
use serde::Serialize;

use crate::channel::document::ChannelFile;
use crate::channel::refs::{resolve_references, ReferenceReport};
use crate::cli::app::DfpMarker;
use crate::cli::{decode_options, read_input, wprintln};
use crate::ChannelError;

/// Options for the `cfr refs` subcommand.
pub struct RefsOptions {
    pub file: String,
    pub verbose: bool,
    pub json: bool,
    pub dfp_marker: DfpMarker,
    pub mmap: bool,
}

#[derive(Serialize)]
struct RefsJson<'a> {
    file: String,
    passed: bool,
    #[serde(flatten)]
    report: &'a ReferenceReport,
}

/// Resolve every cross-reference ID in a channel file against its target
/// section and report the ones that do not resolve.
///
/// Returns an error (exit status 1) when any reference dangles, so the
/// command can gate scripts.
pub fn execute(opts: &RefsOptions, writer: &mut dyn Write) -> Result<(), ChannelError> {
    let data = read_input(&opts.file, opts.mmap)?;
    let decoded = ChannelFile::decode_with(&data, decode_options(opts.dfp_marker))?;
    let report = resolve_references(&decoded.document);

    if opts.json {
        let out = RefsJson {
            file: opts.file.clone(),
            passed: report.passed(),
            report: &report,
        };
        let json = serde_json::to_string_pretty(&out)
            .map_err(|e| ChannelError::Io(format!("Cannot serialize report: {}", e)))?;
        wprintln!(writer, "{}", json)?;
    } else {
        wprintln!(writer, "{}", "Cross-reference check".bold())?;
        wprintln!(writer, "  File:       {}", opts.file)?;
        wprintln!(writer, "  Checked:    {} reference(s)", report.references_checked)?;

        if report.passed() {
            wprintln!(writer, "  Result:     {}", "all references resolve".green())?;
        } else {
            wprintln!(
                writer,
                "  Result:     {}",
                format!("{} dangling reference(s)", report.dangling.len()).red()
            )?;
            if opts.verbose {
                for r in &report.dangling {
                    wprintln!(writer, "    {} -> {} id {}", r.source, r.target, r.id)?;
                }
            } else {
                let mut by_kind: BTreeMap<String, usize> = BTreeMap::new();
                for r in &report.dangling {
                    *by_kind.entry(r.kind.to_string()).or_default() += 1;
                }
                for (kind, count) in by_kind {
                    wprintln!(writer, "    {:<32}{:>6}", kind, count)?;
                }
            }
        }
    }

    if report.passed() {
        Ok(())
    } else {
        Err(ChannelError::Argument(format!(
            "{} dangling reference(s) in {}",
            report.dangling.len(),
            opts.file
        )))
    }
}
