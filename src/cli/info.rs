use std::io::Write;

use colored::Colorize;
use serde::Serialize;

use crate::channel::decoder::Diagnostics;
use crate::channel::document::{ChannelFile, SectionCounts};
use crate::channel::header::Header;
use crate::channel::rolled_joint::RolledJointSlot;
use crate::cli::app::DfpMarker;
use crate::cli::{decode_options, read_input, wprintln};
use crate::util::hex::format_offset;
use crate::ChannelError;

/// Options for the `cfr info` subcommand.
pub struct InfoOptions {
    pub file: String,
    pub json: bool,
    pub dfp_marker: DfpMarker,
    pub mmap: bool,
}

#[derive(Serialize)]
struct InfoJson<'a> {
    file: String,
    file_size: u64,
    channel: String,
    header: &'a Header,
    counts: SectionCounts,
    rolled_joints: Vec<JointJson>,
    diagnostics: &'a Diagnostics,
}

#[derive(Serialize)]
struct JointJson {
    end: &'static str,
    present: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    axial_start: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    axial_end: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    burnish_mark: Option<f32>,
}

/// Summarize a channel file: header, section counts, rolled joints and any
/// decode diagnostics.
pub fn execute(opts: &InfoOptions, writer: &mut dyn Write) -> Result<(), ChannelError> {
    let data = read_input(&opts.file, opts.mmap)?;
    let decoded = ChannelFile::decode_with(&data, decode_options(opts.dfp_marker))?;
    let file = &decoded.document;
    let counts = file.counts();

    let joints: Vec<JointJson> = file
        .rolled_joint_slots()
        .into_iter()
        .map(|(end, slot)| joint_json(end, slot))
        .collect();

    if opts.json {
        let info = InfoJson {
            file: opts.file.clone(),
            file_size: data.len() as u64,
            channel: file.header.channel_name(),
            header: &file.header,
            counts,
            rolled_joints: joints,
            diagnostics: &decoded.diagnostics,
        };
        let json = serde_json::to_string_pretty(&info)
            .map_err(|e| ChannelError::Io(format!("Cannot serialize info: {}", e)))?;
        wprintln!(writer, "{}", json)?;
        return Ok(());
    }

    let hdr = &file.header;
    wprintln!(writer, "{}", "Channel File".bold())?;
    wprintln!(writer, "  File:        {}", opts.file)?;
    wprintln!(writer, "  Size:        {} bytes", data.len())?;
    wprintln!(
        writer,
        "  Channel:     {} (end {}, face {})",
        hdr.channel_name(),
        hdr.channel_end,
        hdr.reactor_face
    )?;
    wprintln!(writer, "  Station:     {} unit {}", hdr.generating_station, hdr.unit_number)?;
    wprintln!(
        writer,
        "  Date:        {} ({:02}-{:02}-{:02})",
        hdr.date,
        hdr.year,
        hdr.month,
        hdr.day
    )?;
    wprintln!(writer, "  Time:        {}", hdr.time)?;
    wprintln!(writer, "  Head:        {}", hdr.inspection_head)?;
    wprintln!(writer, "  Operator:    {}", hdr.operator_name)?;
    wprintln!(writer)?;

    wprintln!(writer, "{}", "Sections".bold())?;
    let rows = [
        ("Calibrations", counts.calibrations),
        ("  entries", counts.calibration_entries),
        ("Rolled joints", counts.rolled_joints),
        ("Rescan elements", counts.rescan_elements),
        ("B-scan elements", counts.bscan_elements),
        ("Reportable elements", counts.reportable_elements),
        ("Indications", counts.indications),
        ("  extended", counts.extended_indications),
        ("  with DFP", counts.dfp_blocks),
        ("Rescan records", counts.rescan_records),
        ("B-scan records", counts.bscan_records),
        ("Scan file records", counts.scan_file_records),
    ];
    for (label, count) in rows {
        wprintln!(writer, "  {:<22}{:>6}", label, count)?;
    }
    wprintln!(writer)?;

    wprintln!(writer, "{}", "Rolled Joints".bold())?;
    for joint in &joints {
        if !joint.present {
            wprintln!(writer, "  {:<8}absent", joint.end)?;
            continue;
        }
        wprintln!(
            writer,
            "  {:<8}axial {} .. {}, burnish mark {}",
            joint.end,
            fmt_location(joint.axial_start),
            fmt_location(joint.axial_end),
            fmt_location(joint.burnish_mark)
        )?;
    }
    wprintln!(writer)?;

    let diag = &decoded.diagnostics;
    wprintln!(writer, "{}", "Diagnostics".bold())?;
    wprintln!(writer, "  Bytes consumed: {}", diag.bytes_consumed)?;
    if diag.trailing_bytes > 0 {
        wprintln!(
            writer,
            "  Trailing bytes: {}",
            diag.trailing_bytes.to_string().yellow()
        )?;
    }
    if diag.ambiguities.is_empty() {
        wprintln!(writer, "  DFP markers:    {}", "OK".green())?;
    } else {
        wprintln!(
            writer,
            "  DFP markers:    {} mismatch(es)",
            diag.ambiguities.len().to_string().yellow()
        )?;
        for event in &diag.ambiguities {
            let action = if event.rewound { "rewound" } else { "consumed" };
            wprintln!(
                writer,
                "    {} at {} found {} ({})",
                event.section,
                format_offset(event.offset),
                event.found,
                action
            )?;
        }
    }

    Ok(())
}

fn joint_json(end: &'static str, slot: &RolledJointSlot) -> JointJson {
    match slot.as_joint() {
        Some(joint) => JointJson {
            end,
            present: true,
            axial_start: joint.axial_start.effective_value(),
            axial_end: joint.axial_end.effective_value(),
            burnish_mark: joint.burnish_mark.effective_value(),
        },
        None => JointJson {
            end,
            present: false,
            axial_start: None,
            axial_end: None,
            burnish_mark: None,
        },
    }
}

fn fmt_location(value: Option<f32>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "-".to_string(),
    }
}
