//! WebAssembly bindings for channel file decoding.
//!
//! Each exported function accepts raw file bytes as `&[u8]` (via wasm-bindgen)
//! and returns a JSON string. These are thin wrappers over the same library
//! code used by the CLI subcommands.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::channel::decoder::{DecodeOptions, Diagnostics};
use crate::channel::document::{ChannelFile, SectionCounts};
use crate::channel::marker::DfpMarkerMode;
use crate::channel::refs::{resolve_references, ReferenceReport};

fn to_js_err(e: crate::ChannelError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn to_json<T: Serialize>(val: &T) -> Result<String, JsValue> {
    serde_json::to_string(val).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn parse_mode(mode: &str) -> Result<DfpMarkerMode, JsValue> {
    match mode {
        "" | "compatible" => Ok(DfpMarkerMode::Compatible),
        "rewind" => Ok(DfpMarkerMode::Rewind),
        "reject" => Ok(DfpMarkerMode::Reject),
        other => Err(JsValue::from_str(&format!(
            "Unknown DFP marker mode '{}' (expected compatible, rewind or reject)",
            other
        ))),
    }
}

/// Decodes a channel file and returns the whole document as JSON.
///
/// Uses the default `compatible` DFP marker handling. On failure the error
/// message carries the byte offset and section path of the failing read.
#[wasm_bindgen]
pub fn decode_channel_file(data: &[u8]) -> Result<String, JsValue> {
    let file = ChannelFile::from_bytes(data).map_err(to_js_err)?;
    to_json(&file)
}

#[derive(Serialize)]
struct ChannelFileInfo {
    file_size: u64,
    channel: String,
    counts: SectionCounts,
    diagnostics: Diagnostics,
    references: ReferenceReport,
}

/// Returns a summary of a channel file as JSON.
///
/// `dfp_marker` selects the marker mode: `compatible` (or empty), `rewind`
/// or `reject`. The result contains `file_size`, `channel`, `counts`,
/// `diagnostics` and the cross-reference report under `references`.
#[wasm_bindgen]
pub fn channel_file_info(data: &[u8], dfp_marker: &str) -> Result<String, JsValue> {
    let options = DecodeOptions {
        dfp_marker: parse_mode(dfp_marker)?,
    };
    let decoded = ChannelFile::decode_with(data, options).map_err(to_js_err)?;
    let info = ChannelFileInfo {
        file_size: data.len() as u64,
        channel: decoded.document.header.channel_name(),
        counts: decoded.document.counts(),
        references: resolve_references(&decoded.document),
        diagnostics: decoded.diagnostics,
    };
    to_json(&info)
}
