//! Byte formatting helpers.
//!
//! Offsets, marker bytes, escaped opaque strings, and the hex dump shown
//! around the offset where a decode failed.

/// Format a byte offset as "decimal (0xhex)".
pub fn format_offset(offset: u64) -> String {
    format!("{} (0x{:x})", offset, offset)
}

/// Format bytes as a compact hex string (e.g., "4a2f00ff").
pub fn format_bytes(data: &[u8]) -> String {
    data.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Format marker bytes as a quoted escaped literal followed by their hex,
/// e.g. `"DX\x00" (445800)`.
pub fn format_marker(data: &[u8]) -> String {
    format!("\"{}\" ({})", escape_bytes(data), format_bytes(data))
}

/// Render opaque bytes as text.
///
/// Printable ASCII passes through, a backslash is doubled, and every other
/// byte becomes `\xNN`. The mapping is injective so distinct byte strings
/// never render the same.
pub fn escape_bytes(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len());
    for &b in data {
        match b {
            b'\\' => out.push_str("\\\\"),
            0x20..=0x7e => out.push(b as char),
            _ => out.push_str(&format!("\\x{:02x}", b)),
        }
    }
    out
}

/// Produce a standard hex dump of `data` with the given `base_offset`.
///
/// Output format (16 bytes per line):
/// ```text
/// 00000000  xx xx xx xx xx xx xx xx  xx xx xx xx xx xx xx xx  |................|
/// ```
pub fn hex_dump(data: &[u8], base_offset: u64) -> String {
    data.chunks(16)
        .enumerate()
        .map(|(i, chunk)| dump_line(chunk, base_offset + (i * 16) as u64))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Hex dump of up to `radius` bytes either side of `offset`, aligned to a
/// 16-byte row so the failing byte sits in its natural column.
pub fn hex_dump_around(data: &[u8], offset: u64, radius: usize) -> String {
    let center = (offset as usize).min(data.len());
    let start = center.saturating_sub(radius) & !0xf;
    let end = (center + radius).min(data.len());
    if start >= end {
        return String::new();
    }
    hex_dump(&data[start..end], start as u64)
}

fn dump_line(chunk: &[u8], offset: u64) -> String {
    let mut line = format!("{:08x}  ", offset);

    for j in 0..16 {
        if j == 8 {
            line.push(' ');
        }
        match chunk.get(j) {
            Some(byte) => line.push_str(&format!("{:02x} ", byte)),
            None => line.push_str("   "),
        }
    }

    line.push(' ');
    line.push('|');
    for byte in chunk {
        if byte.is_ascii_graphic() || *byte == b' ' {
            line.push(*byte as char);
        } else {
            line.push('.');
        }
    }
    for _ in chunk.len()..16 {
        line.push(' ');
    }
    line.push('|');
    line
}
