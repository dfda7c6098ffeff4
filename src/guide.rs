use crate::sizes::ICONSET_SLOTS;
use std::io::{self, Write};

/// Returns the manual steps for packaging the staged PNGs into an ICNS file
/// with `iconutil`, using `iconset` as the name of the staging directory
/// (which must end in `.iconset`).
pub fn iconset_guide(iconset: &str) -> Vec<String> {
    let mut lines = Vec::with_capacity(ICONSET_SLOTS.len() + 4);
    lines.push("To create ICNS file for macOS:".to_string());
    lines.push(format!("1. Create an iconset folder: mkdir {}", iconset));
    lines.push("2. Copy PNG files with proper names:".to_string());
    for slot in &ICONSET_SLOTS {
        lines.push(format!("   cp {} {}/{}",
                           slot.source_file_name(),
                           iconset,
                           slot.file_name()));
    }
    lines.push(format!("3. Generate ICNS: iconutil -c icns {}", iconset));
    lines
}

/// Writes the guide to `out`, one instruction per line.
pub fn write_iconset_guide<W: Write>(mut out: W, iconset: &str) -> io::Result<()> {
    for line in iconset_guide(iconset) {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}
