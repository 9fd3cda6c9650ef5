//! Bulk export of derived credential sheets.
//!
//! A sheet is the plain-text concatenation of every derived field, one
//! per line, grouped under its section name — the same thing a "copy
//! all" action would put on the clipboard, written to a timestamped file
//! in the configured export directory instead.

use anyhow::{Context, Result};
use chrono::Local;
use std::path::PathBuf;

use crate::formats::Section;
use crate::storage::Storage;

/// Render sections as a plain-text sheet, one field per line.
pub fn render_text(title: &str, sections: &[Section]) -> String {
    let mut out = String::new();
    out.push_str(title);
    out.push('\n');
    out.push_str(&"=".repeat(60));
    out.push('\n');
    for section in sections {
        out.push_str(section.name);
        out.push_str(":\n");
        for (label, value) in &section.entries {
            out.push_str(&format!("  {label}: {value}\n"));
        }
        out.push('\n');
    }
    out.push_str(&"=".repeat(60));
    out.push('\n');
    out.push_str(&format!(
        "Generated by credkit at {}\n",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    ));
    out
}

/// Render sections as pretty JSON (for piping into other tooling).
pub fn render_json(sections: &[Section]) -> Result<String> {
    serde_json::to_string_pretty(sections).context("Failed to serialize sections")
}

/// Write a rendered sheet into the export directory with a timestamped
/// name like `kantech_8020-11485_20260830-141502.txt`.
pub fn export_sheet(storage: &Storage, stem: &str, content: &str, extension: &str) -> Result<PathBuf> {
    let filename = format!(
        "{}_{}.{}",
        stem,
        Local::now().format("%Y%m%d-%H%M%S"),
        extension
    );
    let path = storage.export_dir().join(filename);
    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write export to {:?}", path))?;
    tracing::info!("Exported credential sheet to {:?}", path);
    Ok(path)
}
