//! Reading and writing whole tables.
//!
//! `genstrings` and `ibtool` emit UTF-16; hand-edited tables are often
//! UTF-8. Reads honor a UTF-16 BOM first, fall back to strict UTF-8, and
//! finally retry as BOM-less UTF-16LE before giving up. Writes always emit
//! UTF-16LE with a BOM, matching what Xcode tooling produces.

use std::fs;
use std::path::Path;

use encoding_rs::{UTF_8, UTF_16BE, UTF_16LE};
use tracing::{debug, info};

use crate::error::Error;
use crate::merge::merge;
use crate::parser::LineParser;
use crate::record::Table;

/// Reads and parses one table file.
///
/// Later records with an already-seen key overwrite earlier ones, so the
/// last occurrence in the file wins.
pub fn read_table(path: impl AsRef<Path>) -> Result<Table, Error> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let content = decode(&bytes).ok_or_else(|| Error::Decode {
        path: path.to_path_buf(),
    })?;

    debug!(path = %path.display(), "parsing table");
    let mut parser = LineParser::new();
    let mut table = Table::new();
    for line in content.lines() {
        if let Some(record) = parser.parse_line(line) {
            table.insert(record.key.clone(), record);
        }
    }
    Ok(table)
}

/// Serializes a table, sorted by key, overwriting `path`.
///
/// The content is rendered completely in memory before the destination is
/// touched, so a failed write never leaves a half-written table behind.
pub fn write_table(path: impl AsRef<Path>, table: &Table) -> Result<(), Error> {
    let path = path.as_ref();
    let mut content = String::new();
    for record in table.values() {
        content.push_str(&record.to_string());
        content.push('\n');
    }
    fs::write(path, encode_utf16le(&content)).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Reconciles the freshly extracted table at `new_path` into the existing
/// table at `old_path`.
///
/// When `old_path` does not exist yet there is nothing to merge; the new
/// file is copied verbatim into `dest_dir` instead.
pub fn merge_into(
    new_path: impl AsRef<Path>,
    old_path: impl AsRef<Path>,
    dest_dir: impl AsRef<Path>,
    keep_comment: bool,
) -> Result<(), Error> {
    let new_path = new_path.as_ref();
    let old_path = old_path.as_ref();
    let dest_dir = dest_dir.as_ref();

    if old_path.exists() {
        debug!(path = %old_path.display(), "table exists, merging");
        let new_table = read_table(new_path)?;
        let old_table = read_table(old_path)?;
        let merged = merge(&old_table, &new_table, keep_comment);
        write_table(old_path, &merged)
    } else {
        info!(path = %new_path.display(), "table is new");
        if let Some(name) = new_path.file_name() {
            let dest = dest_dir.join(name);
            fs::copy(new_path, &dest).map_err(|source| Error::Write { path: dest, source })?;
        }
        Ok(())
    }
}

fn decode(bytes: &[u8]) -> Option<String> {
    if bytes.starts_with(&[0xFF, 0xFE]) {
        let (text, had_errors) = UTF_16LE.decode_with_bom_removal(bytes);
        if !had_errors {
            return Some(text.into_owned());
        }
    } else if bytes.starts_with(&[0xFE, 0xFF]) {
        let (text, had_errors) = UTF_16BE.decode_with_bom_removal(bytes);
        if !had_errors {
            return Some(text.into_owned());
        }
    }
    let (text, had_errors) = UTF_8.decode_with_bom_removal(bytes);
    if !had_errors {
        return Some(text.into_owned());
    }
    // Last resort: UTF-16LE without a BOM, as emitted by some tools.
    let (text, had_errors) = UTF_16LE.decode_without_bom_handling(bytes);
    if !had_errors {
        return Some(text.into_owned());
    }
    None
}

fn encode_utf16le(text: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(2 + text.len() * 2);
    bytes.extend_from_slice(&[0xFF, 0xFE]);
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    bytes
}
