#![forbid(unsafe_code)]
//! Reconciles Apple `.strings` localization tables against freshly
//! extracted source strings.
//!
//! `genstrings` regenerates a `.strings` table from scratch on every run,
//! clobbering whatever a translator has already done. This crate parses the
//! table format (including multi-line comments and multi-line values) into
//! keyed records and merges an existing table with a freshly extracted one,
//! keeping human translations while refreshing comments and picking up new
//! keys.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use stringsync::{merge, read_table, write_table};
//!
//! let old = read_table("en.lproj/Localizable.strings")?;
//! let new = read_table("extracted/Localizable.strings")?;
//! let merged = merge(&old, &new, false);
//! write_table("en.lproj/Localizable.strings", &merged)?;
//! # Ok::<(), stringsync::Error>(())
//! ```
//!
//! A record whose value equals its key is treated as untranslated ("raw")
//! and adopts the newly extracted value on merge; any other value is a real
//! translation and sticks.

pub mod error;
pub mod merge;
pub mod parser;
pub mod record;
pub mod table;

// Re-export most used types for easy consumption
pub use crate::{
    error::Error,
    merge::merge,
    parser::{LineParser, ParserState, process_line},
    record::{LocalizedString, Table},
    table::{merge_into, read_table, write_table},
};
