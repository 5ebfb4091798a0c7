//! The in-memory representation of one `.strings` table entry.

use std::collections::BTreeMap;
use std::fmt;

/// A single localization table, keyed by record key.
///
/// `BTreeMap` keeps iteration in key order, which is exactly the order
/// records are written back out in.
pub type Table = BTreeMap<String, LocalizedString>;

/// One entry of a `.strings` table: a key, an optional value, and an
/// optional comment for translators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedString {
    /// The key, unique within a table.
    pub key: String,
    /// The translated (or, for fresh entries, extracted) value.
    pub value: Option<String>,
    /// Comment describing the source context, usually emitted by the
    /// extraction tool.
    pub comment: Option<String>,
}

impl LocalizedString {
    /// Creates a record with no value and no comment.
    pub fn new(key: impl Into<String>) -> Self {
        LocalizedString {
            key: key.into(),
            value: None,
            comment: None,
        }
    }

    /// Creates a record with a value and an optional comment.
    pub fn with_value(
        key: impl Into<String>,
        value: impl Into<String>,
        comment: Option<String>,
    ) -> Self {
        LocalizedString {
            key: key.into(),
            value: Some(value.into()),
            comment,
        }
    }

    /// Returns true if the record has not been translated yet.
    ///
    /// Extraction tools seed each value identical to its key, so equality
    /// marks the entry as raw. A human deliberately translating a key to
    /// itself is indistinguishable from that; the ambiguity is inherited
    /// from the format and left alone.
    pub fn is_raw(&self) -> bool {
        self.value.as_deref() == Some(self.key.as_str())
    }
}

impl fmt::Display for LocalizedString {
    /// Renders the canonical textual form: an optional comment line,
    /// then the key/value line. Unset fields render as empty quoted
    /// strings rather than erroring.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(comment) = &self.comment {
            writeln!(f, "/* {} */", comment)?;
        }
        writeln!(
            f,
            "\"{}\" = \"{}\";",
            self.key,
            self.value.as_deref().unwrap_or_default()
        )
    }
}
