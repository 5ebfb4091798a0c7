//! All error types for the stringsync crate.
//!
//! Malformed table lines are not errors; the parser skips them. Errors here
//! cover file access, text decoding, and external extraction tools.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot decode `{}` as UTF-16 or UTF-8", path.display())]
    Decode { path: PathBuf },

    #[error("cannot write `{}`: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} failed: {message}")]
    Extractor { tool: String, message: String },
}

impl Error {
    /// Creates an extraction-tool error for the named tool.
    pub fn extractor(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Extractor {
            tool: tool.into(),
            message: message.into(),
        }
    }
}
