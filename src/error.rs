use std::{io, path::PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, IngestError>;

#[derive(Debug, Error)]
pub enum IngestError {
    /// Nothing exists at the configured input path.
    #[error("input file not found: {}", .path.display())]
    MissingInput { path: PathBuf },

    /// Malformed delimited content, including rows whose field count
    /// differs from the header count.
    #[error("failed to parse {}{}: {source}", .path.display(), line_suffix(.source))]
    Parse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("duplicate column in header: {column}")]
    DuplicateHeader { column: String },

    #[error("delimiter must be a single ASCII character, got {0:?}")]
    InvalidDelimiter(String),

    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn line_suffix(err: &csv::Error) -> String {
    match err.position() {
        Some(pos) => format!(" at line {}", pos.line()),
        None => String::new(),
    }
}
