use clap::Parser;
use std::path::PathBuf;

use crate::error::{IngestError, Result};

/// Load a delimiter-separated file, checking first that it exists.
#[derive(Debug, Parser)]
#[command(name = "csv-ingest", version)]
pub struct Args {
    /// File to read; the first line is the header.
    #[arg(short, long, env = "CSV_INGEST_INPUT")]
    pub input: PathBuf,

    /// Where to write the loaded rows back out. Nothing is written if unset.
    #[arg(short, long, env = "CSV_INGEST_OUTPUT")]
    pub output: Option<PathBuf>,

    #[arg(short, long, env = "CSV_INGEST_DELIMITER", default_value = ";")]
    pub delimiter: String,
}

impl Args {
    pub fn delimiter_byte(&self) -> Result<u8> {
        match self.delimiter.as_bytes() {
            [b] if b.is_ascii() => Ok(*b),
            _ => Err(IngestError::InvalidDelimiter(self.delimiter.clone())),
        }
    }
}
