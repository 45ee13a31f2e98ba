pub mod config;
pub mod error;
pub mod records;

use tracing::debug;

use config::Args;
use error::Result;
use records::Dataset;

/// Runs one ingestion: existence gate, load, then the optional write-back.
pub fn run(args: &Args) -> Result<Dataset> {
    let delimiter = args.delimiter_byte()?;
    let dataset = records::ingest(&args.input, delimiter)?;

    match &args.output {
        Some(output) => records::write(output, &dataset, delimiter)?,
        None => debug!("no output path configured, skipping write"),
    }

    Ok(dataset)
}
