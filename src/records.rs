use serde::{Serialize, Serializer};
use std::{
    collections::HashSet,
    fs::File,
    io::{Read, Write},
    path::Path,
};
use tracing::{debug, info};

use crate::error::{IngestError, Result};

pub const DEFAULT_DELIMITER: u8 = b';';

/// One parsed record, mapping each header to its field value in header order.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct Row {
    fields: Vec<(String, String)>,
}

impl Row {
    pub fn new<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Row {
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(header, _)| header == column)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// Rows go out as a plain sequence of values; the header line is written
// separately by `write_dataset`.
impl Serialize for Row {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.fields.iter().map(|(_, value)| value))
    }
}

/// Every row of one file, in file order, along with the header line.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Reports whether anything exists at `path`. Unreadable entries still count.
pub fn check_exists<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().exists()
}

/// Existence-checked ingestion: fails with `MissingInput` before touching
/// the file if nothing is there.
pub fn ingest<P: AsRef<Path>>(path: P, delimiter: u8) -> Result<Dataset> {
    let path = path.as_ref();
    if !check_exists(path) {
        return Err(IngestError::MissingInput {
            path: path.to_path_buf(),
        });
    }
    load(path, delimiter)
}

pub fn load<P: AsRef<Path>>(path: P, delimiter: u8) -> Result<Dataset> {
    let path = path.as_ref();
    let sep = delimiter as char;
    debug!(path = %path.display(), delimiter = %sep, "opening input");

    let file = File::open(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let dataset = read_dataset(file, delimiter).map_err(|err| at_path(err, path))?;

    info!(
        path = %path.display(),
        columns = dataset.headers().len(),
        rows = dataset.len(),
        "loaded dataset"
    );
    Ok(dataset)
}

/// Parses delimited text whose first line is the header. A row whose field
/// count differs from the header count is an error; nothing is padded or
/// dropped.
pub fn read_dataset<R: Read>(reader: R, delimiter: u8) -> Result<Dataset> {
    // The CSV reader is buffered already.
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(false)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()
        .map_err(parse_error)?
        .iter()
        .map(str::to_owned)
        .collect();

    let mut seen = HashSet::new();
    for column in &headers {
        if !seen.insert(column.as_str()) {
            return Err(IngestError::DuplicateHeader {
                column: column.clone(),
            });
        }
    }

    let mut rows = Vec::new();
    for result in rdr.deserialize::<Vec<String>>() {
        let values = result.map_err(parse_error)?;
        rows.push(Row::new(headers.iter().cloned().zip(values)));
    }

    Ok(Dataset { headers, rows })
}

pub fn write<P: AsRef<Path>>(path: P, dataset: &Dataset, delimiter: u8) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    write_dataset(file, dataset, delimiter).map_err(|err| at_path(err, path))?;

    info!(path = %path.display(), rows = dataset.len(), "wrote dataset");
    Ok(())
}

pub fn write_dataset<W: Write>(writer: W, dataset: &Dataset, delimiter: u8) -> Result<()> {
    if dataset.headers().is_empty() {
        return Ok(());
    }

    let mut wtr = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(dataset.headers()).map_err(parse_error)?;
    for row in dataset {
        wtr.serialize(row).map_err(parse_error)?;
    }

    wtr.flush().map_err(|source| IngestError::Io {
        path: Default::default(),
        source,
    })?;
    Ok(())
}

fn parse_error(source: csv::Error) -> IngestError {
    IngestError::Parse {
        path: Default::default(),
        source,
    }
}

// Reader/writer helpers don't know which file they're on; fill it in.
fn at_path(err: IngestError, path: &Path) -> IngestError {
    match err {
        IngestError::Parse { source, .. } => IngestError::Parse {
            path: path.to_path_buf(),
            source,
        },
        IngestError::Io { source, .. } => IngestError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    }
}
