use crate::data::{Cell, Dataset};
use csv::ReaderBuilder;
use std::collections::HashSet;
use std::io::Read;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Failed to read CSV headers")]
    Headers(#[source] csv::Error),
    #[error("Failed to read CSV record at line {line}")]
    Record {
        line: u64,
        #[source]
        source: csv::Error,
    },
    #[error("CSV must contain a header row")]
    NoColumns,
    #[error("CSV must contain at least one data row")]
    NoRows,
}

/// Parse CSV bytes with a header row into a typed dataset.
///
/// Rows shorter than the header are padded with `Cell::Missing`; fields past
/// the last header column are dropped. Blank lines are skipped.
pub fn read_dataset<R: Read>(reader: R) -> Result<Dataset, IngestError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .map_err(IngestError::Headers)?
        .iter()
        .map(|s| s.to_string())
        .collect();

    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(IngestError::NoColumns);
    }
    let columns = dedupe_headers(headers);

    let mut rows = Vec::new();
    let mut truncated = 0usize;
    for result in reader.records() {
        let record = result.map_err(|source| IngestError::Record {
            line: source.position().map(|p| p.line()).unwrap_or(0),
            source,
        })?;
        if record.len() > columns.len() {
            truncated += 1;
        }
        let row: Vec<Cell> = record
            .iter()
            .take(columns.len())
            .map(Cell::from_raw)
            .collect();
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(IngestError::NoRows);
    }
    if truncated > 0 {
        warn!(rows = truncated, "Dropped fields beyond the header width");
    }

    debug!(columns = columns.len(), rows = rows.len(), "Parsed CSV dataset");
    Ok(Dataset::new(columns, rows))
}

/// Rename repeated header names to `name_1`, `name_2`, ... so every column
/// stays addressable by name
fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut columns = Vec::with_capacity(headers.len());
    for header in headers {
        let mut name = header.clone();
        let mut suffix = 1;
        while seen.contains(&name) {
            name = format!("{}_{}", header, suffix);
            suffix += 1;
        }
        seen.insert(name.clone());
        columns.push(name);
    }
    columns
}
