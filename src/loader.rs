//! Table loader - reads a comma- or tab-delimited export into a [`Table`].

use crate::error::{JoinError, Result};
use crate::normalize::normalize_row_key;
use crate::row::{Row, Table};
use crate::schema::ColumnSchema;
use csv::ReaderBuilder;
use std::path::Path;
use tracing::{error, info, warn};

/// Number of leading characters inspected when choosing the delimiter.
pub const SNIFF_LEN: usize = 1024;

const BOM: char = '\u{feff}';

/// Tab if the first [`SNIFF_LEN`] characters contain one, comma otherwise.
pub fn sniff_delimiter(text: &str) -> u8 {
    if text.chars().take(SNIFF_LEN).any(|c| c == '\t') {
        b'\t'
    } else {
        b','
    }
}

/// Parse delimited text. The first record is the header; every later record is
/// mapped onto it by position and gets its key column normalized.
pub fn parse_table(
    text: &str,
    delimiter: u8,
    schema: &ColumnSchema,
) -> std::result::Result<Table, csv::Error> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    let headers = rdr
        .headers()?
        .iter()
        .map(|h| h.to_string())
        .collect::<Vec<_>>();

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        // Short records leave trailing columns absent; surplus fields are dropped.
        let mut row: Row = headers
            .iter()
            .zip(record.iter())
            .map(|(header, cell)| (header.as_str(), cell))
            .collect();
        normalize_row_key(&mut row, schema);
        rows.push(row);
    }

    Ok(Table::new(headers, rows))
}

/// Load a table, reporting failures to the caller.
pub fn try_load_table(path: &Path, schema: &ColumnSchema) -> Result<Table> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(JoinError::MissingFile {
                path: path.to_path_buf(),
            });
        }
        Err(e) => return Err(JoinError::read(path, e)),
    };
    let text = String::from_utf8(bytes).map_err(|e| JoinError::read(path, e))?;
    let text = text.strip_prefix(BOM).unwrap_or(&text);

    let table = parse_table(text, sniff_delimiter(text), schema)
        .map_err(|e| JoinError::read(path, e))?;
    info!("{}: {} rows loaded", path.display(), table.len());
    Ok(table)
}

/// Load a table, degrading to an empty one on any failure.
pub fn load_table(path: &Path, schema: &ColumnSchema) -> Table {
    match try_load_table(path, schema) {
        Ok(table) => table,
        Err(e @ JoinError::MissingFile { .. }) => {
            warn!("{}", e);
            Table::default()
        }
        Err(e) => {
            error!("{}", e);
            Table::default()
        }
    }
}
