//! CSV loading for observation tables.
//!
//! The file must have a header row. Cells are whitespace-trimmed and every
//! record must have the same number of fields as the header.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use super::table::{ObservationTable, TableError};

impl ObservationTable {
    /// Parse a CSV stream with a header row.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, TableError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = rdr
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').to_string())
            .collect();
        if headers.iter().all(String::is_empty) {
            return Err(TableError::Empty);
        }

        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            rows.push(record.iter().map(String::from).collect());
        }

        Self::new(headers, rows)
    }

    /// Read and parse a CSV file.
    pub fn from_path(path: &Path) -> Result<Self, TableError> {
        let file = File::open(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }
}

/// Load the observation table at `path`.
pub fn load_table(path: &Path) -> Result<ObservationTable, TableError> {
    let table = ObservationTable::from_path(path)?;
    debug!(
        path = %path.display(),
        rows = table.len(),
        columns = table.headers().len(),
        "loaded observation table"
    );
    Ok(table)
}
