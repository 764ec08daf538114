//! In-memory observation table.
//!
//! Cells are kept as text exactly as loaded. Numeric columns are parsed on
//! demand, so one table can serve the group column, the period column and
//! the metric column without a schema. A metric cell is *missing* when it is
//! empty or one of the markers in [`MISSING_MARKERS`]; any other text that
//! does not parse as a finite number is an error, never silently dropped.

use std::collections::BTreeSet;
use std::path::PathBuf;

use thiserror::Error;

/// Cell spellings treated as a missing observation.
///
/// `:` is the Eurostat "not available" marker.
pub const MISSING_MARKERS: &[&str] = &["", "NaN", "nan", "NA", "N/A", "null", ":"];

/// Errors from building, loading or querying an observation table.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("table has no header row")]
    Empty,

    #[error("unknown column '{column}'")]
    UnknownColumn { column: String },

    #[error("line {line}: column '{column}' has non-numeric value '{value}'")]
    InvalidNumber {
        line: usize,
        column: String,
        value: String,
    },

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// A flat table of text cells with named columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservationTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// Non-missing metric values for one group label.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSample {
    label: String,
    values: Vec<f64>,
    missing: usize,
}

impl GroupSample {
    /// A sample of already-clean values (no missing cells).
    pub fn new(label: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            values,
            missing: 0,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Rows of this group whose metric cell was missing.
    pub fn missing(&self) -> usize {
        self.missing
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}

impl ObservationTable {
    /// Build a table from headers and rows. Every row must have one cell per header.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, TableError> {
        if headers.is_empty() {
            return Err(TableError::Empty);
        }
        if let Some((row, cells)) = rows
            .iter()
            .enumerate()
            .find(|(_, cells)| cells.len() != headers.len())
        {
            return Err(TableError::RaggedRow {
                row,
                expected: headers.len(),
                found: cells.len(),
            });
        }
        Ok(Self { headers, rows })
    }

    /// Two-column table of (group label, metric value); `None` becomes an empty cell.
    pub fn from_pairs(group_col: &str, metric: &str, pairs: &[(&str, Option<f64>)]) -> Self {
        let rows = pairs
            .iter()
            .map(|(label, value)| {
                vec![
                    (*label).to_string(),
                    value.map(|v| v.to_string()).unwrap_or_default(),
                ]
            })
            .collect();
        Self {
            headers: vec![group_col.to_string(), metric.to_string()],
            rows,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Result<usize, TableError> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| TableError::UnknownColumn {
                column: name.to_string(),
            })
    }

    /// Text cells of one column, in row order.
    pub fn column(&self, name: &str) -> Result<impl Iterator<Item = &str> + '_, TableError> {
        let idx = self.column_index(name)?;
        Ok(self.rows.iter().map(move |row| row[idx].as_str()))
    }

    /// Parsed metric cells of one column, `None` for missing cells.
    pub fn numeric_column(&self, name: &str) -> Result<Vec<Option<f64>>, TableError> {
        let idx = self.column_index(name)?;
        self.rows
            .iter()
            .enumerate()
            .map(|(row, cells)| parse_cell(&cells[idx], row, name))
            .collect()
    }

    /// Whether `label` occurs at least once in `column`.
    pub fn contains_label(&self, column: &str, label: &str) -> Result<bool, TableError> {
        Ok(self.column(column)?.any(|cell| cell == label))
    }

    /// Sorted distinct values of a column.
    pub fn distinct(&self, column: &str) -> Result<Vec<String>, TableError> {
        let set: BTreeSet<&str> = self.column(column)?.collect();
        Ok(set.into_iter().map(String::from).collect())
    }

    /// Metric values of rows whose `group_col` equals `label`, missing cells dropped.
    ///
    /// An absent label yields an empty sample; callers that need to tell
    /// "unknown" from "all missing" check [`Self::contains_label`] first.
    pub fn group_sample(
        &self,
        metric: &str,
        group_col: &str,
        label: &str,
    ) -> Result<GroupSample, TableError> {
        let group_idx = self.column_index(group_col)?;
        let metric_idx = self.column_index(metric)?;

        let mut values = Vec::new();
        let mut missing = 0;
        for (row, cells) in self.rows.iter().enumerate() {
            if cells[group_idx] != label {
                continue;
            }
            match parse_cell(&cells[metric_idx], row, metric)? {
                Some(v) => values.push(v),
                None => missing += 1,
            }
        }

        Ok(GroupSample {
            label: label.to_string(),
            values,
            missing,
        })
    }

    /// Iterate (key, metric) pairs for two columns, skipping missing metric cells.
    pub(crate) fn keyed_values(
        &self,
        key_col: &str,
        metric: &str,
    ) -> Result<Vec<(&str, f64)>, TableError> {
        let key_idx = self.column_index(key_col)?;
        let metric_idx = self.column_index(metric)?;
        let mut out = Vec::with_capacity(self.rows.len());
        for (row, cells) in self.rows.iter().enumerate() {
            if let Some(v) = parse_cell(&cells[metric_idx], row, metric)? {
                out.push((cells[key_idx].as_str(), v));
            }
        }
        Ok(out)
    }
}

/// Parse one metric cell. `row` is the zero-based data row; errors report the
/// file line (header is line 1).
fn parse_cell(cell: &str, row: usize, column: &str) -> Result<Option<f64>, TableError> {
    let cell = cell.trim();
    if MISSING_MARKERS.contains(&cell) {
        return Ok(None);
    }
    match cell.parse::<f64>() {
        Ok(v) if v.is_nan() => Ok(None),
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(TableError::InvalidNumber {
            line: row + 2,
            column: column.to_string(),
            value: cell.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> ObservationTable {
        ObservationTable::new(
            vec!["geo".into(), "TIME_PERIOD".into(), "OBS_VALUE".into()],
            vec![
                vec!["DE".into(), "2020".into(), "773144".into()],
                vec!["DE".into(), "2021".into(), "795492".into()],
                vec!["FR".into(), "2020".into(), "".into()],
                vec!["FR".into(), "2021".into(), "742052".into()],
                vec!["IT".into(), "2021".into(), ":".into()],
            ],
        )
        .unwrap()
    }

    #[test]
    fn new_rejects_ragged_rows() {
        let err = ObservationTable::new(
            vec!["a".into(), "b".into()],
            vec![vec!["1".into(), "2".into()], vec!["3".into()]],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            TableError::RaggedRow {
                row: 1,
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn new_rejects_missing_headers() {
        assert!(matches!(
            ObservationTable::new(vec![], vec![]),
            Err(TableError::Empty)
        ));
    }

    #[test]
    fn group_sample_drops_missing_cells() {
        let table = sample_table();
        let fr = table.group_sample("OBS_VALUE", "geo", "FR").unwrap();
        assert_eq!(fr.values(), &[742052.0]);
        assert_eq!(fr.missing(), 1);

        let it = table.group_sample("OBS_VALUE", "geo", "IT").unwrap();
        assert!(it.is_empty());
        assert_eq!(it.missing(), 1);
    }

    #[test]
    fn group_sample_for_absent_label_is_empty() {
        let table = sample_table();
        let es = table.group_sample("OBS_VALUE", "geo", "ES").unwrap();
        assert!(es.is_empty());
        assert_eq!(es.missing(), 0);
        assert!(!table.contains_label("geo", "ES").unwrap());
    }

    #[test]
    fn unknown_column_is_reported() {
        let table = sample_table();
        let err = table.group_sample("births", "geo", "DE").unwrap_err();
        assert!(matches!(err, TableError::UnknownColumn { column } if column == "births"));
    }

    #[test]
    fn non_numeric_metric_reports_line() {
        let table = ObservationTable::new(
            vec!["geo".into(), "OBS_VALUE".into()],
            vec![
                vec!["DE".into(), "10".into()],
                vec!["DE".into(), "ten".into()],
            ],
        )
        .unwrap();
        let err = table.numeric_column("OBS_VALUE").unwrap_err();
        match err {
            TableError::InvalidNumber { line, value, .. } => {
                assert_eq!(line, 3);
                assert_eq!(value, "ten");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn nan_text_is_missing_but_infinity_is_invalid() {
        assert_eq!(parse_cell("NaN", 0, "m").unwrap(), None);
        assert_eq!(parse_cell(" 12.5 ", 0, "m").unwrap(), Some(12.5));
        assert!(parse_cell("inf", 0, "m").is_err());
    }

    #[test]
    fn distinct_is_sorted() {
        let table = sample_table();
        assert_eq!(table.distinct("geo").unwrap(), vec!["DE", "FR", "IT"]);
    }

    #[test]
    fn from_pairs_round_trips_missing_values() {
        let table = ObservationTable::from_pairs("g", "m", &[("a", Some(1.5)), ("a", None)]);
        let a = table.group_sample("m", "g", "a").unwrap();
        assert_eq!(a.values(), &[1.5]);
        assert_eq!(a.missing(), 1);
    }
}
