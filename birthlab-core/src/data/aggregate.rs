//! Column aggregates feeding the trend, country and distribution views.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::table::{ObservationTable, TableError};
use crate::config::ColumnNames;

/// (key, total) pairs.
pub type Totals = Vec<(String, f64)>;

/// Sum of non-missing metric values per distinct key, ordered by key.
pub fn totals_by(table: &ObservationTable, key_col: &str, metric: &str) -> Result<Totals, TableError> {
    let mut sums: BTreeMap<&str, f64> = BTreeMap::new();
    for (key, value) in table.keyed_values(key_col, metric)? {
        *sums.entry(key).or_insert(0.0) += value;
    }
    Ok(sums.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
}

/// Total births per period (year), in period order.
pub fn totals_by_period(table: &ObservationTable, columns: &ColumnNames) -> Result<Totals, TableError> {
    totals_by(table, &columns.period, &columns.metric)
}

/// Totals of the selected groups only, largest first.
///
/// Groups with no non-missing values do not appear.
pub fn totals_for(
    table: &ObservationTable,
    columns: &ColumnNames,
    groups: &[String],
) -> Result<Totals, TableError> {
    let mut selected: Totals = totals_by(table, &columns.group, &columns.metric)?
        .into_iter()
        .filter(|(key, _)| groups.iter().any(|g| g == key))
        .collect();
    sort_descending(&mut selected);
    Ok(selected)
}

/// The `n` largest totals, largest first. Ties keep key order.
pub fn top_n(totals: &[(String, f64)], n: usize) -> Totals {
    let mut sorted = totals.to_vec();
    sort_descending(&mut sorted);
    sorted.truncate(n);
    sorted
}

/// Sorted distinct group labels that are two-letter country codes.
///
/// Aggregate regions such as `EU27_2020` or `EA20` are excluded.
pub fn country_codes(table: &ObservationTable, group_col: &str) -> Result<Vec<String>, TableError> {
    Ok(table
        .distinct(group_col)?
        .into_iter()
        .filter(|label| is_country_code(label))
        .collect())
}

/// Every non-missing metric value, in row order.
pub fn metric_values(table: &ObservationTable, metric: &str) -> Result<Vec<f64>, TableError> {
    Ok(table.numeric_column(metric)?.into_iter().flatten().collect())
}

fn is_country_code(label: &str) -> bool {
    label.len() == 2 && label.bytes().all(|b| b.is_ascii_uppercase())
}

fn sort_descending(totals: &mut Totals) {
    totals.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
}
