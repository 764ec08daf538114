//! Observation table, CSV loading and aggregates.

pub mod aggregate;
pub mod loader;
pub mod table;

pub use aggregate::{
    country_codes, metric_values, top_n, totals_by, totals_by_period, totals_for, Totals,
};
pub use loader::load_table;
pub use table::{GroupSample, ObservationTable, TableError};
