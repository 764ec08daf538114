//! BirthLab TUI - interactive menu over a births table
//!
//! Screens:
//! - Births per year (line chart)
//! - Selected countries and top 10 countries (bar charts)
//! - Cleaned log-scale and raw-count histograms with normal overlays
//! - Two-country hypothesis test with verdict and box plot
//!
//! The chart widgets in [`panels`] are also used by the `birthlab` CLI to
//! draw inline charts.

pub mod app;
pub mod input;
pub mod panels;
pub mod theme;
pub mod ui;
pub mod views;

pub use app::{App, Screen, StatusLevel};
pub use input::handle_key;
pub use theme::Theme;

#[cfg(test)]
mod test_helpers;
