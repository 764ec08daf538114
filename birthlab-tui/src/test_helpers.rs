//! Shared fixtures for unit tests.

use birthlab_core::{ObservationTable, Settings};

use crate::app::App;

pub const SAMPLE_CSV: &str = "\
geo,TIME_PERIOD,OBS_VALUE
DE,2019,10
DE,2020,12
DE,2021,11
DE,2022,13
FR,2019,20
FR,2020,19
FR,2021,21
FR,2022,22
IT,2022,5
EU27_2020,2022,1000
";

pub fn sample_table() -> ObservationTable {
    ObservationTable::from_reader(SAMPLE_CSV.as_bytes()).expect("sample CSV parses")
}

pub fn sample_app() -> App {
    App::new(Settings::default(), sample_table())
}
