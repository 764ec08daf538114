//! Integration tests for the load → aggregate → compare pipeline using the
//! frozen Eurostat-layout fixture.

use std::io::Write;
use std::path::PathBuf;

use birthlab_core::data::{country_codes, metric_values, top_n, totals_by, totals_by_period, totals_for};
use birthlab_core::stats::{compare, interpret, report, Alternative, ComparisonRequest, StatsError};
use birthlab_core::{load_table, ObservationTable, Settings, TableError};

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/births_sample.csv")
}

fn load_fixture() -> ObservationTable {
    load_table(&fixture_path()).unwrap()
}

#[test]
fn fixture_loads_with_expected_shape() {
    let table = load_fixture();
    assert_eq!(table.len(), 64);
    assert_eq!(table.headers().len(), 8);

    // SE 2019 is blank and must not count as a value.
    let se = table.group_sample("OBS_VALUE", "geo", "SE").unwrap();
    assert_eq!(se.len(), 7);
    assert_eq!(se.missing(), 1);
    assert_eq!(metric_values(&table, "OBS_VALUE").unwrap().len(), 63);
}

#[test]
fn country_codes_skip_aggregate_regions() {
    let table = load_fixture();
    let codes = country_codes(&table, "geo").unwrap();
    assert_eq!(codes, vec!["DE", "ES", "FR", "IT", "NL", "PL", "SE"]);
}

#[test]
fn yearly_totals_cover_every_period() {
    let table = load_fixture();
    let settings = Settings::default();
    let totals = totals_by_period(&table, &settings.columns).unwrap();
    let years: Vec<&str> = totals.iter().map(|(y, _)| y.as_str()).collect();
    assert_eq!(years, vec!["2015", "2016", "2017", "2018", "2019", "2020", "2021", "2022"]);
    assert!(totals.iter().all(|(_, total)| *total > 0.0));
}

#[test]
fn top_countries_are_ranked_largest_first() {
    let table = load_fixture();
    let by_geo = totals_by(&table, "geo", "OBS_VALUE").unwrap();
    let top = top_n(&by_geo, 3);
    assert_eq!(top.len(), 3);
    assert_eq!(top[0].0, "EU27_2020");
    assert_eq!(top[1].0, "DE");
    assert!(top[1].1 > top[2].1);

    let selected = totals_for(
        &table,
        &Settings::default().columns,
        &["SE".to_string(), "DE".to_string(), "XX".to_string()],
    )
    .unwrap();
    let keys: Vec<&str> = selected.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, vec!["DE", "SE"]);
}

#[test]
fn germany_has_more_births_than_sweden() {
    let table = load_fixture();
    let request = ComparisonRequest::new("OBS_VALUE", "geo", "DE", "SE").alternative(Alternative::Greater);
    let result = compare(&table, &request).unwrap();

    assert!(result.significant);
    assert_eq!(result.n1, 8);
    assert_eq!(result.n2, 7);
    assert_eq!(result.degrees_of_freedom, 13.0);
    assert!(result.group1_mean > result.group2_mean);

    let verdict = interpret(&result, &Settings::default().verdict_format()).unwrap();
    assert!(verdict.contains("Reject the null hypothesis"));
    let lines = report(&result, &Default::default()).unwrap();
    assert!(lines[1].starts_with("Group DE mean:"));
    assert!(lines[2].contains("(n = 7)"));
}

#[test]
fn unknown_country_is_reported_by_name() {
    let table = load_fixture();
    let request = ComparisonRequest::new("OBS_VALUE", "geo", "DE", "ZZ");
    match compare(&table, &request).unwrap_err() {
        StatsError::UnknownGroup { group, column } => {
            assert_eq!(group, "ZZ");
            assert_eq!(column, "geo");
        }
        other => panic!("expected UnknownGroup, got {other:?}"),
    }
}

#[test]
fn csv_written_to_disk_round_trips_through_loader() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "geo,TIME_PERIOD,OBS_VALUE").unwrap();
    for (geo, value) in [("AA", 10), ("AA", 12), ("AA", 11), ("AA", 13), ("BB", 20), ("BB", 19), ("BB", 21), ("BB", 22)] {
        writeln!(file, "{geo},2020,{value}").unwrap();
    }
    file.flush().unwrap();

    let table = load_table(file.path()).unwrap();
    let result = compare(&table, &ComparisonRequest::new("OBS_VALUE", "geo", "AA", "BB")).unwrap();
    assert!(result.significant);
    assert!((result.group1_mean - 11.5).abs() < 1e-12);
    assert!((result.group2_mean - 20.5).abs() < 1e-12);
}

#[test]
fn non_numeric_metric_is_located() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "geo,OBS_VALUE\nAA,1\nAA,lots\n").unwrap();
    file.flush().unwrap();

    let table = load_table(file.path()).unwrap();
    let err = table.numeric_column("OBS_VALUE").unwrap_err();
    assert!(matches!(err, TableError::InvalidNumber { line: 3, ref value, .. } if value == "lots"));
}

#[test]
fn settings_file_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("birthlab.toml");
    std::fs::write(
        &path,
        "data_path = \"births.csv\"\n\n[hypothesis]\nalpha = 0.01\nalpha_decimals = 2\n",
    )
    .unwrap();

    let settings = Settings::discover(Some(&path)).unwrap();
    assert_eq!(settings.data_path, PathBuf::from("births.csv"));
    assert_eq!(settings.hypothesis.alpha, 0.01);
    assert_eq!(settings.verdict_format().format_alpha(0.01), "0.01");

    assert!(Settings::discover(Some(&dir.path().join("missing.toml"))).is_err());
}
