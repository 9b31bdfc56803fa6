mod common;

use std::fs;

use polars::prelude::*;
use tempfile::TempDir;
use trade_dashboard::indicator::compute_openness;
use trade_dashboard::{DashboardConfig, DashboardError, Dataset, Variable, YearRange};

use common::{sheet_countries, sheet_value, write_indicator_csv};

#[test]
fn loads_sheet_and_drops_header_artifact() {
    let dir = TempDir::new().unwrap();
    let countries = sheet_countries();
    let path = write_indicator_csv(dir.path(), &countries, YearRange::default(), sheet_value);

    let dataset = Dataset::load(&path, &DashboardConfig::default()).unwrap();

    assert_eq!(dataset.height(), 114);
    assert_eq!(dataset.countries().unwrap(), countries);
    assert!(dataset.frame().column("Mapped_Country").is_err());
    for year in YearRange::default().years() {
        let openness = dataset.frame().column(&Variable::Openness.column(year)).unwrap();
        assert_eq!(openness.dtype(), &DataType::Float64);
    }
}

#[test]
fn derived_openness_matches_formula_for_every_record_and_year() {
    let dir = TempDir::new().unwrap();
    let path = write_indicator_csv(
        dir.path(),
        &sheet_countries(),
        YearRange::default(),
        sheet_value,
    );
    let dataset = Dataset::load(&path, &DashboardConfig::default()).unwrap();

    for record in dataset.records().unwrap() {
        for year in dataset.years().years() {
            let exports = record.value(Variable::Exports, year).unwrap();
            let imports = record.value(Variable::Imports, year).unwrap();
            let gdp = record.value(Variable::Gdp, year).unwrap();
            let expected = (exports + imports) / 2.0 / gdp * 100.0;

            let derived = record.openness(year).unwrap();
            assert!((derived - expected).abs() < 1e-9, "{} {year}", record.country);
            assert_eq!(compute_openness(&record, year), Some(derived));
        }
    }
}

#[test]
fn unparseable_and_zero_cells_become_missing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("indicators.csv");
    fs::write(
        &path,
        "Country,Mapped_Country,Exports_2020,Imports_2020,GDP_2020,Inflation_2020\n\
         Country,Code,US$,US$,US$,%\n\
         Kenya,KEN,10,30,0,..\n\
         Peru,PER,n/a,4,50,3.5\n\
         Chile,CHL,5,5,,1\n",
    )
    .unwrap();
    let config = DashboardConfig {
        years: YearRange::new(2020, 2020),
        ..DashboardConfig::default()
    };

    let dataset = Dataset::load(&path, &config).unwrap();

    let kenya = dataset.record("Kenya").unwrap().unwrap();
    assert_eq!(kenya.value(Variable::Gdp, 2020), Some(0.0));
    assert_eq!(kenya.value(Variable::Inflation, 2020), None);
    assert_eq!(kenya.openness(2020), None);

    let peru = dataset.record("Peru").unwrap().unwrap();
    assert_eq!(peru.value(Variable::Exports, 2020), None);
    assert_eq!(peru.openness(2020), None);

    let chile = dataset.record("Chile").unwrap().unwrap();
    assert_eq!(chile.value(Variable::Gdp, 2020), None);
    assert_eq!(chile.openness(2020), None);
}

#[test]
fn trailing_rows_without_country_are_dropped() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("indicators.csv");
    fs::write(
        &path,
        "Country,Exports_2020,Imports_2020,GDP_2020,Inflation_2020\n\
         Country,US$,US$,US$,%\n\
         Kenya,1,2,3,4\n\
         ,,,,\n\
         ,,,,\n",
    )
    .unwrap();
    let config = DashboardConfig {
        years: YearRange::new(2020, 2020),
        ..DashboardConfig::default()
    };

    let dataset = Dataset::load(&path, &config).unwrap();
    assert_eq!(dataset.countries().unwrap(), vec!["Kenya".to_string()]);
}

#[test]
fn missing_indicator_column_aborts_load() {
    let dir = TempDir::new().unwrap();
    let path = write_indicator_csv(
        dir.path(),
        &sheet_countries(),
        YearRange::new(2014, 2021),
        sheet_value,
    );

    let err = Dataset::load(&path, &DashboardConfig::default()).unwrap_err();
    assert!(matches!(err, DashboardError::MissingColumn(c) if c == "Exports_2022"));
}

#[test]
fn unreadable_source_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.csv");
    assert!(Dataset::load(&missing, &DashboardConfig::default()).is_err());
}

#[test]
fn parquet_source_loads_like_csv() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("indicators.parquet");

    let mut raw = df!(
        "Country" => ["Kenya", "Peru"],
        "Exports_2020" => [Some(10.0), None],
        "Imports_2020" => [30.0, 4.0],
        "GDP_2020" => [200.0, 50.0],
        "Inflation_2020" => [6.1, 3.5],
    )
    .unwrap();
    let file = fs::File::create(&path).unwrap();
    ParquetWriter::new(file).finish(&mut raw).unwrap();

    let config = DashboardConfig {
        years: YearRange::new(2020, 2020),
        skip_rows: 0,
        ..DashboardConfig::default()
    };
    let dataset = Dataset::load(&path, &config).unwrap();

    assert_eq!(dataset.height(), 2);
    let kenya = dataset.record("Kenya").unwrap().unwrap();
    assert_eq!(kenya.openness(2020), Some(10.0));
    let peru = dataset.record("Peru").unwrap().unwrap();
    assert_eq!(peru.openness(2020), None);
}
