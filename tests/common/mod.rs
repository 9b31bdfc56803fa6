#![allow(dead_code)]

use std::fmt::Write as FmtWrite;
use std::fs;
use std::path::{Path, PathBuf};

use trade_dashboard::{Variable, Year, YearRange};

pub const OUTLIER: &str = "China, P.R.: Mainland";

/// Write an indicator sheet export: header, one header-artifact row, then one
/// row per country. `value` supplies each source cell; `None` leaves it empty.
pub fn write_indicator_csv<F>(
    dir: &Path,
    countries: &[String],
    years: YearRange,
    value: F,
) -> PathBuf
where
    F: Fn(usize, Variable, Year) -> Option<f64>,
{
    let mut csv = String::from("Country,Mapped_Country");
    for year in years.years() {
        for variable in Variable::SOURCE {
            write!(csv, ",{}", variable.column(year)).unwrap();
        }
    }
    csv.push('\n');

    csv.push_str("Country Name,Country Code");
    for _ in years.years() {
        csv.push_str(",US$ millions,US$ millions,US$ millions,%");
    }
    csv.push('\n');

    for (row, country) in countries.iter().enumerate() {
        write!(csv, "\"{country}\",C{row:03}").unwrap();
        for year in years.years() {
            for variable in Variable::SOURCE {
                match value(row, variable, year) {
                    Some(v) => write!(csv, ",{v}").unwrap(),
                    None => csv.push(','),
                }
            }
        }
        csv.push('\n');
    }

    let path = dir.join("indicators.csv");
    fs::write(&path, csv).unwrap();
    path
}

/// 114 countries laid out like the source sheet, with the outlier at row 5.
pub fn sheet_countries() -> Vec<String> {
    (0..114)
        .map(|i| {
            if i == 5 {
                OUTLIER.to_string()
            } else {
                format!("Country {i:03}")
            }
        })
        .collect()
}

/// Deterministic values: grow with row and year, the outlier is huge.
pub fn sheet_value(row: usize, variable: Variable, year: Year) -> Option<f64> {
    if row == 5 {
        return Some(1.0e9);
    }
    let base = (row as f64 + 1.0) * 10.0 + (year - 2014) as f64;
    Some(match variable {
        Variable::Exports => base,
        Variable::Imports => base * 2.0,
        Variable::Gdp => base * 10.0,
        Variable::Inflation => 2.0 + row as f64 / 100.0,
        Variable::Openness => unreachable!("openness is derived"),
    })
}
