use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::path::Path;

use polars::prelude::*;
use tracing::{info, warn};

use crate::config::DashboardConfig;
use crate::error::{DashboardError, Result};
use crate::indicator::openness_expr;
use crate::schema::{columns, Variable, Year, YearRange};

/// One country's indicators, including the derived openness.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryRecord {
    pub country: String,
    values: BTreeMap<(Variable, Year), f64>,
}

impl CountryRecord {
    /// `None` for a missing cell or a year outside the loaded range.
    pub fn value(&self, variable: Variable, year: Year) -> Option<f64> {
        self.values.get(&(variable, year)).copied()
    }

    pub fn openness(&self, year: Year) -> Option<f64> {
        self.value(Variable::Openness, year)
    }
}

/// The indicator table, loaded once and read-only afterwards.
///
/// Holds `Country` plus `{Exports,Imports,GDP,Inflation,Openness}_{year}` Float64
/// columns for every year in range; missing cells are nulls.
#[derive(Debug, Clone)]
pub struct Dataset {
    frame: DataFrame,
    years: YearRange,
}

impl Dataset {
    /// Read a `.csv` or `.parquet` export of the indicator sheet and prepare it.
    pub fn load(path: impl AsRef<Path>, config: &DashboardConfig) -> Result<Self> {
        let path = path.as_ref();
        let raw = read_table(path)?;
        info!(
            path = %path.display(),
            rows = raw.height(),
            columns = raw.width(),
            "read indicator table"
        );
        Self::from_frame(raw, config)
    }

    /// Clean a raw table and derive openness for every configured year.
    pub fn from_frame(raw: DataFrame, config: &DashboardConfig) -> Result<Self> {
        config.validate()?;
        let years = config.years;

        let mut df = trim_column_names(raw)?;

        let source_columns = years.source_columns();
        let mut required: Vec<&str> = vec![columns::COUNTRY];
        required.extend(source_columns.iter().map(String::as_str));
        require_columns(&df, &required)?;

        // Leading rows are header artifacts in the source sheet.
        let skip = config.skip_rows.min(df.height());
        df = df.slice(skip as i64, df.height() - skip);

        for name in &config.ignored_columns {
            if df.column(name).is_ok() {
                df = df.drop(name)?;
            }
        }

        let df = coerce_numeric(df, &source_columns)?;
        let df = normalize_countries(df)?;

        let frame = df
            .lazy()
            .with_columns(years.years().map(openness_expr).collect::<Vec<_>>())
            .collect()?;

        info!(
            countries = frame.height(),
            first_year = years.first,
            last_year = years.last,
            "dataset ready"
        );

        Ok(Self { frame, years })
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn years(&self) -> YearRange {
        self.years
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    /// Country names in row order.
    pub fn countries(&self) -> Result<Vec<String>> {
        Ok(self
            .frame
            .column(columns::COUNTRY)?
            .str()?
            .into_iter()
            .map(|c| c.unwrap_or_default().to_string())
            .collect())
    }

    pub fn records(&self) -> Result<Vec<CountryRecord>> {
        let names = self.frame.column(columns::COUNTRY)?.str()?;
        let cells = self.indicator_columns()?;
        Ok((0..self.height())
            .map(|row| build_record(names, &cells, row))
            .collect())
    }

    pub fn record(&self, country: &str) -> Result<Option<CountryRecord>> {
        let names = self.frame.column(columns::COUNTRY)?.str()?;
        let Some(row) = names.into_iter().position(|c| c == Some(country)) else {
            return Ok(None);
        };
        let cells = self.indicator_columns()?;
        Ok(Some(build_record(names, &cells, row)))
    }

    fn indicator_columns(&self) -> Result<Vec<(Variable, Year, &Float64Chunked)>> {
        let mut cells = Vec::with_capacity(self.years.len() * Variable::ALL.len());
        for year in self.years.years() {
            for variable in Variable::ALL {
                let ca = self.frame.column(&variable.column(year))?.f64()?;
                cells.push((variable, year, ca));
            }
        }
        Ok(cells)
    }
}

fn build_record(
    names: &StringChunked,
    cells: &[(Variable, Year, &Float64Chunked)],
    row: usize,
) -> CountryRecord {
    let values = cells
        .iter()
        .filter_map(|(variable, year, ca)| ca.get(row).map(|v| ((*variable, *year), v)))
        .collect();
    CountryRecord {
        country: names.get(row).unwrap_or_default().to_string(),
        values,
    }
}

// ── Loading helpers ─────────────────────────────────────────────────────────

fn read_table(path: &Path) -> Result<DataFrame> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("csv") => read_csv_as_strings(path),
        Some("parquet") => {
            let file = File::open(path)?;
            Ok(ParquetReader::new(file).finish()?)
        }
        _ => Err(DashboardError::UnsupportedFormat(path.display().to_string())),
    }
}

/// Read a CSV file with all columns as String dtype.
fn read_csv_as_strings(path: &Path) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0)) // all columns as String
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    Ok(df)
}

fn trim_column_names(mut df: DataFrame) -> Result<DataFrame> {
    let trimmed: Vec<String> = df
        .get_column_names_str()
        .iter()
        .map(|c| c.trim().to_string())
        .collect();
    df.set_column_names(trimmed.as_slice())?;
    Ok(df)
}

fn require_columns(df: &DataFrame, required: &[&str]) -> Result<()> {
    for &col_name in required {
        if df.column(col_name).is_err() {
            return Err(DashboardError::MissingColumn(col_name.to_string()));
        }
    }
    Ok(())
}

/// Cast indicator columns to Float64. Unparseable and non-finite cells become null.
fn coerce_numeric(df: DataFrame, names: &[String]) -> Result<DataFrame> {
    let mut exprs = Vec::with_capacity(names.len());
    for name in names {
        let parsed = match df.column(name)?.dtype() {
            DataType::String => col(name.as_str())
                .str()
                .strip_chars(lit(" \t\r\n"))
                .cast(DataType::Float64),
            _ => col(name.as_str()).cast(DataType::Float64),
        };
        exprs.push(
            when(parsed.clone().is_finite())
                .then(parsed)
                .otherwise(lit(NULL).cast(DataType::Float64))
                .alias(name.as_str()),
        );
    }
    Ok(df.lazy().with_columns(exprs).collect()?)
}

/// Trim country names, drop trailing unnamed rows and reject gaps or duplicates.
fn normalize_countries(df: DataFrame) -> Result<DataFrame> {
    let df = df
        .lazy()
        .with_columns([col(columns::COUNTRY)
            .cast(DataType::String)
            .str()
            .strip_chars(lit(" \t\r\n"))])
        .collect()?;

    let named: Vec<bool> = df
        .column(columns::COUNTRY)?
        .str()?
        .into_iter()
        .map(|c| c.is_some_and(|s| !s.is_empty()))
        .collect();

    let last = named
        .iter()
        .rposition(|n| *n)
        .ok_or_else(|| DashboardError::InvalidData("table contains no countries".into()))?;

    if let Some(row) = named[..=last].iter().position(|n| !n) {
        return Err(DashboardError::InvalidData(format!(
            "row {row} has no country name"
        )));
    }

    let df = if last + 1 < df.height() {
        warn!(
            dropped = df.height() - last - 1,
            "dropping trailing rows without a country name"
        );
        df.slice(0, last + 1)
    } else {
        df
    };

    let mut seen = HashSet::new();
    for name in df.column(columns::COUNTRY)?.str()?.into_iter().flatten() {
        if !seen.insert(name) {
            return Err(DashboardError::InvalidData(format!(
                "duplicate country '{name}'"
            )));
        }
    }

    Ok(df)
}
