//! Derived indicators.
//!
//! Trade openness is the average trade flow relative to GDP, as a percentage:
//! `(exports + imports) / 2 / gdp * 100`. A zero or missing GDP, or any missing
//! input, yields a missing value rather than an infinity or an error.
use polars::prelude::*;

use crate::dataset::CountryRecord;
use crate::schema::{Variable, Year};

/// Scalar openness formula. `None` when GDP is zero or the result is not finite.
pub fn openness(exports: f64, imports: f64, gdp: f64) -> Option<f64> {
    if gdp == 0.0 {
        return None;
    }
    let value = (exports + imports) / 2.0 / gdp * 100.0;
    value.is_finite().then_some(value)
}

/// Openness of one record for one year, from its source values.
pub fn compute_openness(record: &CountryRecord, year: Year) -> Option<f64> {
    openness(
        record.value(Variable::Exports, year)?,
        record.value(Variable::Imports, year)?,
        record.value(Variable::Gdp, year)?,
    )
}

/// Columnar form of [`openness`], producing the `Openness_{year}` column.
pub fn openness_expr(year: Year) -> Expr {
    let gdp = col(Variable::Gdp.column(year));
    let ratio = (col(Variable::Exports.column(year)) + col(Variable::Imports.column(year)))
        / lit(2.0)
        / gdp.clone()
        * lit(100.0);

    when(gdp.clone().is_null().or(gdp.eq(lit(0.0))))
        .then(lit(NULL).cast(DataType::Float64))
        .when(ratio.clone().is_finite())
        .then(ratio)
        .otherwise(lit(NULL).cast(DataType::Float64))
        .alias(Variable::Openness.column(year))
}
