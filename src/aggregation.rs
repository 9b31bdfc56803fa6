use polars::prelude::*;
use serde::Serialize;

use crate::error::Result;
use crate::region::Region;
use crate::schema::{Variable, Year, YearRange};

/// One plotted point; `value` is `None` when no member country has data that year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearPoint {
    pub year: Year,
    pub value: Option<f64>,
}

/// Regional mean of one variable, one point per supported year in ascending order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeries {
    pub region: Region,
    pub variable: Variable,
    pub points: Vec<YearPoint>,
}

impl TimeSeries {
    pub fn years(&self) -> Vec<Year> {
        self.points.iter().map(|p| p.year).collect()
    }

    pub fn values(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn value_at(&self, year: Year) -> Option<f64> {
        self.points
            .iter()
            .find(|p| p.year == year)
            .and_then(|p| p.value)
    }

    /// `"{variable} for {region}"`, the chart title.
    pub fn title(&self) -> String {
        format!("{} for {}", self.variable, self.region)
    }
}

/// Mean of `variable` over the rows of `members`, year by year.
///
/// Nulls are excluded from each mean; a year where every member is null (or
/// the region is empty) yields a missing point rather than zero.
pub fn region_series(
    members: &DataFrame,
    region: Region,
    variable: Variable,
    years: YearRange,
) -> Result<TimeSeries> {
    let mut points = Vec::with_capacity(years.len());
    for year in years.years() {
        let values = members.column(&variable.column(year))?.f64()?;
        points.push(YearPoint {
            year,
            value: values.mean(),
        });
    }
    Ok(TimeSeries {
        region,
        variable,
        points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn members() -> DataFrame {
        df!(
            "Country" => ["A", "B", "C"],
            "GDP_2019" => [Some(10.0), Some(20.0), Some(30.0)],
            "GDP_2020" => [None, Some(100.0), Some(200.0)],
            "GDP_2021" => [None::<f64>, None, None],
        )
        .unwrap()
    }

    #[test]
    fn mean_excludes_missing_values() {
        let series = region_series(
            &members(),
            Region::Europe,
            Variable::Gdp,
            YearRange::new(2019, 2021),
        )
        .unwrap();

        assert_eq!(series.years(), vec![2019, 2020, 2021]);
        assert_eq!(series.value_at(2019), Some(20.0));
        assert_eq!(series.value_at(2020), Some(150.0));
        assert_eq!(series.value_at(2021), None);
        assert_eq!(series.points.len(), 3);
        assert_eq!(series.title(), "GDP for Europe");
    }

    #[test]
    fn empty_region_yields_missing_points() {
        let empty = members().slice(0, 0);
        let series = region_series(
            &empty,
            Region::Asia,
            Variable::Gdp,
            YearRange::new(2019, 2020),
        )
        .unwrap();
        assert_eq!(series.values(), vec![None, None]);
    }

    #[test]
    fn unknown_column_is_an_error() {
        let result = region_series(
            &members(),
            Region::Asia,
            Variable::Exports,
            YearRange::new(2019, 2019),
        );
        assert!(result.is_err());
    }
}
