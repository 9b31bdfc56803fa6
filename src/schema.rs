/// Column-name constants and naming rules for the indicator table.
/// Single source of truth - exported to Python via PyO3.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DashboardError;

pub type Year = i32;

// ── Identity columns ────────────────────────────────────────────────────────
pub mod columns {
    pub const COUNTRY: &str = "Country";
    pub const MAPPED_COUNTRY: &str = "Mapped_Country";
}

// ── Indicator column prefixes ───────────────────────────────────────────────
pub mod prefix {
    pub const EXPORTS: &str = "Exports";
    pub const IMPORTS: &str = "Imports";
    pub const GDP: &str = "GDP";
    pub const OPENNESS: &str = "Openness";
    pub const INFLATION: &str = "Inflation";
}

/// Per-year attribute selected for aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Variable {
    Exports,
    Imports,
    #[serde(rename = "GDP")]
    Gdp,
    Openness,
    Inflation,
}

impl Variable {
    /// Dropdown order.
    pub const ALL: [Variable; 5] = [
        Variable::Exports,
        Variable::Imports,
        Variable::Gdp,
        Variable::Openness,
        Variable::Inflation,
    ];

    /// Variables read from the source table; openness is derived from these.
    pub const SOURCE: [Variable; 4] = [
        Variable::Exports,
        Variable::Imports,
        Variable::Gdp,
        Variable::Inflation,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Variable::Exports => prefix::EXPORTS,
            Variable::Imports => prefix::IMPORTS,
            Variable::Gdp => prefix::GDP,
            Variable::Openness => prefix::OPENNESS,
            Variable::Inflation => prefix::INFLATION,
        }
    }

    pub fn is_derived(self) -> bool {
        matches!(self, Variable::Openness)
    }

    /// Column holding this variable for `year`, e.g. `GDP_2020`.
    pub fn column(self, year: Year) -> String {
        format!("{}_{}", self.as_str(), year)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variable {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Variable::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| DashboardError::invalid_selection("variable", s))
    }
}

/// Inclusive range of supported years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub first: Year,
    pub last: Year,
}

impl Default for YearRange {
    fn default() -> Self {
        Self {
            first: 2014,
            last: 2022,
        }
    }
}

impl YearRange {
    pub fn new(first: Year, last: Year) -> Self {
        Self { first, last }
    }

    pub fn years(&self) -> impl Iterator<Item = Year> {
        self.first..=self.last
    }

    pub fn len(&self) -> usize {
        if self.last < self.first {
            0
        } else {
            (self.last - self.first) as usize + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, year: Year) -> bool {
        (self.first..=self.last).contains(&year)
    }

    /// Every source column the loader requires, in year-major order.
    pub fn source_columns(&self) -> Vec<String> {
        self.years()
            .flat_map(|y| Variable::SOURCE.into_iter().map(move |v| v.column(y)))
            .collect()
    }
}
