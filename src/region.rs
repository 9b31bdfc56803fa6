use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{DashboardError, Result};

/// Fixed geographic grouping of countries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "Asia")]
    Asia,
    #[serde(rename = "Europe")]
    Europe,
    #[serde(rename = "Middle East and Central Asia")]
    MiddleEastCentralAsia,
    #[serde(rename = "Sub-Saharan Africa")]
    SubSaharanAfrica,
    #[serde(rename = "Western Hemisphere")]
    WesternHemisphere,
}

impl Region {
    /// Dropdown order.
    pub const ALL: [Region; 5] = [
        Region::Asia,
        Region::SubSaharanAfrica,
        Region::MiddleEastCentralAsia,
        Region::WesternHemisphere,
        Region::Europe,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Region::Asia => "Asia",
            Region::Europe => "Europe",
            Region::MiddleEastCentralAsia => "Middle East and Central Asia",
            Region::SubSaharanAfrica => "Sub-Saharan Africa",
            Region::WesternHemisphere => "Western Hemisphere",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = DashboardError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Region::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| DashboardError::invalid_selection("region", s))
    }
}

/// Half-open block of row positions `[start, end)` assigned to one region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowRange {
    pub region: Region,
    pub start: usize,
    pub end: usize,
}

impl RowRange {
    pub fn new(region: Region, start: usize, end: usize) -> Self {
        Self { region, start, end }
    }
}

/// How countries are assigned to regions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegionLayout {
    /// Positional blocks of the source sheet, resolved to country names once at load.
    RowRanges {
        ranges: Vec<RowRange>,
        #[serde(default)]
        excluded: Vec<String>,
    },
    /// Explicit country → region table.
    Lookup { assignments: BTreeMap<String, Region> },
}

impl Default for RegionLayout {
    fn default() -> Self {
        RegionLayout::RowRanges {
            ranges: vec![
                RowRange::new(Region::Asia, 0, 20),
                RowRange::new(Region::Europe, 20, 34),
                RowRange::new(Region::MiddleEastCentralAsia, 34, 57),
                RowRange::new(Region::SubSaharanAfrica, 57, 91),
                RowRange::new(Region::WesternHemisphere, 91, 114),
            ],
            excluded: vec!["China, P.R.: Mainland".to_string()],
        }
    }
}

impl RegionLayout {
    /// Rejects reversed or overlapping row ranges.
    pub fn validate(&self) -> Result<()> {
        let RegionLayout::RowRanges { ranges, .. } = self else {
            return Ok(());
        };

        let mut sorted: Vec<&RowRange> = ranges.iter().collect();
        sorted.sort_by_key(|r| (r.start, r.end));

        for r in &sorted {
            if r.start > r.end {
                return Err(DashboardError::Config(format!(
                    "row range for {} starts after it ends ({}..{})",
                    r.region, r.start, r.end
                )));
            }
        }
        for pair in sorted.windows(2) {
            if pair[1].start < pair[0].end {
                return Err(DashboardError::Config(format!(
                    "row ranges for {} ({}..{}) and {} ({}..{}) overlap",
                    pair[0].region,
                    pair[0].start,
                    pair[0].end,
                    pair[1].region,
                    pair[1].start,
                    pair[1].end
                )));
            }
        }
        Ok(())
    }
}

/// Resolved partition: every country maps to at most one region.
#[derive(Debug, Clone)]
pub struct RegionMap {
    assignments: HashMap<String, Region>,
    members: BTreeMap<Region, Vec<String>>,
}

impl RegionMap {
    /// Resolve `layout` against the loaded countries, given in dataset row order.
    pub fn resolve(countries: &[String], layout: &RegionLayout) -> Result<Self> {
        layout.validate()?;

        let mut assignments: HashMap<String, Region> = HashMap::new();

        match layout {
            RegionLayout::RowRanges { ranges, excluded } => {
                let excluded: BTreeSet<&str> = excluded.iter().map(String::as_str).collect();
                for range in ranges {
                    let end = range.end.min(countries.len());
                    if end < range.end {
                        warn!(
                            region = %range.region,
                            requested_end = range.end,
                            rows = countries.len(),
                            "row range extends past the dataset; clipped"
                        );
                    }
                    for country in countries.iter().take(end).skip(range.start) {
                        if excluded.contains(country.as_str()) {
                            debug!(region = %range.region, %country, "excluded from region");
                            continue;
                        }
                        assignments.insert(country.clone(), range.region);
                    }
                }
            }
            RegionLayout::Lookup {
                assignments: table,
            } => {
                let known: BTreeSet<&str> = countries.iter().map(String::as_str).collect();
                for (country, region) in table {
                    if known.contains(country.as_str()) {
                        assignments.insert(country.clone(), *region);
                    } else {
                        warn!(%country, %region, "lookup names a country absent from the dataset");
                    }
                }
            }
        }

        let mut members: BTreeMap<Region, Vec<String>> =
            Region::ALL.iter().map(|r| (*r, Vec::new())).collect();
        for country in countries {
            if let Some(region) = assignments.get(country) {
                members.entry(*region).or_default().push(country.clone());
            }
        }

        for (region, names) in &members {
            info!(%region, countries = names.len(), "region resolved");
        }

        Ok(Self {
            assignments,
            members,
        })
    }

    pub fn region_of(&self, country: &str) -> Option<Region> {
        self.assignments.get(country).copied()
    }

    /// Members of `region` in dataset row order.
    pub fn members(&self, region: Region) -> &[String] {
        self.members
            .get(&region)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of countries assigned to any region.
    pub fn assigned(&self) -> usize {
        self.assignments.len()
    }
}
