use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};
use crate::region::RegionLayout;
use crate::schema::{columns, YearRange};

/// Load-time settings. Every field has a default matching the source spreadsheet,
/// so an empty JSON object is a complete config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub years: YearRange,
    pub regions: RegionLayout,
    /// Leading data rows that are header artifacts rather than countries.
    pub skip_rows: usize,
    /// Columns dropped when present (e.g. the country-code mapping).
    pub ignored_columns: Vec<String>,
    /// URL prefix under which regression images are served.
    pub asset_prefix: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            years: YearRange::default(),
            regions: RegionLayout::default(),
            skip_rows: 1,
            ignored_columns: vec![columns::MAPPED_COUNTRY.to_string()],
            asset_prefix: "/assets".to_string(),
        }
    }
}

impl DashboardConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: DashboardConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.years.is_empty() {
            return Err(DashboardError::Config(format!(
                "year range {}..={} is empty",
                self.years.first, self.years.last
            )));
        }
        self.regions.validate()
    }
}
