use std::collections::BTreeMap;
use std::path::Path;

use polars::prelude::*;
use tracing::{debug, info};

use crate::aggregation::{region_series, TimeSeries};
use crate::config::DashboardConfig;
use crate::dataset::{CountryRecord, Dataset};
use crate::error::Result;
use crate::panels::RegressionPanel;
use crate::region::{Region, RegionMap};
use crate::schema::{columns, Variable, YearRange};
use crate::visualization::{self, ChartConfig};

/// Loaded dashboard state: dataset, region partition and per-region frames.
///
/// Built once; every method is a read, so a `Dashboard` can be shared freely
/// between threads.
#[derive(Debug, Clone)]
pub struct Dashboard {
    dataset: Dataset,
    regions: RegionMap,
    frames: BTreeMap<Region, DataFrame>,
    asset_prefix: String,
}

impl Dashboard {
    pub fn load(path: impl AsRef<Path>, config: &DashboardConfig) -> Result<Self> {
        let dataset = Dataset::load(path, config)?;
        Self::from_dataset(dataset, config)
    }

    pub fn from_dataset(dataset: Dataset, config: &DashboardConfig) -> Result<Self> {
        let countries = dataset.countries()?;
        let regions = RegionMap::resolve(&countries, &config.regions)?;

        let mut frames = BTreeMap::new();
        for region in Region::ALL {
            let members = Series::new(
                "members".into(),
                regions
                    .members(region)
                    .iter()
                    .map(String::as_str)
                    .collect::<Vec<_>>(),
            );
            let frame = dataset
                .frame()
                .clone()
                .lazy()
                .filter(col(columns::COUNTRY).is_in(lit(members).implode(), false))
                .collect()?;
            frames.insert(region, frame);
        }

        info!(
            countries = dataset.height(),
            assigned = regions.assigned(),
            "dashboard loaded"
        );

        Ok(Self {
            dataset,
            regions,
            frames,
            asset_prefix: config.asset_prefix.clone(),
        })
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn years(&self) -> YearRange {
        self.dataset.years()
    }

    pub fn region_map(&self) -> &RegionMap {
        &self.regions
    }

    /// Member countries of `region`, in dataset order.
    pub fn members(&self, region: Region) -> &[String] {
        self.regions.members(region)
    }

    pub fn record(&self, country: &str) -> Result<Option<CountryRecord>> {
        self.dataset.record(country)
    }

    /// Regional mean of `variable`, one point per supported year.
    pub fn query(&self, region: Region, variable: Variable) -> Result<TimeSeries> {
        debug!(%region, %variable, "query");
        let members = self.region_frame(region);
        region_series(&members, region, variable, self.years())
    }

    /// Like [`Dashboard::query`], but from the user-facing names. Any name
    /// outside the fixed sets is rejected before anything is computed.
    pub fn query_by_name(&self, region: &str, variable: &str) -> Result<TimeSeries> {
        let region: Region = region.parse()?;
        let variable: Variable = variable.parse()?;
        self.query(region, variable)
    }

    /// Plotly figure JSON for the selection.
    pub fn figure_json(&self, region: Region, variable: Variable) -> Result<String> {
        let series = self.query(region, variable)?;
        visualization::figure_json(&series)
    }

    /// Standalone HTML line chart for the selection.
    pub fn chart_html(
        &self,
        region: Region,
        variable: Variable,
        config: &ChartConfig,
    ) -> Result<String> {
        let series = self.query(region, variable)?;
        Ok(visualization::render_line_chart(&series, config))
    }

    /// Image URL for a regression panel selection.
    pub fn regression_image(&self, selection: &str) -> Result<String> {
        let panel: RegressionPanel = selection.parse()?;
        Ok(panel.image_src(&self.asset_prefix))
    }

    fn region_frame(&self, region: Region) -> DataFrame {
        // Every region gets a frame in `from_dataset`.
        self.frames
            .get(&region)
            .cloned()
            .unwrap_or_else(|| self.dataset.frame().clear())
    }
}
