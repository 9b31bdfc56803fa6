//! Analytics core of the trade dashboard: loads per-country macroeconomic
//! indicators, derives trade openness and answers regional time-series queries.
pub mod aggregation;
pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod error;
pub mod indicator;
pub mod panels;
pub mod region;
pub mod schema;
pub mod visualization;

#[cfg(feature = "python")]
mod python;

pub use aggregation::{TimeSeries, YearPoint};
pub use config::DashboardConfig;
pub use dashboard::Dashboard;
pub use dataset::{CountryRecord, Dataset};
pub use error::{DashboardError, Result};
pub use region::{Region, RegionLayout, RegionMap, RowRange};
pub use schema::{Variable, Year, YearRange};

use tracing_subscriber::{fmt, EnvFilter};

/// Install a fmt subscriber filtered by `RUST_LOG`, or `default_filter` when unset.
///
/// Returns `false` when a global subscriber was already installed.
pub fn init_logging(default_filter: &str) -> bool {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .try_init()
        .is_ok()
}

#[cfg(feature = "python")]
mod module {
    use pyo3::prelude::*;
    use pyo3::types::PyModule;

    use crate::panels::RegressionPanel;
    use crate::region::Region;
    use crate::schema::{self, Variable};

    /// Export selection names and column constants to Python.
    fn add_schema_exports(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add("REGIONS", Region::ALL.map(Region::as_str).to_vec())?;
        m.add("VARIABLES", Variable::ALL.map(Variable::as_str).to_vec())?;
        m.add(
            "REGRESSION_PANELS",
            RegressionPanel::ALL
                .map(|p| (p.label(), p.asset_file()))
                .to_vec(),
        )?;

        // Columns
        let columns = PyModule::new(m.py(), "columns")?;
        columns.add("COUNTRY", schema::columns::COUNTRY)?;
        columns.add("MAPPED_COUNTRY", schema::columns::MAPPED_COUNTRY)?;
        m.add_submodule(&columns)?;

        // Prefixes
        let prefix = PyModule::new(m.py(), "prefix")?;
        prefix.add("EXPORTS", schema::prefix::EXPORTS)?;
        prefix.add("IMPORTS", schema::prefix::IMPORTS)?;
        prefix.add("GDP", schema::prefix::GDP)?;
        prefix.add("OPENNESS", schema::prefix::OPENNESS)?;
        prefix.add("INFLATION", schema::prefix::INFLATION)?;
        m.add_submodule(&prefix)?;

        Ok(())
    }

    #[pymodule]
    #[pyo3(name = "_core")]
    fn trade_dashboard(m: &Bound<'_, PyModule>) -> PyResult<()> {
        crate::python::register(m)?;
        add_schema_exports(m)?;
        Ok(())
    }
}
