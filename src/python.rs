use pyo3::prelude::*;
use pyo3_polars::PyDataFrame;

use crate::config::DashboardConfig;
use crate::dashboard::Dashboard;
use crate::error::DashboardError;
use crate::region::Region;
use crate::schema::Variable;
use crate::visualization::ChartConfig;

/// Python face of [`Dashboard`]. Loaded in the constructor and immutable
/// afterwards, so the class is frozen and safe to call from any callback.
#[pyclass(name = "Dashboard", frozen)]
pub struct PyDashboard {
    inner: Dashboard,
}

#[pymethods]
impl PyDashboard {
    /// Load the indicator table and resolve regions.
    ///
    /// Args:
    ///     data_path: `.csv` or `.parquet` export of the indicator sheet
    ///     config_path: optional JSON config (years, region layout, ...)
    #[new]
    #[pyo3(signature = (data_path, config_path=None))]
    fn new(data_path: &str, config_path: Option<&str>) -> PyResult<Self> {
        let config = match config_path {
            Some(path) => DashboardConfig::from_json_file(path)?,
            None => DashboardConfig::default(),
        };
        let inner = Dashboard::load(data_path, &config)?;
        Ok(Self { inner })
    }

    // ── Queries ─────────────────────────────────────────────────────────────

    /// Regional mean per year as `[(year, value | None), ...]`.
    fn query(&self, region: &str, variable: &str) -> PyResult<Vec<(i32, Option<f64>)>> {
        let series = self.inner.query_by_name(region, variable)?;
        Ok(series.points.iter().map(|p| (p.year, p.value)).collect())
    }

    fn members(&self, region: &str) -> PyResult<Vec<String>> {
        let region: Region = region.parse()?;
        Ok(self.inner.members(region).to_vec())
    }

    fn years(&self) -> Vec<i32> {
        self.inner.years().years().collect()
    }

    // ── Charts ──────────────────────────────────────────────────────────────

    /// Plotly figure JSON, e.g. `plotly.io.from_json(dashboard.figure_json(...))`.
    fn figure_json(&self, region: &str, variable: &str) -> PyResult<String> {
        let (region, variable) = parse_selection(region, variable)?;
        Ok(self.inner.figure_json(region, variable)?)
    }

    /// Self-contained HTML line chart.
    #[pyo3(signature = (region, variable, width_px = 720, height_px = 400))]
    fn chart_html(
        &self,
        region: &str,
        variable: &str,
        width_px: u32,
        height_px: u32,
    ) -> PyResult<String> {
        let (region, variable) = parse_selection(region, variable)?;
        let config = ChartConfig {
            width_px,
            height_px,
            ..ChartConfig::default()
        };
        Ok(self.inner.chart_html(region, variable, &config)?)
    }

    /// Image URL for a regression panel label or asset file name.
    fn regression_image(&self, selection: &str) -> PyResult<String> {
        Ok(self.inner.regression_image(selection)?)
    }

    // ── Properties ──────────────────────────────────────────────────────────

    #[getter]
    fn data_df(&self) -> PyDataFrame {
        PyDataFrame(self.inner.dataset().frame().clone())
    }
}

fn parse_selection(region: &str, variable: &str) -> Result<(Region, Variable), DashboardError> {
    Ok((region.parse()?, variable.parse()?))
}

/// Install a tracing subscriber; `RUST_LOG` wins over `filter` when set.
#[pyfunction]
#[pyo3(signature = (filter = "info"))]
fn init_logging(filter: &str) -> bool {
    crate::init_logging(filter)
}

pub(crate) fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyDashboard>()?;
    m.add_function(wrap_pyfunction!(init_logging, m)?)?;
    Ok(())
}
