use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config: {0}")]
    Config(String),

    #[error("InvalidData: {0}")]
    InvalidData(String),

    /// A region, variable or panel name outside the fixed set.
    #[error("Invalid {kind} selection: '{value}'")]
    InvalidSelection { kind: &'static str, value: String },

    #[error("Unsupported data file format: {0}")]
    UnsupportedFormat(String),
}

impl DashboardError {
    pub(crate) fn invalid_selection(kind: &'static str, value: &str) -> Self {
        DashboardError::InvalidSelection {
            kind,
            value: value.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(feature = "python")]
mod python {
    use pyo3::exceptions::{PyRuntimeError, PyValueError};
    use pyo3::PyErr;

    use super::DashboardError;

    impl From<DashboardError> for PyErr {
        fn from(err: DashboardError) -> PyErr {
            match err {
                DashboardError::InvalidSelection { .. } => PyValueError::new_err(err.to_string()),
                other => PyRuntimeError::new_err(other.to_string()),
            }
        }
    }
}
