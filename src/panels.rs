//! Regression result panels: static images keyed by a dropdown selection.
use std::fmt;
use std::str::FromStr;

use crate::error::DashboardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegressionPanel {
    Asia,
    SubSaharanAfrica,
    Europe,
    MiddleEast,
    WesternHemisphere,
}

impl RegressionPanel {
    /// Dropdown order.
    pub const ALL: [RegressionPanel; 5] = [
        RegressionPanel::Asia,
        RegressionPanel::SubSaharanAfrica,
        RegressionPanel::Europe,
        RegressionPanel::MiddleEast,
        RegressionPanel::WesternHemisphere,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RegressionPanel::Asia => "Asia",
            RegressionPanel::SubSaharanAfrica => "Africa",
            RegressionPanel::Europe => "Europe",
            RegressionPanel::MiddleEast => "Middle East",
            RegressionPanel::WesternHemisphere => "Western Hemisphere",
        }
    }

    pub fn asset_file(self) -> &'static str {
        match self {
            RegressionPanel::Asia => "asiareg.png",
            RegressionPanel::SubSaharanAfrica => "Africa-subreg.png",
            RegressionPanel::Europe => "Europereg.png",
            RegressionPanel::MiddleEast => "middlereg.png",
            RegressionPanel::WesternHemisphere => "westreg.png",
        }
    }

    /// `{prefix}/{file}`; a trailing slash on the prefix is ignored.
    pub fn image_src(self, prefix: &str) -> String {
        format!("{}/{}", prefix.trim_end_matches('/'), self.asset_file())
    }
}

impl fmt::Display for RegressionPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Accepts either the label or the asset file name.
impl FromStr for RegressionPanel {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RegressionPanel::ALL
            .into_iter()
            .find(|p| p.label() == s || p.asset_file() == s)
            .ok_or_else(|| DashboardError::invalid_selection("regression panel", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selects_by_label_or_file() {
        assert_eq!(
            "Africa".parse::<RegressionPanel>().unwrap(),
            RegressionPanel::SubSaharanAfrica
        );
        assert_eq!(
            "middlereg.png".parse::<RegressionPanel>().unwrap(),
            RegressionPanel::MiddleEast
        );
        assert!("moonreg.png".parse::<RegressionPanel>().is_err());
    }

    #[test]
    fn image_src_joins_prefix() {
        assert_eq!(
            RegressionPanel::Asia.image_src("/assets"),
            "/assets/asiareg.png"
        );
        assert_eq!(
            RegressionPanel::WesternHemisphere.image_src("static/"),
            "static/westreg.png"
        );
    }
}
