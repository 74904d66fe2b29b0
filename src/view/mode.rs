use std::fmt;

use serde::{Deserialize, Serialize};

/// Query parameter carrying the active view.
pub const VIEW_PARAM: &str = "v";

/// The two alternating visualizations. Exactly one is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ViewMode {
    /// Choropleth of arrival totals.
    #[default]
    #[serde(rename = "arrivals")]
    Statistic,
    /// Route lines over a faded choropleth.
    #[serde(rename = "routes")]
    Flow,
}

impl ViewMode {
    pub fn to_str(&self) -> &'static str {
        match self {
            ViewMode::Statistic => "arrivals",
            ViewMode::Flow => "routes",
        }
    }

    /// Derive the initial mode from a navigation query string such as
    /// `?v=routes&zoom=4`. Anything but `v=routes` selects the statistic view.
    pub fn from_query(query: &str) -> Self {
        let flow = query.trim_start_matches('?')
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .filter(|(key, _)| *key == VIEW_PARAM)
            .last()
            .is_some_and(|(_, value)| value == ViewMode::Flow.to_str());
        if flow { ViewMode::Flow } else { ViewMode::Statistic }
    }

    /// Rewrite `query` so its view parameter names this mode, keeping other
    /// parameters in place.
    pub fn write_query(&self, query: &str) -> String {
        let mut pairs: Vec<String> = query.trim_start_matches('?')
            .split('&')
            .filter(|pair| !pair.is_empty())
            .filter(|pair| pair.split_once('=').map_or(*pair, |(key, _)| key) != VIEW_PARAM)
            .map(str::to_string)
            .collect();
        pairs.push(format!("{VIEW_PARAM}={}", self.to_str()));
        format!("?{}", pairs.join("&"))
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}
