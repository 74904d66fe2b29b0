use serde::Deserialize;

use super::value::deserialize_magnitude;

/// One origin → destination record as it appears in the flow dataset.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawFlowRecord {
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
    #[serde(default, deserialize_with = "deserialize_magnitude")]
    pub count: f64,
    #[serde(default)]
    pub path: Option<String>,
}

impl RawFlowRecord {
    pub fn new(from: &str, to: &str, count: f64) -> Self {
        Self { from: from.to_string(), to: to.to_string(), count, path: None }
    }

    pub fn with_path(mut self, path: &str) -> Self {
        self.path = Some(path.to_string());
        self
    }
}

/// Raw flow dataset: `{ "routes": [ { "from", "to", "count", "path"? } ] }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlowDataset {
    #[serde(default)]
    pub routes: Vec<RawFlowRecord>,
}
