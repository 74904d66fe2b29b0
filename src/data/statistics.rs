use std::collections::BTreeMap;

use ahash::AHashMap;
use serde::Deserialize;
use serde_json::Value;

use super::value::magnitude;
use crate::region::{Normalizer, RegionCode};

/// Raw statistics dataset: `{ "totalsByCountry": { "<code>": <number> } }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatisticsDataset {
    #[serde(rename = "totalsByCountry", default)]
    pub totals_by_country: BTreeMap<String, Value>,
}

/// Non-negative magnitudes keyed by canonical code.
/// Regions without an entry read as 0.
#[derive(Debug, Clone, Default)]
pub struct StatisticRecord {
    values: AHashMap<RegionCode, f64>,
}

impl StatisticRecord {
    /// Normalize the raw keys. Raw keys that collapse onto the same canonical
    /// code (e.g. `GR` and `EL`) are summed.
    pub fn from_dataset(dataset: &StatisticsDataset, normalizer: &Normalizer) -> Self {
        let mut values = AHashMap::with_capacity(dataset.totals_by_country.len());
        for (raw, value) in &dataset.totals_by_country {
            *values.entry(normalizer.normalize(raw)).or_insert(0.0) += magnitude(value);
        }
        Self { values }
    }

    /// Magnitude for a region, 0 when absent.
    #[inline]
    pub fn get(&self, code: &RegionCode) -> f64 {
        self.values.get(code).copied().unwrap_or(0.0)
    }

    /// All observed magnitudes, in no particular order.
    pub fn values(&self) -> Vec<f64> {
        self.values.values().copied().collect()
    }

    /// Iterate over (code, magnitude) pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&RegionCode, f64)> {
        self.values.iter().map(|(code, value)| (code, *value))
    }

    #[inline] pub fn len(&self) -> usize { self.values.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.values.is_empty() }
}
