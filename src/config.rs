use std::{collections::BTreeMap, fs, path::Path};

use anyhow::{Context, Result};
use geo::Point;
use serde::{Deserialize, Serialize};

use crate::{
    geom::FallbackTable,
    region::Normalizer,
    scale::{Rgb, ScalePolicy, WidthScale, DEFAULT_PALETTE, DEFAULT_WIDTH_STOPS},
};

/// Fill opacity of the statistic layer in each view mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatisticOpacity {
    pub statistic: f64,
    pub flow: f64,
}

impl Default for StatisticOpacity {
    fn default() -> Self {
        Self { statistic: 0.75, flow: 0.15 }
    }
}

/// Engine settings. Every field has a default, so an empty JSON object is a
/// valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Breakpoint policy of the choropleth.
    pub scale: ScalePolicy,
    /// Color ramp, resampled to the number of breakpoints.
    pub palette: Vec<Rgb>,
    pub opacity: StatisticOpacity,
    /// (count, width) stops for route lines.
    pub line_widths: Vec<[f64; 2]>,
    /// Extra or replacement fallback points, code -> [lon, lat].
    pub fallback: BTreeMap<String, [f64; 2]>,
    /// Extra code aliases, raw -> canonical.
    pub aliases: BTreeMap<String, String>,
    /// Number of entries in the ranking.
    pub ranking_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            scale: ScalePolicy::default(),
            palette: DEFAULT_PALETTE.to_vec(),
            opacity: StatisticOpacity::default(),
            line_widths: DEFAULT_WIDTH_STOPS.to_vec(),
            fallback: BTreeMap::new(),
            aliases: BTreeMap::new(),
            ranking_size: 10,
        }
    }
}

impl EngineConfig {
    /// Read a JSON configuration file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_slice(&bytes)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse a JSON configuration.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).context("Failed to parse engine config")
    }

    /// Builtin aliases plus the configured ones.
    pub fn normalizer(&self) -> Normalizer {
        Normalizer::with_aliases(self.aliases.iter().map(|(from, to)| (from.as_str(), to.as_str())))
    }

    /// Builtin fallback points with the configured overrides applied.
    pub fn fallback_table(&self, normalizer: &Normalizer) -> FallbackTable {
        let mut table = FallbackTable::builtin(normalizer);
        for (code, [lon, lat]) in &self.fallback {
            table.insert(normalizer.normalize(code), Point::new(*lon, *lat));
        }
        table
    }

    pub fn width_scale(&self) -> WidthScale {
        WidthScale::new(&self.line_widths)
    }
}
