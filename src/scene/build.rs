use serde::Serialize;
use serde_json::Value;
use tracing::info;

use super::{
    geojson::{fill_collection, line_collection},
    ranking::{top_n, RankEntry},
};
use crate::{
    config::EngineConfig,
    data::{Datasets, StatisticRecord},
    geom::{CentroidIndex, FallbackTable},
    region::Normalizer,
    route::{synthesize, ResolvedEdge},
    scale::{build_scale, ColorScale, WidthScale},
};

/// Scale data a legend needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub scale: ColorScale,
    pub widths: WidthScale,
}

/// Counts describing how much of the input made it into the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SceneStats {
    pub features: usize,
    pub indexed: usize,
    pub routes: usize,
    pub resolved: usize,
    pub dropped: usize,
}

/// Everything the render sink needs, derived from the three datasets.
#[derive(Debug, Clone, Serialize)]
pub struct Scene {
    /// Polygon FeatureCollection annotated with `ISO2`, `value`, `color` and `fill`.
    pub fill: Value,
    /// Route FeatureCollection of two-point LineStrings.
    pub lines: Value,
    pub legend: Legend,
    pub ranking: Vec<RankEntry>,
    pub stats: SceneStats,
    #[serde(skip)]
    pub edges: Vec<ResolvedEdge>,
}

/// The join pipeline: configuration plus the tables derived from it.
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    normalizer: Normalizer,
    fallback: FallbackTable,
    widths: WidthScale,
}

impl Default for Engine {
    fn default() -> Self { Self::new(EngineConfig::default()) }
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        let normalizer = config.normalizer();
        let fallback = config.fallback_table(&normalizer);
        let widths = config.width_scale();
        Self { config, normalizer, fallback, widths }
    }

    #[inline] pub fn config(&self) -> &EngineConfig { &self.config }

    #[inline] pub fn normalizer(&self) -> &Normalizer { &self.normalizer }

    #[inline] pub fn fallback(&self) -> &FallbackTable { &self.fallback }

    /// Normalize the statistics dataset.
    pub fn statistics(&self, datasets: &Datasets) -> StatisticRecord {
        StatisticRecord::from_dataset(&datasets.statistics, &self.normalizer)
    }

    /// Build the scene. The datasets are only read.
    pub fn build_scene(&self, datasets: &Datasets) -> Scene {
        let features = &datasets.polygons.features;
        let statistics = self.statistics(datasets);
        let index = CentroidIndex::build(features, &self.normalizer);
        let scale = build_scale(&statistics.values(), &self.config.scale, &self.config.palette);
        let edges = synthesize(&datasets.flows.routes, &index, &self.fallback, &self.normalizer);

        let stats = SceneStats {
            features: features.len(),
            indexed: index.len(),
            routes: datasets.flows.routes.len(),
            resolved: edges.len(),
            dropped: datasets.flows.routes.len() - edges.len(),
        };
        info!(
            "[scene] {} features ({} indexed), {}/{} routes",
            stats.features, stats.indexed, stats.resolved, stats.routes,
        );

        Scene {
            fill: fill_collection(features, &statistics, &scale, &self.normalizer),
            lines: line_collection(&edges, &self.widths),
            legend: Legend { scale, widths: self.widths.clone() },
            ranking: top_n(&statistics, self.config.ranking_size),
            stats,
            edges,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::{data::Datasets, scale::DEFAULT_PALETTE};

    use super::*;

    fn datasets() -> Datasets {
        Datasets::from_slices(
            json!({
                "type": "FeatureCollection",
                "features": [
                    { "type": "Feature", "properties": { "CNTR_ID": "DE", "NAME_EN": "Germany" },
                      "geometry": { "type": "Polygon", "coordinates": [[[6.0, 47.0], [15.0, 47.0], [15.0, 55.0], [6.0, 47.0]]] } },
                    { "type": "Feature", "properties": { "CNTR_ID": "GR" },
                      "geometry": { "type": "Polygon", "coordinates": [[[20.0, 35.0], [26.0, 35.0], [26.0, 41.0], [20.0, 35.0]]] } },
                    { "type": "Feature", "properties": { "NAME": "Nowhere" }, "geometry": null }
                ]
            }).to_string().as_bytes(),
            json!({ "totalsByCountry": { "DE": 1000, "EL": 0 } }).to_string().as_bytes(),
            json!({ "routes": [
                { "from": "SY", "to": "DE", "count": 50000, "path": "Balkan" },
                { "from": "XX", "to": "DE", "count": 10 },
                { "from": "TR", "to": "GR", "count": 120000 }
            ] }).to_string().as_bytes(),
        ).unwrap()
    }

    #[test]
    fn fill_features_are_annotated() {
        let scene = Engine::default().build_scene(&datasets());
        let features = scene.fill["features"].as_array().unwrap();
        assert_eq!(features.len(), 3);

        assert_eq!(features[0]["id"], json!("DE"));
        assert_eq!(features[0]["properties"]["value"], json!(1000.0));
        assert_eq!(features[0]["properties"]["color"], json!(DEFAULT_PALETTE[2].to_string()));
        assert_eq!(features[0]["properties"]["NAME_EN"], json!("Germany"));

        assert_eq!(features[1]["properties"]["ISO2"], json!("EL"));
        assert_eq!(features[1]["properties"]["color"], json!(DEFAULT_PALETTE[0].to_string()));

        assert_eq!(features[2]["properties"]["ISO2"], Value::Null);
        assert_eq!(features[2]["properties"]["value"], json!(0.0));
    }

    #[test]
    fn lines_carry_magnitude_bearing_and_width() {
        let scene = Engine::default().build_scene(&datasets());
        let lines = scene.lines["features"].as_array().unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(scene.stats, SceneStats { features: 3, indexed: 2, routes: 3, resolved: 2, dropped: 1 });

        let first = &lines[0]["properties"];
        assert_eq!(first["from"], json!("SY"));
        assert_eq!(first["path"], json!("Balkan"));
        assert_eq!(first["width"], json!(3.5));
        let bearing = first["bearing"].as_f64().unwrap();
        assert!((0.0..360.0).contains(&bearing));

        assert_eq!(lines[1]["properties"]["to"], json!("EL"));
        assert_eq!(lines[1]["properties"]["path"], json!(""));
        assert_eq!(lines[1]["geometry"]["coordinates"][1], json!([23.0, 38.0]));
    }

    #[test]
    fn inputs_are_not_mutated() {
        let input = datasets();
        let before = input.polygons.features.iter().map(|f| f.source().clone()).collect::<Vec<_>>();
        let _ = Engine::default().build_scene(&input);
        let after = input.polygons.features.iter().map(|f| f.source().clone()).collect::<Vec<_>>();
        assert_eq!(before, after);
    }

    #[test]
    fn ranking_and_legend() {
        let scene = Engine::default().build_scene(&datasets());
        assert_eq!(scene.ranking.len(), 2);
        assert_eq!(scene.ranking[0].code.as_str(), "DE");
        assert_eq!(scene.legend.scale.thresholds(), vec![0.0, 500.0, 1000.0]);
    }

    #[test]
    fn configured_alias_on_fallback_code_still_resolves() {
        let config = EngineConfig {
            aliases: [("SY".to_string(), "SYR".to_string())].into(),
            ..EngineConfig::default()
        };
        let engine = Engine::new(config);
        let scene = engine.build_scene(&datasets());

        assert_eq!(engine.normalizer().normalize("SY").as_str(), "SYR");
        assert_eq!(scene.stats.resolved, 2);
        assert_eq!(scene.lines["features"][0]["properties"]["from"], json!("SYR"));
    }

    #[test]
    fn fill_follows_the_continuous_ramp() {
        let datasets = Datasets::from_slices(
            json!({ "features": [
                { "properties": { "ISO2": "DE" }, "geometry": { "type": "Polygon", "coordinates": [[[6.0, 47.0], [15.0, 47.0], [15.0, 55.0], [6.0, 47.0]]] } },
                { "properties": { "ISO2": "AT" }, "geometry": { "type": "Polygon", "coordinates": [[[9.5, 46.4], [17.2, 46.4], [17.2, 49.0], [9.5, 46.4]]] } },
                { "properties": { "ISO2": "FR" }, "geometry": { "type": "Polygon", "coordinates": [[[-5.0, 42.0], [8.0, 42.0], [8.0, 51.0], [-5.0, 42.0]]] } }
            ] }).to_string().as_bytes(),
            json!({ "totalsByCountry": { "DE": 100, "AT": 49, "FR": 0 } }).to_string().as_bytes(),
            br#"{}"#,
        ).unwrap();
        let scene = Engine::default().build_scene(&datasets);
        assert_eq!(scene.legend.scale.thresholds(), vec![0.0, 50.0, 100.0]);

        let features = scene.fill["features"].as_array().unwrap();
        let props = |i: usize| &features[i]["properties"];
        // Stepped class color stays on the lowest class just below a break.
        assert_eq!(props(1)["color"], json!(DEFAULT_PALETTE[0].to_string()));
        let expected = DEFAULT_PALETTE[0].lerp(DEFAULT_PALETTE[1], 49.0 / 50.0);
        assert_eq!(props(1)["fill"], json!(expected.to_string()));
        assert_ne!(props(1)["fill"], props(1)["color"]);

        assert_eq!(props(0)["fill"], json!(DEFAULT_PALETTE[2].to_string()));
        assert_eq!(props(2)["fill"], json!(DEFAULT_PALETTE[0].to_string()));
    }
}
