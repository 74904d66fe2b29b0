use std::sync::OnceLock;

use geo::{MultiPolygon, Point};
use serde_json::{Map, Value};

use crate::{
    geom::{parse_polygonal, representative_point},
    region::{feature_code, Normalizer, RegionCode},
};

/// One polygon or multipolygon feature of the administrative dataset.
///
/// The source feature is kept untouched; geometry and representative point
/// are derived from it.
#[derive(Debug, Clone)]
pub struct RegionFeature {
    source: Value,
    geometry: Option<MultiPolygon<f64>>,
    point: OnceLock<Option<Point<f64>>>,
}

impl RegionFeature {
    /// Wrap a GeoJSON feature.
    pub fn from_json(source: Value) -> Self {
        let geometry = source.get("geometry").and_then(parse_polygonal);
        Self { source, geometry, point: OnceLock::new() }
    }

    /// The feature as it appeared in the dataset.
    #[inline] pub fn source(&self) -> &Value { &self.source }

    /// The feature's property bag (empty if absent).
    pub fn properties(&self) -> Map<String, Value> {
        self.source.get("properties")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default()
    }

    /// Canonical region code from the candidate property keys or the feature id.
    #[inline]
    pub fn code(&self, normalizer: &Normalizer) -> Option<RegionCode> {
        feature_code(&self.source, normalizer)
    }

    /// Representative point (bounding-box center), computed on first use.
    pub fn representative_point(&self) -> Option<Point<f64>> {
        *self.point.get_or_init(|| self.geometry.as_ref().and_then(representative_point))
    }
}

/// The administrative polygon dataset: a GeoJSON FeatureCollection.
#[derive(Debug, Clone, Default)]
pub struct PolygonDataset {
    pub features: Vec<RegionFeature>,
}

impl PolygonDataset {
    /// Build from an already parsed FeatureCollection. A missing or non-array
    /// `features` member yields an empty dataset.
    pub fn from_value(collection: &Value) -> Self {
        let features = collection.get("features")
            .and_then(Value::as_array)
            .map(|features| features.iter().cloned().map(RegionFeature::from_json).collect())
            .unwrap_or_default();
        Self { features }
    }

    #[inline] pub fn len(&self) -> usize { self.features.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.features.is_empty() }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn reads_feature_collection() {
        let dataset = PolygonDataset::from_value(&json!({
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "properties": { "CNTR_ID": "HU", "NAME_EN": "Hungary" },
                  "geometry": { "type": "Polygon", "coordinates": [[[16.0, 45.7], [22.9, 48.6], [16.0, 48.6]]] } },
                { "type": "Feature", "properties": { "CNTR_ID": "MT" }, "geometry": null }
            ]
        }));

        assert_eq!(dataset.len(), 2);
        let hu = &dataset.features[0];
        assert_eq!(hu.code(&Normalizer::default()).unwrap().as_str(), "HU");
        assert!(hu.representative_point().is_some());
        assert!(dataset.features[1].representative_point().is_none());
    }

    #[test]
    fn missing_features_is_empty() {
        assert!(PolygonDataset::from_value(&json!({ "type": "FeatureCollection" })).is_empty());
        assert!(PolygonDataset::from_value(&json!([])).is_empty());
    }

    #[test]
    fn source_is_left_untouched() {
        let raw = json!({ "id": "gr", "properties": { "NAME": "Greece" }, "geometry": null });
        let feature = RegionFeature::from_json(raw.clone());
        let _ = feature.code(&Normalizer::default());
        let _ = feature.representative_point();
        assert_eq!(feature.source(), &raw);
    }
}
