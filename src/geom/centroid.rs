use ahash::AHashMap;
use geo::Point;
use tracing::{debug, info};

use crate::{data::RegionFeature, region::{Normalizer, RegionCode}};

/// One representative point per region, keyed by canonical code.
#[derive(Debug, Clone, Default)]
pub struct CentroidIndex {
    points: AHashMap<RegionCode, Point<f64>>,
}

impl CentroidIndex {
    /// Index the representative point of every feature that has both a code
    /// and at least one coordinate. When several features share a code the
    /// first one in dataset order is kept.
    pub fn build(features: &[RegionFeature], normalizer: &Normalizer) -> Self {
        let mut points = AHashMap::with_capacity(features.len());
        let mut skipped = 0usize;

        for feature in features {
            let Some(code) = feature.code(normalizer) else {
                skipped += 1;
                continue;
            };
            let Some(point) = feature.representative_point() else {
                debug!("[centroids] {code} has no extractable coordinates");
                skipped += 1;
                continue;
            };
            if points.contains_key(&code) {
                debug!("[centroids] duplicate feature for {code}, keeping the first");
                continue;
            }
            points.insert(code, point);
        }

        info!("[centroids] indexed {} features ({} skipped)", points.len(), skipped);
        Self { points }
    }

    #[inline] pub fn get(&self, code: &RegionCode) -> Option<Point<f64>> { self.points.get(code).copied() }

    #[inline] pub fn contains(&self, code: &RegionCode) -> bool { self.points.contains_key(code) }

    #[inline] pub fn len(&self) -> usize { self.points.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.points.is_empty() }

    /// Iterate over (code, point) pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&RegionCode, &Point<f64>)> {
        self.points.iter()
    }
}
