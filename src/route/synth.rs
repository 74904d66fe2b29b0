use geo::Point;
use tracing::{debug, info};

use super::edge::{FlowEdge, Resolution, ResolvedEdge};
use crate::{
    data::RawFlowRecord,
    geom::{bearing, CentroidIndex, FallbackTable},
    region::{Normalizer, RegionCode},
};

/// Resolves region codes to points: centroid index first, then the fallback table.
#[derive(Debug, Clone, Copy)]
pub struct PointResolver<'a> {
    index: &'a CentroidIndex,
    fallback: &'a FallbackTable,
}

impl<'a> PointResolver<'a> {
    pub fn new(index: &'a CentroidIndex, fallback: &'a FallbackTable) -> Self {
        Self { index, fallback }
    }

    pub fn resolve(&self, code: &RegionCode) -> Option<(Point<f64>, Resolution)> {
        self.index.get(code).map(|p| (p, Resolution::Centroid))
            .or_else(|| self.fallback.get(code).map(|p| (p, Resolution::Fallback)))
    }
}

/// Resolve every record's endpoints and keep only the edges where both resolved.
///
/// Order is preserved and nothing is deduplicated: the output is the input
/// with unresolvable records filtered out.
pub fn synthesize(
    records: &[RawFlowRecord],
    index: &CentroidIndex,
    fallback: &FallbackTable,
    normalizer: &Normalizer,
) -> Vec<ResolvedEdge> {
    let resolver = PointResolver::new(index, fallback);
    let edges: Vec<ResolvedEdge> = records.iter()
        .map(|record| FlowEdge::from_record(record, normalizer))
        .filter_map(|edge| resolve_edge(edge, &resolver))
        .collect();

    let dropped = records.len() - edges.len();
    info!("[routes] {} of {} routes resolved ({} dropped)", edges.len(), records.len(), dropped);
    edges
}

fn resolve_edge(edge: FlowEdge, resolver: &PointResolver<'_>) -> Option<ResolvedEdge> {
    let (Some((from_point, from_resolution)), Some((to_point, to_resolution))) =
        (resolver.resolve(&edge.from), resolver.resolve(&edge.to))
    else {
        debug!("[routes] dropping {} -> {}: unresolved endpoint", edge.from, edge.to);
        return None;
    };

    Some(ResolvedEdge {
        bearing: bearing(from_point, to_point),
        edge,
        from_point,
        to_point,
        from_resolution,
        to_resolution,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{data::RegionFeature, region::normalize};

    use super::*;

    fn square(code: &str, x: f64, y: f64) -> RegionFeature {
        RegionFeature::from_json(json!({
            "properties": { "ISO2": code },
            "geometry": { "type": "Polygon", "coordinates": [[[x - 1.0, y - 1.0], [x + 1.0, y - 1.0], [x + 1.0, y + 1.0], [x - 1.0, y - 1.0]]] }
        }))
    }

    fn fixture() -> (CentroidIndex, FallbackTable, Normalizer) {
        let normalizer = Normalizer::default();
        let index = CentroidIndex::build(
            &[square("DE", 10.0, 51.0), square("AT", 14.0, 47.5), square("EL", 22.0, 39.0)],
            &normalizer,
        );
        (index, FallbackTable::builtin(&normalizer), normalizer)
    }

    #[test]
    fn centroid_takes_precedence_over_fallback() {
        let (index, mut fallback, _) = fixture();
        fallback.insert(normalize("DE"), Point::new(0.0, 0.0));
        let resolver = PointResolver::new(&index, &fallback);

        assert_eq!(resolver.resolve(&normalize("DE")), Some((Point::new(10.0, 51.0), Resolution::Centroid)));
        assert_eq!(resolver.resolve(&normalize("SY")).map(|(_, r)| r), Some(Resolution::Fallback));
        assert_eq!(resolver.resolve(&normalize("ZZ")), None);
    }

    #[test]
    fn unresolved_edges_are_dropped() {
        let (index, fallback, normalizer) = fixture();
        let records = [
            RawFlowRecord::new("X", "DE", 500.0),
            RawFlowRecord::new("DE", "Y", 500.0),
        ];
        assert!(synthesize(&records, &index, &fallback, &normalizer).is_empty());
    }

    #[test]
    fn order_is_preserved_without_dedup() {
        let (index, fallback, normalizer) = fixture();
        let records = [
            RawFlowRecord::new("SY", "DE", 3.0).with_path("Balkan"),
            RawFlowRecord::new("XX", "DE", 99.0),
            RawFlowRecord::new("af", "at", 2.0),
            RawFlowRecord::new("SY", "DE", 1.0),
            RawFlowRecord::new("TR", "gr", 4.0),
        ];
        let edges = synthesize(&records, &index, &fallback, &normalizer);

        let counts: Vec<f64> = edges.iter().map(ResolvedEdge::count).collect();
        assert_eq!(counts, vec![3.0, 2.0, 1.0, 4.0]);
        assert_eq!(edges[0].path(), Some("Balkan"));
        assert_eq!(edges[1].edge.from.as_str(), "AF");
        assert_eq!(edges[3].edge.to.as_str(), "EL");
        assert_eq!(edges[3].to_resolution, Resolution::Centroid);
        assert_eq!(edges[3].from_resolution, Resolution::Fallback);
    }

    #[test]
    fn every_output_edge_is_resolvable() {
        let (index, fallback, normalizer) = fixture();
        let codes = ["DE", "AT", "EL", "SY", "AF", "QQ", "", "gb"];
        let records: Vec<RawFlowRecord> = codes.iter()
            .flat_map(|a| codes.iter().map(move |b| RawFlowRecord::new(a, b, 1.0)))
            .collect();
        let resolver = PointResolver::new(&index, &fallback);

        for edge in synthesize(&records, &index, &fallback, &normalizer) {
            assert!(resolver.resolve(&edge.edge.from).is_some());
            assert!(resolver.resolve(&edge.edge.to).is_some());
            assert!((0.0..360.0).contains(&edge.bearing));
        }
    }
}
