use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde_json::Value;

/// Parse a GeoJSON Polygon or MultiPolygon geometry into a geo::MultiPolygon.
///
/// Both geometry types are flattened into the same representation. Coordinate
/// pairs that are not two finite numbers are skipped rather than rejected, and
/// `None` is returned when nothing usable remains or the geometry type is not
/// polygonal.
pub fn parse_polygonal(geometry: &Value) -> Option<MultiPolygon<f64>> {
    let coords = geometry.get("coordinates")?.as_array()?;
    let polygons: Vec<Polygon<f64>> = match geometry.get("type")?.as_str()? {
        "Polygon" => parse_polygon_rings(coords).into_iter().collect(),
        "MultiPolygon" => coords.iter()
            .filter_map(Value::as_array)
            .filter_map(|rings| parse_polygon_rings(rings))
            .collect(),
        _ => return None,
    };

    if polygons.iter().all(|p| p.exterior().0.is_empty() && p.interiors().is_empty()) {
        return None;
    }
    Some(MultiPolygon(polygons))
}

/// Parse the rings of one polygon: `[exterior, hole, hole, ...]`.
fn parse_polygon_rings(rings: &[Value]) -> Option<Polygon<f64>> {
    let mut rings = rings.iter()
        .filter_map(Value::as_array)
        .map(|ring| parse_ring_coords(ring));
    let exterior = rings.next()?;
    Some(Polygon::new(exterior, rings.collect()))
}

/// Parse a ring from GeoJSON coordinates: `[[x, y], [x, y], ...]`.
/// Extra ordinates (elevation) are ignored.
fn parse_ring_coords(coords: &[Value]) -> LineString<f64> {
    coords.iter()
        .filter_map(|pair| {
            let pair = pair.as_array()?;
            let x = pair.first()?.as_f64()?;
            let y = pair.get(1)?.as_f64()?;
            (x.is_finite() && y.is_finite()).then_some(Coord { x, y })
        })
        .collect::<Vec<_>>()
        .into()
}
