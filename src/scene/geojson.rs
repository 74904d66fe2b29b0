use serde_json::{json, Map, Value};

use crate::{
    data::{RegionFeature, StatisticRecord},
    region::Normalizer,
    route::ResolvedEdge,
    scale::{ColorScale, WidthScale},
};

/// Property written onto fill features holding the canonical code.
pub const CODE_PROPERTY: &str = "ISO2";

/// Property holding the continuous ramp color the fill layer paints with.
/// `color` keeps the stepped class color of the legend.
pub const FILL_PROPERTY: &str = "fill";

/// Copy the polygon features into a new FeatureCollection, annotated with
/// canonical code, statistic value, class color and ramp color.
///
/// Features keep their dataset order. A feature without a resolvable code
/// still renders, with value 0 and the lowest color.
pub(crate) fn fill_collection(
    features: &[RegionFeature],
    statistics: &StatisticRecord,
    scale: &ColorScale,
    normalizer: &Normalizer,
) -> Value {
    let features: Vec<Value> = features.iter().map(|feature| {
        let code = feature.code(normalizer);
        let value = code.as_ref().map_or(0.0, |code| statistics.get(code));

        let mut properties = feature.properties();
        properties.insert(CODE_PROPERTY.to_string(), code.as_ref().map_or(Value::Null, |c| json!(c.as_str())));
        properties.insert("value".to_string(), json!(value));
        properties.insert("color".to_string(), json!(scale.color_for(value).to_string()));
        properties.insert(FILL_PROPERTY.to_string(), json!(scale.interpolate(value).to_string()));

        let mut out = Map::new();
        out.insert("type".to_string(), json!("Feature"));
        match &code {
            Some(code) => { out.insert("id".to_string(), json!(code.as_str())); }
            None => if let Some(id) = feature.source().get("id") { out.insert("id".to_string(), id.clone()); },
        }
        out.insert("geometry".to_string(), feature.source().get("geometry").cloned().unwrap_or(Value::Null));
        out.insert("properties".to_string(), Value::Object(properties));
        Value::Object(out)
    }).collect();

    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

/// Build the route FeatureCollection: one two-point LineString per resolved edge.
pub(crate) fn line_collection(edges: &[ResolvedEdge], widths: &WidthScale) -> Value {
    let features: Vec<Value> = edges.iter().enumerate().map(|(idx, edge)| json!({
        "type": "Feature",
        "id": idx,
        "geometry": {
            "type": "LineString",
            "coordinates": [
                [edge.from_point.x(), edge.from_point.y()],
                [edge.to_point.x(), edge.to_point.y()],
            ],
        },
        "properties": {
            "from": edge.edge.from.as_str(),
            "to": edge.edge.to.as_str(),
            "count": edge.count(),
            "path": edge.path().unwrap_or_default(),
            "bearing": edge.bearing,
            "width": widths.width_for(edge.count()),
        },
    })).collect();

    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}
