// End-to-end behavior of the join and route pipeline through the public API.

use std::fs;

use migramap::{
    build_scale, color_for, layers::COUNTRIES_FILL, load_all, synthesize, CentroidIndex, ColorScale,
    DatasetError, DatasetKind, Datasets, Engine, FallbackTable, FileSource, MapEvent, MapSession,
    MemorySink, Normalizer, PolygonDataset, RawFlowRecord, ScalePolicy, StatisticOpacity, ViewMode,
    DEFAULT_PALETTE,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn square(code: &str, x: f64, y: f64) -> serde_json::Value {
    json!({
        "type": "Feature",
        "properties": { "ISO2": code },
        "geometry": {
            "type": "Polygon",
            "coordinates": [[[x, y], [x + 2.0, y], [x + 2.0, y + 2.0], [x, y + 2.0], [x, y]]]
        }
    })
}

fn polygons(features: Vec<serde_json::Value>) -> PolygonDataset {
    PolygonDataset::from_value(&json!({ "type": "FeatureCollection", "features": features }))
}

#[test]
fn two_threshold_scale_covers_both_ends() {
    let scale = ColorScale::new(&[0.0, 100.0], &DEFAULT_PALETTE);

    assert_eq!(color_for(0.0, &scale), scale.lowest_color());
    assert_eq!(color_for(-5.0, &scale), scale.lowest_color());
    assert_eq!(color_for(100.0, &scale), scale.highest_color());
    assert_eq!(color_for(1e9, &scale), scale.highest_color());
}

#[test]
fn degenerate_sample_still_yields_increasing_thresholds() {
    let scale = build_scale(&[0.0, 0.0, 0.0], &ScalePolicy::MinMidMax, &DEFAULT_PALETTE);
    let thresholds = scale.thresholds();
    assert!(thresholds.windows(2).all(|w| w[0] < w[1]), "{thresholds:?}");
}

#[test]
fn unresolvable_route_is_dropped() {
    let normalizer = Normalizer::default();
    let index = CentroidIndex::build(&[], &normalizer);
    let fallback = FallbackTable::default();

    let edges = synthesize(&[RawFlowRecord::new("X", "Y", 10.0)], &index, &fallback, &normalizer);
    assert!(edges.is_empty());
}

#[test]
fn indexed_route_resolves_with_bearing() {
    let normalizer = Normalizer::default();
    let dataset = polygons(vec![square("AA", 0.0, 0.0), square("BB", 10.0, 0.0)]);
    let index = CentroidIndex::build(&dataset.features, &normalizer);

    let edges = synthesize(
        &[RawFlowRecord::new("aa", " bb ", 500.0)],
        &index,
        &FallbackTable::default(),
        &normalizer,
    );

    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].count(), 500.0);
    assert!((0.0..360.0).contains(&edges[0].bearing));
    assert!((edges[0].bearing - 90.0).abs() < 0.5);
}

#[test]
fn routes_keep_input_order_and_fall_back() {
    let normalizer = Normalizer::default();
    let dataset = polygons(vec![square("DE", 8.0, 48.0)]);
    let index = CentroidIndex::build(&dataset.features, &normalizer);
    let fallback = FallbackTable::builtin(&normalizer);

    let records = vec![
        RawFlowRecord::new("SY", "DE", 3.0),
        RawFlowRecord::new("QQ", "DE", 2.0),
        RawFlowRecord::new("AF", "DE", 1.0),
        RawFlowRecord::new("SY", "DE", 3.0),
    ];
    let edges = synthesize(&records, &index, &fallback, &normalizer);

    let counts: Vec<f64> = edges.iter().map(|e| e.count()).collect();
    assert_eq!(counts, vec![3.0, 1.0, 3.0]);
    for edge in &edges {
        assert!(index.contains(&edge.edge.from) || fallback.get(&edge.edge.from).is_some());
        assert!(index.contains(&edge.edge.to) || fallback.get(&edge.edge.to).is_some());
    }
}

#[test]
fn mode_round_trips_keep_one_click_handler() {
    let datasets = Datasets {
        polygons: polygons(vec![square("DE", 8.0, 48.0)]),
        ..Datasets::default()
    };
    let scene = Engine::default().build_scene(&datasets);

    let mut session = MapSession::new(MemorySink::new(), ViewMode::Statistic, StatisticOpacity::default());
    session.apply(&scene);
    for _ in 0..2 {
        session.switch_to(ViewMode::Flow);
        session.switch_to(ViewMode::Statistic);
    }

    let props = json!({ "ISO2": "DE", "NAME_EN": "Germany", "value": 42 });
    let ran = session.dispatch(COUNTRIES_FILL, MapEvent::Click, props.as_object());
    assert_eq!(ran, 1);
    let detail = session.view().country_detail().unwrap();
    assert_eq!(detail.name, "Germany");
    assert_eq!(detail.value, 42.0);
}

#[test]
fn load_all_reads_files_and_names_failures() {
    let dir = tempfile::tempdir().unwrap();
    let polygons = dir.path().join("countries.geojson");
    let statistics = dir.path().join("arrivals.json");
    let flows = dir.path().join("routes.json");
    fs::write(&polygons, json!({ "features": [square("DE", 8.0, 48.0)] }).to_string()).unwrap();
    fs::write(&statistics, r#"{ "totalsByCountry": { "de": "1200" } }"#).unwrap();
    fs::write(&flows, r#"{ "routes": [ { "from": "SY", "to": "DE", "count": 7 } ] }"#).unwrap();

    let source = FileSource { polygons: polygons.clone(), statistics: statistics.clone(), flows: flows.clone() };
    let datasets = load_all(&source).unwrap();
    assert_eq!(datasets.polygons.len(), 1);
    assert_eq!(datasets.flows.routes.len(), 1);

    let scene = Engine::default().build_scene(&datasets);
    assert_eq!(scene.stats.resolved, 1);
    assert_eq!(scene.ranking[0].value, 1200.0);

    fs::write(&flows, "not json").unwrap();
    let err = load_all(&source).unwrap_err();
    assert!(matches!(err, DatasetError::Parse { kind: DatasetKind::Flows, .. }), "{err}");

    fs::remove_file(&statistics).unwrap();
    let err = load_all(&source).unwrap_err();
    assert_eq!(err.kind(), DatasetKind::Statistics);
}
