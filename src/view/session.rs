use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use serde_json::{json, Map, Value};
use tracing::{debug, warn};

use super::{
    mode::ViewMode,
    sink::{
        LayerKind, LayerSpec, MapEvent, RenderSink, COUNTRIES_FILL, COUNTRIES_OUTLINE,
        COUNTRIES_SOURCE, ROUTES_ARROWS, ROUTES_LINE, ROUTES_SOURCE,
    },
    state::{Transition, ViewStateManager},
};
use crate::{
    config::StatisticOpacity,
    data::{DatasetError, Datasets},
    scene::{Engine, Scene, FILL_PROPERTY},
};

/// Shared flag that turns false when the owning session is torn down.
#[derive(Debug, Clone)]
pub struct Liveness(Arc<AtomicBool>);

impl Liveness {
    #[inline] pub fn is_alive(&self) -> bool { self.0.load(Ordering::Acquire) }
}

/// Explicit context owning the render sink and the view state.
///
/// Built once at setup and torn down explicitly; every operation on the map
/// goes through it. After [`MapSession::teardown`] the sink is never touched
/// again.
#[derive(Debug)]
pub struct MapSession<S: RenderSink> {
    sink: S,
    view: ViewStateManager,
    alive: Arc<AtomicBool>,
}

impl<S: RenderSink> MapSession<S> {
    pub fn new(sink: S, mode: ViewMode, opacity: StatisticOpacity) -> Self {
        Self {
            sink,
            view: ViewStateManager::new(mode, opacity),
            alive: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Start in the mode named by a navigation query.
    pub fn from_query(sink: S, query: &str, opacity: StatisticOpacity) -> Self {
        Self::new(sink, ViewMode::from_query(query), opacity)
    }

    /// Handle for work that outlives a borrow of the session (e.g. a pending load).
    pub fn liveness(&self) -> Liveness { Liveness(Arc::clone(&self.alive)) }

    #[inline] pub fn is_alive(&self) -> bool { self.alive.load(Ordering::Acquire) }

    #[inline] pub fn sink(&self) -> &S { &self.sink }

    #[inline] pub fn view(&self) -> &ViewStateManager { &self.view }

    #[inline] pub fn mode(&self) -> ViewMode { self.view.mode() }

    /// Apply a scene: create or replace sources, add missing layers, then
    /// reconcile the view. Applying the same scene again changes nothing.
    /// Returns false if the session was torn down.
    pub fn apply(&mut self, scene: &Scene) -> bool {
        if !self.is_alive() {
            debug!("[session] torn down, scene dropped");
            return false;
        }

        upsert_source(&mut self.sink, COUNTRIES_SOURCE, scene.fill.clone());
        upsert_source(&mut self.sink, ROUTES_SOURCE, scene.lines.clone());
        for layer in layer_specs() {
            if !self.sink.has_layer(layer.id) { self.sink.add_layer(layer) }
        }

        self.view.apply(&mut self.sink);
        self.view.bind(&mut self.sink);
        true
    }

    /// Build and apply a scene from a finished load. Load failures are
    /// returned to the caller untouched; a torn-down session ignores the result.
    pub fn apply_loaded(&mut self, engine: &Engine, loaded: Result<Datasets, DatasetError>) -> Result<bool, DatasetError> {
        let datasets = loaded?;
        if !self.is_alive() { return Ok(false) }
        let scene = engine.build_scene(&datasets);
        Ok(self.apply(&scene))
    }

    /// Switch view modes. `None` after teardown.
    pub fn switch_to(&mut self, mode: ViewMode) -> Option<Transition> {
        if !self.is_alive() { return None }
        Some(self.view.switch_to(mode, &mut self.sink))
    }

    /// Deliver a pointer event from the sink to every handler subscribed to
    /// it. Returns how many handlers ran.
    pub fn dispatch(&mut self, layer: &str, event: MapEvent, properties: Option<&Map<String, Value>>) -> usize {
        if !self.is_alive() { return 0 }
        let handlers = self.sink.listeners(layer, event);
        for &handler in &handlers { self.view.handle(handler, properties) }
        handlers.len()
    }

    /// Close the country detail.
    pub fn dismiss_country(&mut self) {
        self.view.dismiss_country();
    }

    /// Mark the session dead and release every handler it bound.
    pub fn teardown(&mut self) {
        if !self.alive.swap(false, Ordering::AcqRel) {
            warn!("[session] teardown called twice");
            return;
        }
        self.view.unbind(&mut self.sink);
    }

    /// Tear down and hand back the sink.
    pub fn into_sink(mut self) -> S {
        if self.is_alive() { self.teardown() }
        self.sink
    }
}

fn upsert_source(sink: &mut impl RenderSink, id: &str, data: Value) {
    if sink.has_source(id) {
        sink.set_source_data(id, data);
    } else {
        sink.add_source(id, data);
    }
}

/// Layers of the scene, bottom to top.
fn layer_specs() -> [LayerSpec; 4] {
    [
        LayerSpec {
            id: COUNTRIES_FILL,
            kind: LayerKind::Fill,
            source: COUNTRIES_SOURCE,
            style: json!({ "fill-color": ["get", FILL_PROPERTY] }),
        },
        LayerSpec {
            id: COUNTRIES_OUTLINE,
            kind: LayerKind::Line,
            source: COUNTRIES_SOURCE,
            style: json!({ "line-color": "#ffffff", "line-width": 1.2, "line-opacity": 0.9 }),
        },
        LayerSpec {
            id: ROUTES_LINE,
            kind: LayerKind::Line,
            source: ROUTES_SOURCE,
            style: json!({ "line-color": "#ef4444", "line-opacity": 0.85, "line-width": ["get", "width"] }),
        },
        LayerSpec {
            id: ROUTES_ARROWS,
            kind: LayerKind::Symbol,
            source: ROUTES_SOURCE,
            style: json!({ "symbol-placement": "line", "text-field": "▶", "text-rotate": ["get", "bearing"] }),
        },
    ]
}
