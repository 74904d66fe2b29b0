use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// Source holding the annotated polygon features.
pub const COUNTRIES_SOURCE: &str = "countries";
/// Source holding the route lines.
pub const ROUTES_SOURCE: &str = "routes";

pub const COUNTRIES_FILL: &str = "countries-fill";
pub const COUNTRIES_OUTLINE: &str = "countries-outline";
pub const ROUTES_LINE: &str = "routes-line";
pub const ROUTES_ARROWS: &str = "routes-arrows";

/// Pointer events the engine subscribes to on interactive layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MapEvent {
    Click,
    MouseEnter,
    MouseMove,
    MouseLeave,
}

/// Engine-side callbacks a sink can invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Handler {
    ShowCountry,
    ShowRoute,
    HideRoute,
    PointerCursor,
    DefaultCursor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Fill,
    Line,
    Symbol,
}

/// Declaration of a layer to add to the sink.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerSpec {
    pub id: &'static str,
    pub kind: LayerKind,
    pub source: &'static str,
    /// Renderer-specific paint/layout hints, passed through untouched.
    pub style: Value,
}

/// The map renderer as seen by the engine.
///
/// Mirrors the imperative surface of a web map: sources and layers are
/// added once and mutated in place, and listeners are plain (layer, event,
/// handler) subscriptions that a sink does not deduplicate on its own.
pub trait RenderSink {
    fn has_source(&self, id: &str) -> bool;
    fn add_source(&mut self, id: &str, data: Value);
    fn set_source_data(&mut self, id: &str, data: Value);

    fn has_layer(&self, id: &str) -> bool;
    fn add_layer(&mut self, layer: LayerSpec);
    fn set_visibility(&mut self, layer: &str, visible: bool);
    fn set_opacity(&mut self, layer: &str, opacity: f64);

    fn on(&mut self, layer: &str, event: MapEvent, handler: Handler);
    fn off(&mut self, layer: &str, event: MapEvent, handler: Handler);
    /// Handlers currently subscribed to (layer, event), one entry per subscription.
    fn listeners(&self, layer: &str, event: MapEvent) -> Vec<Handler>;
}

/// Rendered state of one layer in a [`MemorySink`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerState {
    pub kind: LayerKind,
    pub source: &'static str,
    pub visible: bool,
    pub opacity: Option<f64>,
    pub style: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Listener {
    layer: String,
    event: MapEvent,
    handler: Handler,
}

/// In-memory render sink: records what a map renderer would hold.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MemorySink {
    sources: BTreeMap<String, Value>,
    layers: BTreeMap<String, LayerState>,
    listeners: Vec<Listener>,
    #[serde(skip)]
    source_adds: usize,
    #[serde(skip)]
    layer_adds: usize,
}

impl MemorySink {
    pub fn new() -> Self { Self::default() }

    #[inline] pub fn source(&self, id: &str) -> Option<&Value> { self.sources.get(id) }

    #[inline] pub fn layer(&self, id: &str) -> Option<&LayerState> { self.layers.get(id) }

    #[inline] pub fn layers(&self) -> &BTreeMap<String, LayerState> { &self.layers }

    /// Total number of subscriptions across all layers.
    #[inline] pub fn listener_count(&self) -> usize { self.listeners.len() }

    /// How many times `add_source` / `add_layer` were called.
    #[inline] pub fn add_counts(&self) -> (usize, usize) { (self.source_adds, self.layer_adds) }
}

impl RenderSink for MemorySink {
    fn has_source(&self, id: &str) -> bool { self.sources.contains_key(id) }

    fn add_source(&mut self, id: &str, data: Value) {
        self.source_adds += 1;
        self.sources.insert(id.to_string(), data);
    }

    fn set_source_data(&mut self, id: &str, data: Value) {
        if let Some(slot) = self.sources.get_mut(id) { *slot = data }
    }

    fn has_layer(&self, id: &str) -> bool { self.layers.contains_key(id) }

    fn add_layer(&mut self, layer: LayerSpec) {
        self.layer_adds += 1;
        self.layers.insert(layer.id.to_string(), LayerState {
            kind: layer.kind,
            source: layer.source,
            visible: true,
            opacity: None,
            style: layer.style,
        });
    }

    fn set_visibility(&mut self, layer: &str, visible: bool) {
        if let Some(state) = self.layers.get_mut(layer) { state.visible = visible }
    }

    fn set_opacity(&mut self, layer: &str, opacity: f64) {
        if let Some(state) = self.layers.get_mut(layer) { state.opacity = Some(opacity) }
    }

    fn on(&mut self, layer: &str, event: MapEvent, handler: Handler) {
        self.listeners.push(Listener { layer: layer.to_string(), event, handler });
    }

    fn off(&mut self, layer: &str, event: MapEvent, handler: Handler) {
        let found = self.listeners.iter()
            .position(|l| l.layer == layer && l.event == event && l.handler == handler);
        if let Some(i) = found { self.listeners.remove(i); }
    }

    fn listeners(&self, layer: &str, event: MapEvent) -> Vec<Handler> {
        self.listeners.iter()
            .filter(|l| l.layer == layer && l.event == event)
            .map(|l| l.handler)
            .collect()
    }
}
