use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info};

use super::{
    mode::ViewMode,
    sink::{
        Handler, MapEvent, RenderSink, COUNTRIES_FILL, ROUTES_ARROWS, ROUTES_LINE,
    },
};
use crate::{
    config::StatisticOpacity,
    data::magnitude,
    region::{feature_name, first_text, CODE_KEYS},
};

/// Subscriptions the engine keeps on interactive layers.
const BINDINGS: &[(&str, MapEvent, Handler)] = &[
    (COUNTRIES_FILL, MapEvent::Click, Handler::ShowCountry),
    (COUNTRIES_FILL, MapEvent::MouseEnter, Handler::PointerCursor),
    (COUNTRIES_FILL, MapEvent::MouseLeave, Handler::DefaultCursor),
    (ROUTES_LINE, MapEvent::MouseMove, Handler::ShowRoute),
    (ROUTES_LINE, MapEvent::MouseLeave, Handler::HideRoute),
];

/// Tracks which handler is bound to each (layer, event) so that binding
/// again always unbinds the previous subscription first.
#[derive(Debug, Clone, Default)]
pub struct HandlerRegistry {
    bound: BTreeMap<(String, MapEvent), Handler>,
}

impl HandlerRegistry {
    /// Bind `handler` to (layer, event), replacing whatever was bound there.
    pub fn register(&mut self, sink: &mut impl RenderSink, layer: &str, event: MapEvent, handler: Handler) {
        if let Some(previous) = self.bound.remove(&(layer.to_string(), event)) {
            sink.off(layer, event, previous);
        }
        sink.on(layer, event, handler);
        self.bound.insert((layer.to_string(), event), handler);
    }

    /// Unbind everything this registry bound.
    pub fn clear(&mut self, sink: &mut impl RenderSink) {
        for ((layer, event), handler) in std::mem::take(&mut self.bound) {
            sink.off(&layer, event, handler);
        }
    }

    #[inline] pub fn len(&self) -> usize { self.bound.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.bound.is_empty() }
}

/// Details of a clicked country.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryDetail {
    pub name: String,
    pub code: String,
    pub value: f64,
}

/// Details of a hovered route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteDetail {
    pub from: String,
    pub to: String,
    pub count: f64,
    pub path: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Cursor {
    #[default]
    Default,
    Pointer,
}

/// Outcome of a mode switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: ViewMode,
    pub to: ViewMode,
}

/// Two-mode view state reconciled against a render sink.
#[derive(Debug, Clone)]
pub struct ViewStateManager {
    mode: ViewMode,
    opacity: StatisticOpacity,
    registry: HandlerRegistry,
    country: Option<CountryDetail>,
    route: Option<RouteDetail>,
    cursor: Cursor,
}

impl ViewStateManager {
    pub fn new(mode: ViewMode, opacity: StatisticOpacity) -> Self {
        Self {
            mode,
            opacity,
            registry: HandlerRegistry::default(),
            country: None,
            route: None,
            cursor: Cursor::Default,
        }
    }

    /// Start in the mode named by a navigation query (`?v=routes`).
    pub fn from_query(query: &str, opacity: StatisticOpacity) -> Self {
        Self::new(ViewMode::from_query(query), opacity)
    }

    #[inline] pub fn mode(&self) -> ViewMode { self.mode }

    #[inline] pub fn cursor(&self) -> Cursor { self.cursor }

    #[inline] pub fn registry(&self) -> &HandlerRegistry { &self.registry }

    #[inline] pub fn country_detail(&self) -> Option<&CountryDetail> { self.country.as_ref() }

    /// Route details are only shown in the flow view.
    pub fn route_detail(&self) -> Option<&RouteDetail> {
        match self.mode {
            ViewMode::Flow => self.route.as_ref(),
            ViewMode::Statistic => None,
        }
    }

    /// Fill opacity of the statistic layer in the current mode.
    pub fn statistic_opacity(&self) -> f64 {
        match self.mode {
            ViewMode::Statistic => self.opacity.statistic,
            ViewMode::Flow => self.opacity.flow,
        }
    }

    /// Push layer visibility and opacity for the current mode to the sink.
    /// Layers the sink does not have yet are skipped.
    pub fn apply(&self, sink: &mut impl RenderSink) {
        let flow = self.mode == ViewMode::Flow;
        if sink.has_layer(COUNTRIES_FILL) {
            sink.set_visibility(COUNTRIES_FILL, true);
            sink.set_opacity(COUNTRIES_FILL, self.statistic_opacity());
        }
        for layer in [ROUTES_LINE, ROUTES_ARROWS] {
            if sink.has_layer(layer) { sink.set_visibility(layer, flow) }
        }
    }

    /// (Re)bind the interaction handlers of every layer the sink has.
    pub fn bind(&mut self, sink: &mut impl RenderSink) {
        for &(layer, event, handler) in BINDINGS {
            if sink.has_layer(layer) { self.registry.register(sink, layer, event, handler) }
        }
    }

    /// Remove every handler this manager bound.
    pub fn unbind(&mut self, sink: &mut impl RenderSink) {
        self.registry.clear(sink);
    }

    /// Switch modes: clear the transient state of the mode being left, then
    /// reconcile layers and handlers.
    pub fn switch_to(&mut self, mode: ViewMode, sink: &mut impl RenderSink) -> Transition {
        let from = self.mode;
        if from != mode {
            match from {
                ViewMode::Flow => self.route = None,
                ViewMode::Statistic => self.country = None,
            }
            info!("[view] {from} -> {mode}");
        }
        self.mode = mode;
        self.apply(sink);
        self.bind(sink);
        Transition { from, to: mode }
    }

    /// Run one handler against the properties of the feature under the pointer.
    pub fn handle(&mut self, handler: Handler, properties: Option<&Map<String, Value>>) {
        debug!("[view] {handler:?}");
        match handler {
            Handler::ShowCountry => {
                let Some(props) = properties else { return };
                self.country = Some(CountryDetail {
                    name: feature_name(props),
                    code: first_text(props, CODE_KEYS).unwrap_or_else(|| "??".to_string()),
                    value: props.get("value").map_or(0.0, magnitude),
                });
                self.route = None;
            }
            Handler::ShowRoute => {
                let Some(props) = properties else { return };
                let text = |key: &str| props.get(key).and_then(Value::as_str).unwrap_or_default().to_string();
                self.route = Some(RouteDetail {
                    from: text("from"),
                    to: text("to"),
                    count: props.get("count").map_or(0.0, magnitude),
                    path: Some(text("path")).filter(|p| !p.is_empty()),
                });
            }
            Handler::HideRoute => self.route = None,
            Handler::PointerCursor => self.cursor = Cursor::Pointer,
            Handler::DefaultCursor => self.cursor = Cursor::Default,
        }
    }

    /// Close the country detail.
    pub fn dismiss_country(&mut self) {
        self.country = None;
    }
}
