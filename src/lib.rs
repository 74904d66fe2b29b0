#![doc = "migramap public API"]
mod config;
mod data;
mod geom;
mod region;
mod route;
mod scale;
mod scene;
mod view;

#[doc(inline)]
pub use config::{EngineConfig, StatisticOpacity};

#[doc(inline)]
pub use data::{
    load_all, magnitude, DatasetError, DatasetKind, DatasetSource, Datasets, FileSource, FlowDataset,
    PolygonDataset, RawFlowRecord, RegionFeature, StatisticRecord, StatisticsDataset,
};

#[doc(inline)]
pub use geom::{bearing, coords_bounds, representative_point, CentroidIndex, FallbackTable};

#[doc(inline)]
pub use region::{normalize, Normalizer, RegionCode, CODE_KEYS, NAME_KEYS, UNKNOWN_NAME};

#[doc(inline)]
pub use route::{synthesize, FlowEdge, PointResolver, Resolution, ResolvedEdge};

#[doc(inline)]
pub use scale::{
    build_scale, color_for, repair_thresholds, sample_ramp, ColorScale, Rgb, ScalePolicy, ScaleStop, WidthScale,
    DEFAULT_PALETTE, DEFAULT_WIDTH_STOPS,
};

#[doc(inline)]
pub use scene::{top_n, Engine, Legend, RankEntry, Scene, SceneStats, CODE_PROPERTY, FILL_PROPERTY};

#[doc(inline)]
pub use view::{
    CountryDetail, Cursor, Handler, LayerKind, LayerSpec, LayerState, Liveness, MapEvent, MapSession,
    MemorySink, RenderSink, RouteDetail, Transition, ViewMode, ViewStateManager, HandlerRegistry, VIEW_PARAM,
};

/// Layer and source identifiers used in the scene.
pub mod layers {
    pub use crate::view::{
        COUNTRIES_FILL, COUNTRIES_OUTLINE, COUNTRIES_SOURCE, ROUTES_ARROWS, ROUTES_LINE, ROUTES_SOURCE,
    };
}
