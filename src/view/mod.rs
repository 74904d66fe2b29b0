mod mode;
mod session;
mod sink;
mod state;

pub use mode::{ViewMode, VIEW_PARAM};
pub use session::{Liveness, MapSession};
pub use sink::{
    Handler, LayerKind, LayerSpec, LayerState, MapEvent, MemorySink, RenderSink,
    COUNTRIES_FILL, COUNTRIES_OUTLINE, COUNTRIES_SOURCE, ROUTES_ARROWS, ROUTES_LINE, ROUTES_SOURCE,
};
pub use state::{CountryDetail, Cursor, HandlerRegistry, RouteDetail, Transition, ViewStateManager};
