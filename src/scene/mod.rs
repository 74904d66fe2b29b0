mod build;
mod geojson;
mod ranking;

pub use build::{Engine, Legend, Scene, SceneStats};
pub use geojson::{CODE_PROPERTY, FILL_PROPERTY};
pub use ranking::{top_n, RankEntry};
