mod bbox;
mod bearing;
mod centroid;
mod fallback;
mod parse;

pub use bbox::{coords_bounds, representative_point};
pub use bearing::bearing;
pub use centroid::CentroidIndex;
pub use fallback::FallbackTable;
pub(crate) use parse::parse_polygonal;
