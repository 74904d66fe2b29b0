mod color;
mod scale;
mod width;

pub use color::{sample_ramp, Rgb};
pub use scale::{build_scale, color_for, repair_thresholds, ColorScale, ScalePolicy, ScaleStop, DEFAULT_PALETTE};
pub use width::{WidthScale, DEFAULT_WIDTH_STOPS};
