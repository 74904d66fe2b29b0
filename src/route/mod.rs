mod edge;
mod synth;

pub use edge::{FlowEdge, Resolution, ResolvedEdge};
pub use synth::{synthesize, PointResolver};
