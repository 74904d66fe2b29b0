use geo::Point;

use crate::{data::RawFlowRecord, region::{Normalizer, RegionCode}};

/// A directed origin → destination relationship. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowEdge {
    pub from: RegionCode,
    pub to: RegionCode,
    pub count: f64,
    pub path: Option<String>,
}

impl FlowEdge {
    /// Normalize a raw record's endpoints.
    pub fn from_record(record: &RawFlowRecord, normalizer: &Normalizer) -> Self {
        Self {
            from: normalizer.normalize(&record.from),
            to: normalizer.normalize(&record.to),
            count: record.count,
            path: record.path.clone(),
        }
    }
}

/// Which tier resolved an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Centroid,
    Fallback,
}

/// A flow edge whose two endpoints both resolved to points.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedEdge {
    pub edge: FlowEdge,
    pub from_point: Point<f64>,
    pub to_point: Point<f64>,
    pub from_resolution: Resolution,
    pub to_resolution: Resolution,
    /// Initial bearing from origin to destination, degrees in [0, 360).
    pub bearing: f64,
}

impl ResolvedEdge {
    #[inline] pub fn count(&self) -> f64 { self.edge.count }

    #[inline] pub fn path(&self) -> Option<&str> { self.edge.path.as_deref() }
}
