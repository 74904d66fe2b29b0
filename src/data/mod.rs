mod error;
mod flows;
mod load;
mod polygons;
mod statistics;
mod value;

pub use error::{DatasetError, DatasetKind};
pub use flows::{FlowDataset, RawFlowRecord};
pub use load::{load_all, DatasetSource, Datasets, FileSource};
pub use polygons::{PolygonDataset, RegionFeature};
pub use statistics::{StatisticRecord, StatisticsDataset};
pub use value::magnitude;
