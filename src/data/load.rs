use std::{fs, path::PathBuf, thread};

use serde_json::Value;
use tracing::{debug, info};

use super::{DatasetError, DatasetKind, FlowDataset, PolygonDataset, StatisticsDataset};

/// Upstream provider of the raw dataset bytes.
pub trait DatasetSource: Sync {
    fn fetch(&self, kind: DatasetKind) -> Result<Vec<u8>, DatasetError>;
}

/// Reads the three datasets from files.
#[derive(Debug, Clone)]
pub struct FileSource {
    pub polygons: PathBuf,
    pub statistics: PathBuf,
    pub flows: PathBuf,
}

impl FileSource {
    fn path(&self, kind: DatasetKind) -> &PathBuf {
        match kind {
            DatasetKind::Polygons => &self.polygons,
            DatasetKind::Statistics => &self.statistics,
            DatasetKind::Flows => &self.flows,
        }
    }
}

impl DatasetSource for FileSource {
    fn fetch(&self, kind: DatasetKind) -> Result<Vec<u8>, DatasetError> {
        let path = self.path(kind);
        debug!("[load] reading {kind} from {}", path.display());
        fs::read(path).map_err(|source| DatasetError::Read { kind, path: path.clone(), source })
    }
}

/// The three parsed datasets. Only exists once all three have arrived.
#[derive(Debug, Clone, Default)]
pub struct Datasets {
    pub polygons: PolygonDataset,
    pub statistics: StatisticsDataset,
    pub flows: FlowDataset,
}

impl Datasets {
    /// Parse the three datasets from their raw bytes.
    pub fn from_slices(polygons: &[u8], statistics: &[u8], flows: &[u8]) -> Result<Self, DatasetError> {
        Ok(Self {
            polygons: parse_polygons(polygons)?,
            statistics: parse_json(DatasetKind::Statistics, statistics)?,
            flows: parse_json(DatasetKind::Flows, flows)?,
        })
    }
}

fn parse_json<T: serde::de::DeserializeOwned>(kind: DatasetKind, bytes: &[u8]) -> Result<T, DatasetError> {
    serde_json::from_slice(bytes).map_err(|source| DatasetError::Parse { kind, source })
}

fn parse_polygons(bytes: &[u8]) -> Result<PolygonDataset, DatasetError> {
    let collection: Value = parse_json(DatasetKind::Polygons, bytes)?;
    Ok(PolygonDataset::from_value(&collection))
}

/// Fetch all three datasets together and wait for every one of them.
///
/// The fetches run concurrently; the first failure (in dataset order) is
/// returned and nothing partial is produced.
pub fn load_all(source: &impl DatasetSource) -> Result<Datasets, DatasetError> {
    let [polygons, statistics, flows] = thread::scope(|scope| {
        let handles = DatasetKind::order().map(|kind| (kind, scope.spawn(move || source.fetch(kind))));
        handles.map(|(kind, handle)| handle.join().unwrap_or(Err(DatasetError::Interrupted(kind))))
    });

    let datasets = Datasets::from_slices(&polygons?, &statistics?, &flows?)?;
    info!(
        "[load] {} polygons, {} statistics, {} routes",
        datasets.polygons.len(),
        datasets.statistics.totals_by_country.len(),
        datasets.flows.routes.len(),
    );
    Ok(datasets)
}
