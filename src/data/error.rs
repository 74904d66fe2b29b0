use std::{fmt, path::PathBuf};

/// The three upstream datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetKind {
    Polygons,
    Statistics,
    Flows,
}

impl DatasetKind {
    pub fn to_str(&self) -> &'static str {
        match self {
            DatasetKind::Polygons => "polygons",
            DatasetKind::Statistics => "statistics",
            DatasetKind::Flows => "flows",
        }
    }

    pub fn order() -> [DatasetKind; 3] {
        [DatasetKind::Polygons, DatasetKind::Statistics, DatasetKind::Flows]
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

/// Failure to obtain one of the upstream datasets.
/// Always fatal to a pipeline run: no scene is built from a partial set.
#[derive(Debug)]
pub enum DatasetError {
    /// The dataset could not be read.
    Read { kind: DatasetKind, path: PathBuf, source: std::io::Error },
    /// The dataset is not valid JSON or does not match its schema.
    Parse { kind: DatasetKind, source: serde_json::Error },
    /// The loader for this dataset stopped before producing a result.
    Interrupted(DatasetKind),
}

impl DatasetError {
    /// Which dataset failed.
    pub fn kind(&self) -> DatasetKind {
        match self {
            DatasetError::Read { kind, .. } | DatasetError::Parse { kind, .. } => *kind,
            DatasetError::Interrupted(kind) => *kind,
        }
    }
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::Read { kind, path, .. } =>
                write!(f, "failed to read {kind} dataset from {}", path.display()),
            DatasetError::Parse { kind, .. } => write!(f, "failed to parse {kind} dataset"),
            DatasetError::Interrupted(kind) => write!(f, "loading the {kind} dataset was interrupted"),
        }
    }
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DatasetError::Read { source, .. } => Some(source),
            DatasetError::Parse { source, .. } => Some(source),
            DatasetError::Interrupted(_) => None,
        }
    }
}
