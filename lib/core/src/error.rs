use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("catalog artifact unavailable: {path}: {source}")]
    DataUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed catalog data: {0}")]
    MalformedData(String),

    #[error("catalog is empty after joining metadata to embeddings")]
    EmptyCatalog,

    #[error("invalid query dimension: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

impl Error {
    /// Wrap an I/O failure on a backing artifact.
    pub fn unavailable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::DataUnavailable {
            path: path.into(),
            source,
        }
    }
}
