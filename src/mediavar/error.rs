use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum MediaError {
    #[error("Destination already exists: {0}")]
    DestinationExists(String),

    #[error("Source file is missing: {0}")]
    SourceMissing(String),

    #[error("Manipulation log at {path} is corrupt: {source}")]
    CorruptLog {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Storage backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Asset not found: {0}")]
    AssetNotFound(Uuid),

    #[error("Unknown disk: {0}")]
    UnknownDisk(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

impl MediaError {
    /// Wraps a raw backend I/O failure, keeping the path that was being touched.
    pub fn backend(path: &str, err: std::io::Error) -> Self {
        MediaError::BackendUnavailable(format!("{}: {}", path, err))
    }
}

pub type Result<T> = std::result::Result<T, MediaError>;
