use thiserror::Error;

pub type Result<T> = std::result::Result<T, ImporterError>;

#[derive(Error, Debug)]
pub enum ImporterError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Storage error: {0}")]
    StorageError(#[from] storage::StorageError),

    #[error("No results were parsed from the fetched pages; refusing to replace stored data")]
    EmptyResultSet,

    #[error("Seed file error: {0}")]
    SeedError(String),
}
