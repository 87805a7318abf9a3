use thiserror::Error;

#[derive(Error, Debug)]
pub enum HubError {
    #[error("Program not found: {0}")]
    RecordNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Directory data unavailable: {0}")]
    DataUnavailable(String),

    #[error("Filter worker error: {0}")]
    Worker(String),
}

pub type Result<T> = std::result::Result<T, HubError>;
