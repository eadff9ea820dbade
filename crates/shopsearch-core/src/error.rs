use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Operation failed: {0}")]
    Operation(String),
}

impl Error {
    /// True when `err` wraps an [`Error::NotFound`].
    pub fn is_not_found(err: &anyhow::Error) -> bool {
        matches!(err.downcast_ref::<Error>(), Some(Error::NotFound(_)))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
