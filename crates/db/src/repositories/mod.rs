use campus_core::errors::ApplicationError;
use thiserror::Error;

pub mod directory;
pub mod memory;

pub use directory::SqlDirectoryRepository;
pub use memory::{DirectoryData, InMemoryDirectory};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("decode error: {0}")]
    Decode(String),
}

impl From<RepositoryError> for ApplicationError {
    fn from(error: RepositoryError) -> Self {
        ApplicationError::Persistence(error.to_string())
    }
}
