use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur while loading or persisting recipes
#[derive(Error, Debug)]
pub enum RecipeError {
    /// The storage backend could not be read or written
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The persisted collection is not valid JSON in the expected shape
    #[error("Failed to parse stored recipes: {0}")]
    Parse(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Terminal I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reasons a create or update is refused without touching the collection
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The name is empty or whitespace-only
    #[error("Recipe name is required")]
    EmptyName,
}
