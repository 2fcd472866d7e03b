//! Named-slot storage backends.
//!
//! A backend holds whole serialized values under string slot names. It does
//! not interpret the contents; `RecipeStore` owns the format.
//!
//! # Implementors
//!
//! - [`MemoryStorage`] - For tests and ephemeral sessions
//! - [`FileStorage`] - One JSON file per slot in a data directory

mod file;
mod memory;

use std::io;
use thiserror::Error;

pub use self::file::FileStorage;
pub use self::memory::MemoryStorage;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The backend refused the operation.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// A key-value store of whole serialized values.
pub trait SlotStorage {
    /// Returns the contents of `slot`, or `None` if it was never written.
    fn read(&self, slot: &str) -> StorageResult<Option<String>>;

    /// Replaces the contents of `slot`.
    ///
    /// After this returns successfully the new contents survive a restart.
    fn write(&mut self, slot: &str, contents: &str) -> StorageResult<()>;
}

impl<S: SlotStorage + ?Sized> SlotStorage for Box<S> {
    fn read(&self, slot: &str) -> StorageResult<Option<String>> {
        (**self).read(slot)
    }

    fn write(&mut self, slot: &str, contents: &str) -> StorageResult<()> {
        (**self).write(slot, contents)
    }
}
