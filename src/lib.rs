pub mod config;
pub mod draft;
pub mod error;
pub mod model;
pub mod render;
pub mod shell;
pub mod storage;
pub mod store;
pub mod view;

pub use config::AppConfig;
pub use draft::{Draft, Field, Form, FormMode};
pub use error::{RecipeError, Rejection};
pub use model::{Recipe, RecipeId};
pub use render::{render_list, split_items, RenderedList};
pub use storage::{FileStorage, MemoryStorage, SlotStorage, StorageError};
pub use store::{load_collection, Clock, Notice, RecipeStore, SystemClock};

/// Open the file-backed store described by `config`.
pub fn open_store(config: &AppConfig) -> Result<RecipeStore<FileStorage>, RecipeError> {
    let storage = FileStorage::new(&config.data_dir);
    Ok(RecipeStore::open(storage, config.slot.clone())?.with_write_retries(config.write_retries))
}
