use log::debug;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use super::{SlotStorage, StorageResult};

/// File-backed storage: slot `name` lives at `<dir>/<name>.json`.
///
/// Writes go to a temp file in the same directory which is then renamed over
/// the target, so a crash mid-write leaves the previous contents intact.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Creates a backend rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{}.json", slot))
    }
}

impl SlotStorage for FileStorage {
    fn read(&self, slot: &str) -> StorageResult<Option<String>> {
        let path = self.slot_path(slot);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No stored data at {}", path.display());
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, slot: &str, contents: &str) -> StorageResult<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.slot_path(slot);

        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(contents.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| e.error)?;

        debug!("Wrote {} bytes to {}", contents.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_missing_slot() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path());
        assert!(storage.read("recipes").unwrap().is_none());
    }

    #[test]
    fn test_write_creates_directory_and_overwrites() {
        let dir = TempDir::new().unwrap();
        let mut storage = FileStorage::new(dir.path().join("nested"));

        storage.write("recipes", "[1]").unwrap();
        storage.write("recipes", "[2]").unwrap();

        assert_eq!(storage.read("recipes").unwrap().as_deref(), Some("[2]"));
        assert!(storage.slot_path("recipes").ends_with("nested/recipes.json"));
    }
}
