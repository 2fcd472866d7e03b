use std::collections::HashMap;

use super::{SlotStorage, StorageError, StorageResult};

/// An in-memory storage backend.
///
/// Failures can be injected with [`MemoryStorage::fail_next_writes`] to
/// exercise the save-retry path.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
    failing_writes: u32,
    failing_reads: bool,
    writes: u32,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend with `slot` already holding `contents`.
    #[must_use]
    pub fn with_slot(slot: &str, contents: &str) -> Self {
        let mut storage = Self::new();
        storage.slots.insert(slot.to_string(), contents.to_string());
        storage
    }

    /// Makes the next `count` writes fail without storing anything.
    pub fn fail_next_writes(&mut self, count: u32) {
        self.failing_writes = count;
    }

    /// Makes every read fail, as an unreadable backend would.
    pub fn fail_reads(&mut self) {
        self.failing_reads = true;
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> u32 {
        self.writes
    }

    pub fn slot(&self, slot: &str) -> Option<&str> {
        self.slots.get(slot).map(String::as_str)
    }
}

impl SlotStorage for MemoryStorage {
    fn read(&self, slot: &str) -> StorageResult<Option<String>> {
        if self.failing_reads {
            return Err(StorageError::Unavailable(format!(
                "injected read failure for slot '{}'",
                slot
            )));
        }
        Ok(self.slots.get(slot).cloned())
    }

    fn write(&mut self, slot: &str, contents: &str) -> StorageResult<()> {
        if self.failing_writes > 0 {
            self.failing_writes -= 1;
            return Err(StorageError::Unavailable(format!(
                "injected write failure for slot '{}'",
                slot
            )));
        }
        self.slots.insert(slot.to_string(), contents.to_string());
        self.writes += 1;
        Ok(())
    }
}
