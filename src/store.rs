//! The recipe collection, its selection, and write-through persistence.
//!
//! `RecipeStore` is the only writer of the persisted slot. Every successful
//! mutation ends by serializing the whole collection back to storage.

use log::{debug, error, info, warn};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::draft::Draft;
use crate::error::{RecipeError, Rejection};
use crate::model::{Recipe, RecipeId};
use crate::storage::SlotStorage;

/// Source of wall-clock milliseconds for new ids.
pub trait Clock {
    fn now_millis(&self) -> i64;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0)
    }
}

/// A non-blocking message for the user about a recovered failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Stored data could not be parsed; the session started empty
    LoadFailed(String),
    /// Saving failed after all retries; changes live only in memory
    SaveFailed(String),
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::LoadFailed(reason) => write!(
                f,
                "Stored recipes could not be read ({}); starting with an empty list",
                reason
            ),
            Notice::SaveFailed(reason) => write!(
                f,
                "Could not save recipes ({}); changes are kept for this session only",
                reason
            ),
        }
    }
}

/// Read and parse the collection stored in `slot`.
///
/// An absent slot is an empty collection. Malformed contents propagate as
/// [`RecipeError::Parse`].
pub fn load_collection<S: SlotStorage + ?Sized>(
    storage: &S,
    slot: &str,
) -> Result<Vec<Recipe>, RecipeError> {
    match storage.read(slot)? {
        None => Ok(Vec::new()),
        Some(contents) => Ok(serde_json::from_str(&contents)?),
    }
}

pub struct RecipeStore<S> {
    storage: S,
    slot: String,
    write_retries: u32,
    recipes: Vec<Recipe>,
    selected: Option<RecipeId>,
    last_id: i64,
    clock: Box<dyn Clock>,
    notices: Vec<Notice>,
}

impl<S: SlotStorage> RecipeStore<S> {
    /// Load the collection from `storage` and select its first recipe.
    ///
    /// Unparseable data is replaced by an empty collection and reported via
    /// [`Notice::LoadFailed`]. Only a failing storage read is an error.
    pub fn open(storage: S, slot: impl Into<String>) -> Result<Self, RecipeError> {
        let slot = slot.into();
        let mut notices = Vec::new();

        let recipes = match load_collection(&storage, &slot) {
            Ok(recipes) => {
                info!("Loaded {} recipes from slot '{}'", recipes.len(), slot);
                recipes
            }
            Err(RecipeError::Parse(e)) => {
                warn!("Stored recipes in slot '{}' are malformed: {}", slot, e);
                notices.push(Notice::LoadFailed(e.to_string()));
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        let recipes = dedup_ids(recipes);
        let last_id = recipes.iter().map(|r| r.id.0).max().unwrap_or(i64::MIN);

        let mut store = RecipeStore {
            storage,
            slot,
            write_retries: 1,
            recipes,
            selected: None,
            last_id,
            clock: Box::new(SystemClock),
            notices,
        };
        store.normalize_selection();
        Ok(store)
    }

    pub fn with_write_retries(mut self, retries: u32) -> Self {
        self.write_retries = retries;
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// The collection in insertion order
    pub fn list(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn get(&self, id: RecipeId) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    pub fn selected_id(&self) -> Option<RecipeId> {
        self.selected
    }

    pub fn selected(&self) -> Option<&Recipe> {
        self.selected.and_then(|id| self.get(id))
    }

    /// Select `id`. Returns `false` and leaves the selection alone if no
    /// recipe has that id.
    pub fn select(&mut self, id: RecipeId) -> bool {
        if self.get(id).is_some() {
            self.selected = Some(id);
            true
        } else {
            debug!("Ignoring selection of unknown recipe {}", id);
            false
        }
    }

    /// Append a new recipe built from `draft` and select it.
    pub fn create(&mut self, draft: &Draft) -> Result<RecipeId, Rejection> {
        validate_name(&draft.name)?;

        let id = self.next_id();
        self.recipes.push(Recipe {
            id,
            name: draft.name.clone(),
            ingredients: draft.ingredients.clone(),
            description: draft.description.clone(),
        });
        debug!("Created recipe {} '{}'", id, draft.name);

        self.persist();
        self.selected = Some(id);
        Ok(id)
    }

    /// Replace the recipe with `recipe.id` in place and select it.
    ///
    /// Returns `Ok(false)` without persisting if no recipe has that id.
    pub fn update(&mut self, recipe: Recipe) -> Result<bool, Rejection> {
        validate_name(&recipe.name)?;

        let Some(slot) = self.recipes.iter_mut().find(|r| r.id == recipe.id) else {
            debug!("Ignoring update of unknown recipe {}", recipe.id);
            return Ok(false);
        };
        let id = recipe.id;
        *slot = recipe;
        debug!("Updated recipe {}", id);

        self.persist();
        self.selected = Some(id);
        Ok(true)
    }

    /// Remove the recipe with `id`, moving the selection to the first
    /// remaining recipe if it pointed at the removed one.
    pub fn delete(&mut self, id: RecipeId) -> bool {
        let before = self.recipes.len();
        self.recipes.retain(|r| r.id != id);
        let removed = self.recipes.len() != before;

        if !removed {
            debug!("Ignoring delete of unknown recipe {}", id);
            return false;
        }
        debug!("Deleted recipe {}", id);
        self.persist();

        if self.selected == Some(id) {
            self.selected = self.recipes.first().map(|r| r.id);
        }
        true
    }

    /// Drain notices queued since the last call
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    fn next_id(&mut self) -> RecipeId {
        let now = self.clock.now_millis();
        if self.last_id < i64::MAX {
            let id = now.max(self.last_id + 1);
            self.last_id = id;
            return RecipeId(id);
        }

        // The high-water mark is exhausted; take the first free id from now on.
        let mut candidate = now;
        while self.get(RecipeId(candidate)).is_some() {
            candidate = candidate.wrapping_add(1);
        }
        warn!("Recipe ids exhausted at {}; reusing free id {}", i64::MAX, candidate);
        RecipeId(candidate)
    }

    fn normalize_selection(&mut self) {
        if self.selected.is_none() {
            self.selected = self.recipes.first().map(|r| r.id);
        }
    }

    /// Write the whole collection to the slot, retrying on failure.
    fn persist(&mut self) {
        let contents = match serde_json::to_string_pretty(&self.recipes) {
            Ok(contents) => contents,
            Err(e) => {
                error!("Failed to serialize recipes: {}", e);
                self.notices.push(Notice::SaveFailed(e.to_string()));
                return;
            }
        };

        let attempts = self.write_retries.saturating_add(1);
        let mut last_error = None;
        for attempt in 1..=attempts {
            match self.storage.write(&self.slot, &contents) {
                Ok(()) => {
                    debug!(
                        "Persisted {} recipes to slot '{}'",
                        self.recipes.len(),
                        self.slot
                    );
                    return;
                }
                Err(e) => {
                    warn!(
                        "Saving recipes failed (attempt {}/{}): {}",
                        attempt, attempts, e
                    );
                    last_error = Some(e.to_string());
                }
            }
        }

        let reason = last_error.unwrap_or_default();
        error!("Giving up on saving recipes: {}", reason);
        self.notices.push(Notice::SaveFailed(reason));
    }
}

fn validate_name(name: &str) -> Result<(), Rejection> {
    if name.trim().is_empty() {
        Err(Rejection::EmptyName)
    } else {
        Ok(())
    }
}

/// Keep the first recipe for each id; later duplicates are dropped.
fn dedup_ids(recipes: Vec<Recipe>) -> Vec<Recipe> {
    let mut seen = std::collections::HashSet::new();
    let total = recipes.len();
    let unique: Vec<Recipe> = recipes.into_iter().filter(|r| seen.insert(r.id)).collect();
    if unique.len() != total {
        warn!(
            "Dropped {} stored recipes with duplicate ids",
            total - unique.len()
        );
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    struct FixedClock(i64);

    impl Clock for FixedClock {
        fn now_millis(&self) -> i64 {
            self.0
        }
    }

    fn draft(name: &str) -> Draft {
        Draft {
            name: name.to_string(),
            ..Draft::default()
        }
    }

    #[test]
    fn test_ids_unique_within_same_tick() {
        let mut store = RecipeStore::open(MemoryStorage::new(), "s")
            .unwrap()
            .with_clock(FixedClock(1000));

        let a = store.create(&draft("A")).unwrap();
        let b = store.create(&draft("B")).unwrap();
        let c = store.create(&draft("C")).unwrap();

        assert_eq!(a, RecipeId(1000));
        assert_eq!(b, RecipeId(1001));
        assert_eq!(c, RecipeId(1002));
    }

    #[test]
    fn test_ids_stay_above_loaded_ids_when_clock_is_behind() {
        let stored = r#"[{"id": 5000, "name": "Old", "ingredients": "", "description": ""}]"#;
        let mut store = RecipeStore::open(MemoryStorage::with_slot("s", stored), "s")
            .unwrap()
            .with_clock(FixedClock(10));

        assert_eq!(store.create(&draft("New")).unwrap(), RecipeId(5001));
    }

    #[test]
    fn test_duplicate_ids_in_storage_are_dropped() {
        let stored = r#"[
            {"id": 1, "name": "First", "ingredients": "", "description": ""},
            {"id": 1, "name": "Copy", "ingredients": "", "description": ""}
        ]"#;
        let store = RecipeStore::open(MemoryStorage::with_slot("s", stored), "s").unwrap();
        assert_eq!(store.list().len(), 1);
        assert_eq!(store.list()[0].name, "First");
    }

    #[test]
    fn test_ids_unique_when_stored_id_is_max() {
        let stored = format!(
            r#"[{{"id": {}, "name": "Last", "ingredients": "", "description": ""}}]"#,
            i64::MAX
        );
        let mut store = RecipeStore::open(MemoryStorage::with_slot("s", &stored), "s")
            .unwrap()
            .with_clock(FixedClock(1000));

        let a = store.create(&draft("A")).unwrap();
        let b = store.create(&draft("B")).unwrap();

        assert_eq!(a, RecipeId(1000));
        assert_eq!(b, RecipeId(1001));
        let ids: std::collections::HashSet<RecipeId> =
            store.list().iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_max_write_retries_does_not_overflow() {
        let mut store = RecipeStore::open(MemoryStorage::new(), "s")
            .unwrap()
            .with_write_retries(u32::MAX);

        store.create(&draft("X")).unwrap();

        assert!(store.take_notices().is_empty());
        assert_eq!(store.storage().write_count(), 1);
        assert!(store.storage().slot("s").unwrap().contains("X"));
    }

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name(""), Err(Rejection::EmptyName));
        assert_eq!(validate_name(" \t\n"), Err(Rejection::EmptyName));
        assert!(validate_name(" Soup ").is_ok());
    }
}
