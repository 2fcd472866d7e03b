use serde::{Deserialize, Serialize};
use std::fmt;

use crate::render::{render_list, RenderedList};

/// Identifier of a recipe, unique within a collection.
///
/// Values are millisecond timestamps taken at creation time, bumped past any
/// id already issued so that two recipes never share one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(pub i64);

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RecipeId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(RecipeId)
    }
}

/// A stored recipe, in the exact shape written to the persisted slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    /// Free-form ingredient text, items separated by `*` or newlines
    #[serde(default)]
    pub ingredients: String,
    /// Free-form direction text, same delimiter convention as `ingredients`
    #[serde(default)]
    pub description: String,
}

impl Recipe {
    pub fn ingredient_list(&self) -> RenderedList<'_> {
        render_list(&self.ingredients)
    }

    pub fn direction_list(&self) -> RenderedList<'_> {
        render_list(&self.description)
    }
}
