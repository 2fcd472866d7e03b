use crate::error::Rejection;
use crate::model::{Recipe, RecipeId};
use crate::storage::SlotStorage;
use crate::store::RecipeStore;

/// Uncommitted recipe fields bound to the create/edit form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub name: String,
    pub ingredients: String,
    pub description: String,
}

impl Draft {
    pub fn new(
        name: impl Into<String>,
        ingredients: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            ingredients: ingredients.into(),
            description: description.into(),
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.name = value,
            Field::Ingredients => self.ingredients = value,
            Field::Description => self.description = value,
        }
    }

    fn into_recipe(self, id: RecipeId) -> Recipe {
        Recipe {
            id,
            name: self.name,
            ingredients: self.ingredients,
            description: self.description,
        }
    }
}

impl From<&Recipe> for Draft {
    fn from(recipe: &Recipe) -> Self {
        Self {
            name: recipe.name.clone(),
            ingredients: recipe.ingredients.clone(),
            description: recipe.description.clone(),
        }
    }
}

/// A form field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Ingredients,
    Description,
}

impl Field {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "name" => Some(Field::Name),
            "ingredients" => Some(Field::Ingredients),
            "description" | "directions" => Some(Field::Description),
            _ => None,
        }
    }
}

/// Whether submitting the form creates a recipe or edits an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(RecipeId),
}

/// An open create/edit form. Dropping it discards the draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    mode: FormMode,
    draft: Draft,
}

impl Form {
    /// An empty form for a new recipe
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            draft: Draft::default(),
        }
    }

    /// A form pre-filled with `recipe`'s fields
    pub fn edit(recipe: &Recipe) -> Self {
        Self {
            mode: FormMode::Edit(recipe.id),
            draft: Draft::from(recipe),
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.draft.set(field, value);
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Add Recipe",
            FormMode::Edit(_) => "Edit Recipe",
        }
    }

    /// Commit the draft through `store`.
    ///
    /// On rejection the form is handed back unchanged so it can stay open.
    /// Returns the id of the recipe that is selected afterwards; an edit of
    /// a recipe deleted in the meantime yields `None`.
    pub fn submit<S: SlotStorage>(
        self,
        store: &mut RecipeStore<S>,
    ) -> Result<Option<RecipeId>, (Self, Rejection)> {
        let result = match self.mode {
            FormMode::Create => store.create(&self.draft).map(Some),
            FormMode::Edit(id) => store
                .update(self.draft.clone().into_recipe(id))
                .map(|found| found.then_some(id)),
        };
        result.map_err(|rejection| (self, rejection))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_form_is_prefilled() {
        let recipe = Recipe {
            id: RecipeId(3),
            name: "Soup".to_string(),
            ingredients: "water".to_string(),
            description: "Boil.".to_string(),
        };
        let form = Form::edit(&recipe);
        assert_eq!(form.mode(), FormMode::Edit(RecipeId(3)));
        assert_eq!(form.draft().name, "Soup");
        assert_eq!(form.title(), "Edit Recipe");
    }

    #[test]
    fn test_create_form_is_empty() {
        let form = Form::create();
        assert_eq!(form.draft(), &Draft::default());
        assert_eq!(form.title(), "Add Recipe");
    }

    #[test]
    fn test_field_parse() {
        assert_eq!(Field::parse("Name"), Some(Field::Name));
        assert_eq!(Field::parse("directions"), Some(Field::Description));
        assert_eq!(Field::parse("id"), None);
    }
}
