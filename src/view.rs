//! Plain-text rendering of the two panes and the recipe form.

use crate::draft::Form;
use crate::model::Recipe;
use crate::render::RenderedList;

const EMPTY_ILLUSTRATION: &str = "  [ no recipes yet ]";

/// The recipe list, selected entry marked with `>`.
pub fn render_sidebar(recipes: &[Recipe], selected: Option<&Recipe>) -> String {
    let mut out = String::from("Recipe's List\n");

    if recipes.is_empty() {
        out.push_str(EMPTY_ILLUSTRATION);
        out.push('\n');
        out.push_str("  Type `add` to add a recipe\n");
        return out;
    }

    let selected_id = selected.map(|r| r.id);
    for recipe in recipes {
        let marker = if Some(recipe.id) == selected_id { '>' } else { ' ' };
        out.push_str(&format!("{} [{}] {}\n", marker, recipe.id, recipe.name));
    }
    out
}

/// The detail pane for `selected`, or the placeholder prompt.
pub fn render_detail(selected: Option<&Recipe>, has_recipes: bool) -> String {
    let Some(recipe) = selected else {
        let prompt = if has_recipes {
            "Select a recipe for details!"
        } else {
            "Add your first recipe!"
        };
        return format!("{}\n", prompt);
    };

    let mut out = format!("{}'s Recipe\n\n", recipe.name);
    out.push_str("Ingredients\n");
    push_list(&mut out, &recipe.ingredient_list(), "No ingredients added");
    out.push('\n');
    out.push_str("Directions\n");
    push_list(&mut out, &recipe.direction_list(), "No directions added");
    out
}

/// Both panes, sidebar first.
pub fn render_screen(recipes: &[Recipe], selected: Option<&Recipe>) -> String {
    let mut out = render_sidebar(recipes, selected);
    out.push_str("----\n");
    out.push_str(&render_detail(selected, !recipes.is_empty()));
    out
}

pub fn render_form(form: &Form) -> String {
    let draft = form.draft();
    let mut out = format!("{}\n", form.title());
    out.push_str(&format!("  name:        {}\n", draft.name));
    out.push_str(&format!("  ingredients: {}\n", draft.ingredients));
    out.push_str(&format!("  description: {}\n", draft.description));
    out.push_str("  (set a field with `name|ingredients|description <text>`, then `save` or `cancel`)\n");
    out
}

fn push_list(out: &mut String, list: &RenderedList<'_>, placeholder: &str) {
    match list {
        RenderedList::Items(items) => {
            for (i, item) in items.iter().enumerate() {
                out.push_str(&format!("  {}. {}\n", i + 1, item));
            }
        }
        RenderedList::Empty => {
            out.push_str(&format!("  {}\n", placeholder));
        }
    }
}
