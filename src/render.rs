//! The delimiter convention for ingredient and direction text.
//!
//! Stored text is never modified; these helpers only borrow it.

/// Characters that separate list items in ingredient and direction text.
pub const DELIMITERS: [char; 2] = ['*', '\n'];

/// A rendered ingredient or direction list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedList<'a> {
    /// At least one non-empty fragment, in source order
    Items(Vec<&'a str>),
    /// Nothing left after trimming; the view shows a "none added" message
    Empty,
}

impl<'a> RenderedList<'a> {
    pub fn items(&self) -> &[&'a str] {
        match self {
            RenderedList::Items(items) => items,
            RenderedList::Empty => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, RenderedList::Empty)
    }
}

/// Split `text` on every `*` or newline, trim each fragment and drop the empty ones.
pub fn split_items(text: &str) -> Vec<&str> {
    text.split(DELIMITERS.as_slice())
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .collect()
}

pub fn render_list(text: &str) -> RenderedList<'_> {
    let items = split_items(text);
    if items.is_empty() {
        RenderedList::Empty
    } else {
        RenderedList::Items(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_mixed_delimiters() {
        assert_eq!(split_items("a * b\nc"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_drops_blank_fragments() {
        assert_eq!(split_items("**\n  * eggs *\n\n"), vec!["eggs"]);
    }

    #[test]
    fn test_split_handles_crlf() {
        assert_eq!(split_items("salt\r\npepper"), vec!["salt", "pepper"]);
    }

    #[test]
    fn test_render_empty_text() {
        assert_eq!(render_list(""), RenderedList::Empty);
        assert_eq!(render_list("  *  \n "), RenderedList::Empty);
        assert!(render_list("").items().is_empty());
    }

    #[test]
    fn test_render_is_idempotent_and_read_only() {
        let stored = String::from("2 eggs*1 cup flour");
        let first = render_list(&stored);
        let second = render_list(&stored);
        assert_eq!(first, second);
        assert_eq!(first.items(), &["2 eggs", "1 cup flour"]);
        assert_eq!(stored, "2 eggs*1 cup flour");
    }
}
