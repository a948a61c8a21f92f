//! Client-side filtering of the cached menu for the home screen.

use super::types::{Category, MenuEntry};

/// Mutually exclusive category chip state.
///
/// At most one category is selected. Selecting another category replaces it,
/// selecting the current one again clears it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategorySelection {
  selected: Option<Category>,
}

impl CategorySelection {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn selected(&self) -> Option<Category> {
    self.selected
  }

  pub fn is_selected(&self, category: Category) -> bool {
    self.selected == Some(category)
  }

  /// Flip a chip
  pub fn toggle(&mut self, category: Category) {
    self.selected = if self.is_selected(category) {
      None
    } else {
      Some(category)
    };
  }
}

/// Search box plus category chips.
#[derive(Debug, Clone, Default)]
pub struct MenuFilter {
  pub search: String,
  pub categories: CategorySelection,
}

impl MenuFilter {
  pub fn new(search: impl Into<String>) -> Self {
    Self {
      search: search.into(),
      categories: CategorySelection::new(),
    }
  }

  /// Entries to display, in input order.
  ///
  /// A selected category wins over the search phrase; the phrase is kept but
  /// ignored until the category is cleared.
  pub fn apply<'a>(&self, items: &'a [MenuEntry]) -> Vec<&'a MenuEntry> {
    if let Some(category) = self.categories.selected() {
      return filter_by_category(items, category);
    }
    if !self.search.is_empty() {
      return filter_by_title(items, &self.search);
    }
    items.iter().collect()
  }
}

/// Entries whose category equals `category` exactly
pub fn filter_by_category(items: &[MenuEntry], category: Category) -> Vec<&MenuEntry> {
  items
    .iter()
    .filter(|item| item.category == category.as_str())
    .collect()
}

/// Entries whose title contains `phrase`, ignoring case
pub fn filter_by_title<'a>(items: &'a [MenuEntry], phrase: &str) -> Vec<&'a MenuEntry> {
  let phrase: Vec<char> = phrase.chars().collect();
  items
    .iter()
    .filter(|item| contains_ignore_case(&item.title, &phrase))
    .collect()
}

/// Char-by-char match, so `phrase` keeps its length whatever the case
/// mappings of its chars expand to
fn contains_ignore_case(haystack: &str, phrase: &[char]) -> bool {
  if phrase.is_empty() {
    return true;
  }
  let haystack: Vec<char> = haystack.chars().collect();
  haystack.windows(phrase.len()).any(|window| {
    window
      .iter()
      .zip(phrase)
      .all(|(a, b)| chars_eq_ignore_case(*a, *b))
  })
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
  a == b || simple_upper(a) == simple_upper(b) || simple_lower(a) == simple_lower(b)
}

/// Single-char uppercase; chars that expand (e.g. 'ß') map to themselves
fn simple_upper(c: char) -> char {
  let mut upper = c.to_uppercase();
  match (upper.next(), upper.next()) {
    (Some(u), None) => u,
    _ => c,
  }
}

/// Leading char of the lowercase mapping ('İ' lowers to 'i' plus a combining dot)
fn simple_lower(c: char) -> char {
  c.to_lowercase().next().unwrap_or(c)
}
