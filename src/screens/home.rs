use chrono::{DateTime, Utc};
use std::io::Write;

use crate::menu::{Category, MenuEntry, MenuFilter};

use super::truncate;

/// Roughly two lines of description
const DESCRIPTION_MAX_CHARS: usize = 120;

const RULE: &str = "----------------------------------------------------------------";

/// Upstream images that no longer resolve, replaced by bundled assets
const IMAGE_FALLBACKS: &[(&str, &str)] = &[
  ("Lemon Desert", "assets/lemon_dessert.jpg"),
  ("Grilled Fish", "assets/grilled_fish.jpg"),
];

/// Image to show for an entry
pub fn image_reference(entry: &MenuEntry) -> &str {
  for (title, asset) in IMAGE_FALLBACKS {
    if *title == entry.title {
      return asset;
    }
  }
  &entry.image
}

/// Human readable age of the cache, e.g. "5m ago"
pub fn age_display(synced_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
  let minutes = (now - synced_at).num_minutes();
  if minutes < 1 {
    "just now".to_string()
  } else if minutes < 60 {
    format!("{}m ago", minutes)
  } else if minutes < 1440 {
    format!("{}h ago", minutes / 60)
  } else {
    format!("{}d ago", minutes / 1440)
  }
}

/// Render the home screen: hero, category chips, and the filtered menu
pub fn render(
  out: &mut impl Write,
  entries: &[MenuEntry],
  filter: &MenuFilter,
  last_synced: Option<DateTime<Utc>>,
) -> std::io::Result<()> {
  writeln!(out, "Little Lemon")?;
  writeln!(out, "Chicago")?;
  writeln!(out)?;

  if !filter.search.is_empty() {
    writeln!(out, "Search: {}", filter.search)?;
  }

  write!(out, "ORDER FOR DELIVERY!")?;
  for category in Category::all() {
    let mark = if filter.categories.is_selected(*category) {
      "x"
    } else {
      " "
    };
    write!(out, "  [{}] {}", mark, category.label())?;
  }
  writeln!(out)?;
  writeln!(out, "{}", RULE)?;

  let shown = filter.apply(entries);
  if entries.is_empty() {
    writeln!(out, "No menu cached yet.")?;
  } else if shown.is_empty() {
    writeln!(out, "Nothing on the menu matches.")?;
  }

  for entry in &shown {
    writeln!(out, "{}  ${}", entry.title, entry.price)?;
    writeln!(out, "  {}", truncate(&entry.description, DESCRIPTION_MAX_CHARS))?;
    writeln!(out, "  image: {}", truncate(image_reference(entry), DESCRIPTION_MAX_CHARS))?;
    writeln!(out, "{}", RULE)?;
  }

  let footer = format!("{} of {} items", shown.len(), entries.len());
  match last_synced {
    Some(at) => writeln!(out, "{}, menu updated {}", footer, age_display(at, Utc::now()))?,
    None => writeln!(out, "{}, menu never synced", footer)?,
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::Duration;

  fn entry(id: i64, title: &str, category: &str) -> MenuEntry {
    MenuEntry {
      id,
      title: title.to_string(),
      description: "x".repeat(200),
      price: "12.99".to_string(),
      image: format!("https://example.com/{}.jpg", id),
      category: category.to_string(),
    }
  }

  fn render_to_string(entries: &[MenuEntry], filter: &MenuFilter) -> String {
    let mut out = Vec::new();
    render(&mut out, entries, filter, None).unwrap();
    String::from_utf8(out).unwrap()
  }

  #[test]
  fn test_image_fallbacks() {
    assert_eq!(
      image_reference(&entry(1, "Lemon Desert", "desserts")),
      "assets/lemon_dessert.jpg"
    );
    assert_eq!(
      image_reference(&entry(2, "Grilled Fish", "mains")),
      "assets/grilled_fish.jpg"
    );
    assert_eq!(
      image_reference(&entry(3, "Pasta", "mains")),
      "https://example.com/3.jpg"
    );
  }

  #[test]
  fn test_age_display() {
    let now = Utc::now();
    assert_eq!(age_display(now, now), "just now");
    assert_eq!(age_display(now - Duration::minutes(5), now), "5m ago");
    assert_eq!(age_display(now - Duration::minutes(150), now), "2h ago");
    assert_eq!(age_display(now - Duration::days(3), now), "3d ago");
    // Clock skew
    assert_eq!(age_display(now + Duration::minutes(5), now), "just now");
  }

  #[test]
  fn test_render_lists_filtered_entries() {
    let entries = vec![entry(1, "Greek Salad", "starters"), entry(2, "Pasta", "mains")];
    let mut filter = MenuFilter::default();
    filter.categories.toggle(Category::Mains);

    let text = render_to_string(&entries, &filter);
    assert!(text.contains("[x] Mains"));
    assert!(text.contains("[ ] Starters"));
    assert!(text.contains("Pasta  $12.99"));
    assert!(!text.contains("Greek Salad"));
    assert!(text.contains("1 of 2 items, menu never synced"));
  }

  #[test]
  fn test_render_truncates_description() {
    let entries = vec![entry(1, "Pasta", "mains")];
    let text = render_to_string(&entries, &MenuFilter::default());
    let expected = format!("  {}...", "x".repeat(DESCRIPTION_MAX_CHARS - 3));
    assert!(text.lines().any(|line| line == expected));
  }

  #[test]
  fn test_render_empty_cache() {
    let text = render_to_string(&[], &MenuFilter::new("fish"));
    assert!(text.contains("Search: fish"));
    assert!(text.contains("No menu cached yet."));
  }

  #[test]
  fn test_render_no_match() {
    let entries = vec![entry(1, "Pasta", "mains")];
    let text = render_to_string(&entries, &MenuFilter::new("pizza"));
    assert!(text.contains("Nothing on the menu matches."));
  }
}
