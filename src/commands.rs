//! Command-line surface: one subcommand per screen or screen action.

use clap::{Args, Subcommand};

use crate::menu::{Category, MenuFilter};

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
  /// Browse the cached menu (home screen)
  Menu(MenuArgs),
  /// Store your profile and finish onboarding
  Register(RegisterArgs),
  /// Show the stored profile
  Profile,
  /// Forget the stored profile
  Logout,
}

#[derive(Args, Debug, Clone, Default)]
pub struct MenuArgs {
  /// Only show dishes whose title contains this phrase
  #[arg(short, long, default_value = "")]
  pub search: String,

  /// Tap a category chip (starters, mains, desserts); repeat to tap again
  #[arg(short, long = "category", value_name = "CATEGORY")]
  pub categories: Vec<Category>,

  /// Keep the menu on screen and redraw it whenever the cache changes
  #[arg(short, long)]
  pub watch: bool,
}

impl MenuArgs {
  /// Filter state after replaying the chip taps in order
  pub fn filter(&self) -> MenuFilter {
    let mut filter = MenuFilter::new(self.search.clone());
    for category in &self.categories {
      filter.categories.toggle(*category);
    }
    filter
  }
}

#[derive(Args, Debug, Clone, Default)]
pub struct RegisterArgs {
  #[arg(long, default_value = "")]
  pub first_name: String,

  #[arg(long, default_value = "")]
  pub last_name: String,

  #[arg(long, default_value = "")]
  pub email: String,
}
