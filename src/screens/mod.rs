//! Screens and the navigation between them.
//!
//! Onboarding → Home → Profile, with logout returning to Onboarding. Which
//! screen opens first depends only on whether a profile is stored; `menu`
//! goes back to Home from Profile.

pub mod home;
pub mod onboarding;
pub mod profile;

use crate::prefs::{Preferences, FIRST_NAME};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
  Onboarding,
  Home,
  Profile,
}

/// Things the user can do that move between screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
  Registered,
  OpenProfile,
  LogOut,
}

impl Route {
  /// Start destination for a fresh process
  pub fn start(prefs: &Preferences) -> Self {
    if prefs.contains(FIRST_NAME) {
      Route::Home
    } else {
      Route::Onboarding
    }
  }

  /// Destination after `action`; actions that make no sense here stay put
  pub fn after(self, action: Action) -> Self {
    match (self, action) {
      (Route::Onboarding, Action::Registered) => Route::Home,
      (Route::Home, Action::OpenProfile) => Route::Profile,
      (Route::Profile, Action::LogOut) => Route::Onboarding,
      (route, _) => route,
    }
  }
}

/// Truncate to at most `max_chars` characters, adding "..." if truncated
pub fn truncate(s: &str, max_chars: usize) -> String {
  if s.chars().count() <= max_chars {
    s.to_string()
  } else {
    let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept)
  }
}
