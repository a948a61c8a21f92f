use color_eyre::Result;
use std::io::Write;
use tracing::info;

use crate::prefs::{Preferences, EMAIL, FIRST_NAME, LAST_NAME};

use super::{Action, Route};

/// Read-only view of the stored profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileView {
  pub first_name: String,
  pub last_name: String,
  pub email: String,
}

impl ProfileView {
  /// Missing values fall back to placeholders
  pub fn load(prefs: &Preferences) -> Self {
    Self {
      first_name: prefs.get(FIRST_NAME).unwrap_or("John").to_string(),
      last_name: prefs.get(LAST_NAME).unwrap_or("Doe").to_string(),
      email: prefs.get(EMAIL).unwrap_or("email@gmail.com").to_string(),
    }
  }

  pub fn render(&self, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "Personal information")?;
    writeln!(out)?;
    writeln!(out, "  First name: {}", self.first_name)?;
    writeln!(out, "  Last name:  {}", self.last_name)?;
    writeln!(out, "  Email:      {}", self.email)?;
    Ok(())
  }
}

/// Forget the profile and go back to onboarding
pub fn log_out(prefs: &mut Preferences) -> Result<Route> {
  prefs.remove_many(&[FIRST_NAME, LAST_NAME, EMAIL])?;
  info!("Logged out");
  Ok(Route::Profile.after(Action::LogOut))
}
