use color_eyre::Result;
use std::io::Write;
use tracing::info;

use crate::prefs::{Preferences, EMAIL, FIRST_NAME, LAST_NAME};

use super::Route;

pub const REGISTRATION_OK: &str = "Registration successful!";
pub const REGISTRATION_INCOMPLETE: &str = "Registration unsuccessful. Please enter all data.";

/// Outcome of pressing "Register"
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
  Accepted,
  Rejected,
}

impl Registration {
  /// Notification shown to the user
  pub fn message(&self) -> &'static str {
    match self {
      Registration::Accepted => REGISTRATION_OK,
      Registration::Rejected => REGISTRATION_INCOMPLETE,
    }
  }

  /// Screen to show next
  pub fn route(&self) -> Route {
    match self {
      Registration::Accepted => Route::Onboarding.after(super::Action::Registered),
      Registration::Rejected => Route::Onboarding,
    }
  }
}

/// Store the profile if every field is filled in. Blank or whitespace-only
/// fields reject the whole form and nothing is written.
pub fn register(
  prefs: &mut Preferences,
  first_name: &str,
  last_name: &str,
  email: &str,
) -> Result<Registration> {
  if first_name.trim().is_empty() || last_name.trim().is_empty() || email.trim().is_empty() {
    return Ok(Registration::Rejected);
  }

  prefs.set_many(&[
    (FIRST_NAME, first_name),
    (LAST_NAME, last_name),
    (EMAIL, email),
  ])?;

  info!("Registered profile");
  Ok(Registration::Accepted)
}

/// Onboarding prompt shown when no profile is stored
pub fn render(out: &mut impl Write) -> std::io::Result<()> {
  writeln!(out, "Little Lemon")?;
  writeln!(out)?;
  writeln!(out, "Let's get to know you")?;
  writeln!(out)?;
  writeln!(out, "Personal information is needed before you can browse the menu.")?;
  writeln!(
    out,
    "Run: littlelemon register --first-name <FIRST> --last-name <LAST> --email <EMAIL>"
  )?;
  Ok(())
}
