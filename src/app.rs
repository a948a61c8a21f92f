use color_eyre::Result;
use std::io::Write;
use std::sync::Arc;
use tracing::{info, warn};

use crate::commands::{Command, MenuArgs, RegisterArgs};
use crate::config::Config;
use crate::db::{MenuFeed, MenuStore};
use crate::menu::{spawn_startup_sync, MenuClient, MenuFilter, SyncHandle};
use crate::prefs::Preferences;
use crate::screens::onboarding;
use crate::screens::profile::{self, ProfileView};
use crate::screens::{home, Action, Route};

/// One app session: the store, the preferences and the startup sync
pub struct App {
  store: Arc<MenuStore>,
  prefs: Preferences,
  sync: Option<SyncHandle>,
}

/// Client for the startup sync, or None when syncing is switched off
fn startup_client(config: &Config, offline: bool) -> Option<MenuClient> {
  if offline || !config.sync.on_startup {
    info!("Startup sync disabled");
    return None;
  }

  match MenuClient::new(&config.menu) {
    Ok(client) => Some(client),
    Err(e) => {
      warn!(error = %e, "Cannot sync menu");
      None
    }
  }
}

impl App {
  /// Open local state and kick off the startup sync unless `offline`
  pub fn new(config: &Config, offline: bool) -> Result<Self> {
    Self::open(config, startup_client(config, offline))
  }

  fn open(config: &Config, client: Option<MenuClient>) -> Result<Self> {
    let store = Arc::new(MenuStore::open(&config.database_path()?)?);
    let prefs = Preferences::open(&config.preferences_path()?)?;

    let sync = client.map(|client| spawn_startup_sync(client, Arc::clone(&store)));

    Ok(Self { store, prefs, sync })
  }

  /// Run one command and show the screen it leads to.
  ///
  /// Every command starts from `Route::start`, so without a stored profile
  /// the only reachable screen is onboarding.
  pub async fn run(&mut self, command: Option<Command>, out: &mut impl Write) -> Result<()> {
    let start = Route::start(&self.prefs);
    let mut menu_args = MenuArgs::default();

    let route = match command {
      None => start,
      Some(Command::Menu(args)) => {
        menu_args = args;
        match start {
          Route::Onboarding => Route::Onboarding,
          _ => Route::Home,
        }
      }
      Some(Command::Profile) => start.after(Action::OpenProfile),
      Some(Command::Register(args)) => self.register(&args, out)?,
      Some(Command::Logout) => match start {
        Route::Onboarding => Route::Onboarding,
        _ => profile::log_out(&mut self.prefs)?,
      },
    };

    match route {
      Route::Home => return self.show_home(&menu_args, out).await,
      Route::Onboarding => onboarding::render(out)?,
      Route::Profile => ProfileView::load(&self.prefs).render(out)?,
    }

    self.finish_sync().await;
    Ok(())
  }

  fn register(&mut self, args: &RegisterArgs, out: &mut impl Write) -> Result<Route> {
    let result = onboarding::register(
      &mut self.prefs,
      &args.first_name,
      &args.last_name,
      &args.email,
    )?;

    writeln!(out, "{}", result.message())?;
    Ok(result.route())
  }

  /// Render the home screen from the live feed.
  ///
  /// Without `watch`, the menu is drawn once and again only if the startup
  /// sync adds rows. With `watch`, it is redrawn on every change until Ctrl-C.
  async fn show_home(&mut self, args: &MenuArgs, out: &mut impl Write) -> Result<()> {
    let filter = args.filter();
    let mut feed = self.store.subscribe();

    self.render_home(&mut feed, &filter, out)?;

    if args.watch {
      loop {
        tokio::select! {
          changed = feed.changed() => {
            if !changed {
              break;
            }
            self.render_home(&mut feed, &filter, out)?;
          }
          _ = tokio::signal::ctrl_c() => break,
        }
      }
      if let Some(sync) = self.sync.take() {
        sync.abort();
      }
      return Ok(());
    }

    self.finish_sync().await;
    if feed.has_changed() {
      self.render_home(&mut feed, &filter, out)?;
    }

    Ok(())
  }

  fn render_home(
    &self,
    feed: &mut MenuFeed,
    filter: &MenuFilter,
    out: &mut impl Write,
  ) -> Result<()> {
    let entries = feed.current();
    let last_synced = self.store.last_synced_at()?;

    home::render(out, &entries, filter, last_synced)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
  }

  /// Let the startup sync run to completion before the session ends
  async fn finish_sync(&mut self) {
    if let Some(sync) = self.sync.take() {
      sync.wait().await;
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::menu::client::tests::{client_for, serve_once, MENU_JSON};
  use crate::menu::{Category, MenuEntry};
  use crate::prefs::{EMAIL, FIRST_NAME, LAST_NAME};

  const HOME_MARKER: &str = "ORDER FOR DELIVERY!";
  const ONBOARDING_MARKER: &str = "Let's get to know you";

  fn test_config(dir: &tempfile::TempDir) -> Config {
    Config {
      data_dir: Some(dir.path().to_path_buf()),
      ..Config::default()
    }
  }

  fn onboard(config: &Config) {
    let mut prefs = Preferences::open(&config.preferences_path().unwrap()).unwrap();
    prefs
      .set_many(&[(FIRST_NAME, "Tilly"), (LAST_NAME, "Lemon"), (EMAIL, "tilly@example.com")])
      .unwrap();
  }

  async fn run(app: &mut App, command: Option<Command>) -> String {
    let mut out = Vec::new();
    app.run(command, &mut out).await.unwrap();
    String::from_utf8(out).unwrap()
  }

  fn menu() -> Option<Command> {
    Some(Command::Menu(MenuArgs::default()))
  }

  #[test]
  fn test_startup_client_respects_offline_and_config() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config(&dir);
    assert!(startup_client(&config, true).is_none());

    config.sync.on_startup = false;
    assert!(startup_client(&config, false).is_none());
  }

  #[tokio::test]
  async fn test_offline_session_does_not_sync() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&dir);
    onboard(&config);

    let mut app = App::new(&config, true).unwrap();
    assert!(app.sync.is_none());

    let text = run(&mut app, menu()).await;
    assert_eq!(text.matches(HOME_MARKER).count(), 1);
    assert!(text.contains("No menu cached yet."));
  }

  #[tokio::test]
  async fn test_menu_requires_onboarding() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = App::new(&test_config(&dir), true).unwrap();

    let text = run(&mut app, menu()).await;
    assert!(text.contains(ONBOARDING_MARKER));
    assert!(!text.contains(HOME_MARKER));
  }

  #[tokio::test]
  async fn test_profile_requires_onboarding() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = App::new(&test_config(&dir), true).unwrap();

    let text = run(&mut app, Some(Command::Profile)).await;
    assert!(text.contains(ONBOARDING_MARKER));
    assert!(!text.contains("John"));
  }

  #[tokio::test]
  async fn test_start_route_follows_stored_profile() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&dir);

    let mut app = App::new(&config, true).unwrap();
    assert!(run(&mut app, None).await.contains(ONBOARDING_MARKER));

    onboard(&config);
    let mut app = App::new(&config, true).unwrap();
    assert!(run(&mut app, None).await.contains(HOME_MARKER));
  }

  #[tokio::test]
  async fn test_profile_after_onboarding() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&dir);
    onboard(&config);

    let mut app = App::new(&config, true).unwrap();
    let text = run(&mut app, Some(Command::Profile)).await;
    assert!(text.contains("First name: Tilly"));
  }

  #[tokio::test]
  async fn test_register_leads_home() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&dir);
    let mut app = App::new(&config, true).unwrap();

    let args = RegisterArgs {
      first_name: "Tilly".to_string(),
      last_name: "Lemon".to_string(),
      email: "tilly@example.com".to_string(),
    };
    let text = run(&mut app, Some(Command::Register(args))).await;
    assert!(text.starts_with("Registration successful!"));
    assert!(text.contains(HOME_MARKER));

    let prefs = Preferences::open(&config.preferences_path().unwrap()).unwrap();
    assert_eq!(prefs.get(FIRST_NAME), Some("Tilly"));
  }

  #[tokio::test]
  async fn test_rejected_register_stays_on_onboarding() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&dir);
    let mut app = App::new(&config, true).unwrap();

    let args = RegisterArgs {
      first_name: "Tilly".to_string(),
      last_name: "Lemon".to_string(),
      email: String::new(),
    };
    let text = run(&mut app, Some(Command::Register(args))).await;
    assert!(text.starts_with("Registration unsuccessful. Please enter all data."));
    assert!(text.contains(ONBOARDING_MARKER));
    assert!(!text.contains(HOME_MARKER));

    let prefs = Preferences::open(&config.preferences_path().unwrap()).unwrap();
    assert!(prefs.is_empty());
  }

  #[tokio::test]
  async fn test_logout_leads_to_onboarding() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&dir);
    onboard(&config);

    let mut app = App::new(&config, true).unwrap();
    let text = run(&mut app, Some(Command::Logout)).await;
    assert!(text.contains(ONBOARDING_MARKER));

    let prefs = Preferences::open(&config.preferences_path().unwrap()).unwrap();
    assert!(prefs.is_empty());

    let mut app = App::new(&config, true).unwrap();
    assert!(run(&mut app, None).await.contains(ONBOARDING_MARKER));
  }

  #[tokio::test]
  async fn test_menu_redraws_when_sync_adds_rows() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&dir);
    onboard(&config);

    let client = client_for(serve_once("200 OK", MENU_JSON).await);
    let mut app = App::open(&config, Some(client)).unwrap();

    // The sync task cannot run before the first draw on this runtime
    let text = run(&mut app, menu()).await;
    assert_eq!(text.matches(HOME_MARKER).count(), 2);
    assert!(text.contains("No menu cached yet."));
    assert!(text.contains("3 of 3 items"));
  }

  #[tokio::test]
  async fn test_menu_draws_once_when_sync_adds_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&dir);
    onboard(&config);

    {
      let store = MenuStore::open(&config.database_path().unwrap()).unwrap();
      let cached: Vec<MenuEntry> = (1..=3)
        .map(|id| MenuEntry {
          id,
          title: format!("Cached {}", id),
          description: "cached".to_string(),
          price: "5".to_string(),
          image: "cached.jpg".to_string(),
          category: "mains".to_string(),
        })
        .collect();
      store.insert_many(&cached).unwrap();
    }

    let client = client_for(serve_once("200 OK", MENU_JSON).await);
    let mut app = App::open(&config, Some(client)).unwrap();

    let mut args = MenuArgs::default();
    args.categories.push(Category::Mains);
    let text = run(&mut app, Some(Command::Menu(args))).await;
    assert_eq!(text.matches(HOME_MARKER).count(), 1);
    assert!(text.contains("3 of 3 items"));
    assert!(text.contains("Cached 2"));
  }
}
