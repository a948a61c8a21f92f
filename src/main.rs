mod app;
mod commands;
mod config;
mod db;
mod menu;
mod prefs;
mod screens;

use clap::Parser;
use color_eyre::{eyre::eyre, Result};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "littlelemon")]
#[command(about = "Little Lemon restaurant menu, cached for offline use")]
#[command(version)]
struct Args {
  /// Path to config file (default: $XDG_CONFIG_HOME/littlelemon/config.yaml)
  #[arg(long, global = true)]
  config: Option<PathBuf>,

  /// Directory for the menu cache, preferences and logs
  #[arg(long, global = true)]
  data_dir: Option<PathBuf>,

  /// Skip the startup menu sync and show only what is cached
  #[arg(long, global = true)]
  offline: bool,

  #[command(subcommand)]
  command: Option<commands::Command>,
}

/// Log to a daily file in the data directory; stdout belongs to the screens.
/// RUST_LOG overrides the configured level.
fn init_tracing(config: &config::Config) -> Result<WorkerGuard> {
  let log_dir = config.log_dir()?;
  std::fs::create_dir_all(&log_dir)
    .map_err(|e| eyre!("Failed to create log directory {}: {}", log_dir.display(), e))?;

  let appender = tracing_appender::rolling::daily(&log_dir, "littlelemon.log");
  let (writer, guard) = tracing_appender::non_blocking(appender);

  let filter =
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log.level));

  tracing_subscriber::registry()
    .with(fmt::layer().with_writer(writer).with_ansi(false))
    .with(filter)
    .init();

  Ok(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  let args = Args::parse();

  // Load configuration
  let config = config::Config::load(args.config.as_deref())?;

  // Override data directory if specified on command line
  let config = if let Some(data_dir) = args.data_dir {
    config::Config {
      data_dir: Some(data_dir),
      ..config
    }
  } else {
    config
  };

  let _log_guard = init_tracing(&config)?;
  tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting");

  let mut app = app::App::new(&config, args.offline)?;
  app.run(args.command, &mut std::io::stdout()).await?;

  Ok(())
}
