use color_eyre::{eyre::eyre, Result};
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::config::MenuConfig;

use super::api_types::{ApiMenuItem, ApiMenuResponse};
use super::error::FetchError;

/// HTTP client for the remote menu document.
/// Clone is cheap - reqwest::Client is reference counted internally.
#[derive(Clone)]
pub struct MenuClient {
  http: reqwest::Client,
  url: Url,
}

impl MenuClient {
  pub fn new(config: &MenuConfig) -> Result<Self> {
    let url = Url::parse(&config.url)
      .map_err(|e| eyre!("Invalid menu URL '{}': {}", config.url, e))?;

    let http = reqwest::Client::builder()
      .user_agent(concat!("littlelemon/", env!("CARGO_PKG_VERSION")))
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()
      .map_err(|e| eyre!("Failed to create HTTP client: {}", e))?;

    Ok(Self { http, url })
  }

  pub fn url(&self) -> &Url {
    &self.url
  }

  /// Fetch the full menu with a single GET.
  ///
  /// The body is decoded from raw bytes because the upstream host labels the
  /// JSON document `text/plain`.
  pub async fn fetch_menu(&self) -> Result<Vec<ApiMenuItem>, FetchError> {
    debug!(url = %self.url, "Fetching menu");

    let response = self.http.get(self.url.clone()).send().await?;

    let status = response.status();
    if !status.is_success() {
      let body = response.text().await.unwrap_or_default();
      return Err(FetchError::from_status(status, &body));
    }

    let body = response.bytes().await?;
    decode_menu(&body)
  }
}

/// Decode a menu document body
pub fn decode_menu(body: &[u8]) -> Result<Vec<ApiMenuItem>, FetchError> {
  let response: ApiMenuResponse = serde_json::from_slice(body)?;
  Ok(response.menu)
}
