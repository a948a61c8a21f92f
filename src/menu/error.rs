use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
  #[error("Network error: {0}")]
  Network(#[from] reqwest::Error),

  #[error("Menu server returned {status}: {body}")]
  Status { status: u16, body: String },

  #[error("Malformed menu document: {0}")]
  Decode(#[from] serde_json::Error),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 200;

impl FetchError {
  pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
    let body = if body.len() <= MAX_ERROR_BODY_LENGTH {
      body.to_string()
    } else {
      let mut end = MAX_ERROR_BODY_LENGTH;
      while !body.is_char_boundary(end) {
        end -= 1;
      }
      format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
    };

    FetchError::Status {
      status: status.as_u16(),
      body,
    }
  }
}
