//! Parameter loading and validation.
//!
//! Parameter files are YAML or JSON documents whose top level is a mapping of
//! option name to value. They are parsed into [`RawParams`] and then
//! normalized into a typed [`Config`] by [`normalize`].

mod types;
mod validate;

use std::fs;
use std::path::Path;

use tracing::debug;

pub use types::*;
pub use validate::{KNOWN_KEYS, normalize, parse_bool};

/// Errors that can occur while loading or validating parameters.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// A parameter value could not be normalized.
  #[error("invalid parameter '{key}': {message}")]
  InvalidParameter { key: String, message: String },

  #[error("failed to read {path}: {source}")]
  Read {
    path: String,
    #[source]
    source: std::io::Error,
  },

  #[error("yaml error: {0}")]
  Yaml(#[from] serde_yaml::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),
}

impl RawParams {
  pub fn from_yaml_str(input: &str) -> Result<Self, ConfigError> {
    // An empty document is a valid "no parameters" file.
    if input.trim().is_empty() {
      return Ok(Self::default());
    }
    Ok(serde_yaml::from_str(input)?)
  }

  pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
    Ok(serde_json::from_str(input)?)
  }
}

/// Load raw parameters from a file.
///
/// Files ending in `.json` are parsed as JSON, anything else as YAML.
pub fn load_params(path: &Path) -> Result<RawParams, ConfigError> {
  let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
    path: path.display().to_string(),
    source,
  })?;

  let is_json = path
    .extension()
    .and_then(|ext| ext.to_str())
    .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

  let raw = if is_json {
    RawParams::from_json_str(&content)?
  } else {
    RawParams::from_yaml_str(&content)?
  };

  debug!(path = %path.display(), keys = raw.0.len(), "loaded parameters");
  Ok(raw)
}
