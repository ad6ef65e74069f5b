//! Parameter normalization.
//!
//! Turns a [`RawParams`] bag into a [`Config`]. This is the only place legacy
//! value forms are understood:
//!
//! - booleans: `true`/`false` or the strings `yes`/`no`/`true`/`false`, any case
//! - lists: a single string (one-element list) or an array of strings
//! - optional strings: an empty string means "not set"
//!
//! Unknown keys are ignored so newer parameter files keep working with older
//! releases.

use std::collections::BTreeMap;

use tracing::debug;

use super::ConfigError;
use super::types::{Config, ParamValue, Protocol, RawParams};
use crate::consts::{
  DEFAULT_BASE_DIR, DEFAULT_FILE_MODE, DEFAULT_FILE_OWNER, DEFAULT_FIREWALL_SRC, DEFAULT_PORT, DEFAULT_PROCESS,
  DEFAULT_PUPPI_HELPER, SERVICE_TITLE,
};

/// Largest integer an `f64` holds exactly (2^53).
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Every option name the validator understands.
pub const KNOWN_KEYS: &[&str] = &[
  "absent",
  "admin_password",
  "base_dir",
  "config_dir",
  "config_file_group",
  "config_file_mode",
  "config_file_owner",
  "debug",
  "deployment_server",
  "disable",
  "disableboot",
  "firewall",
  "firewall_dst",
  "firewall_src",
  "firewall_tool",
  "forward_server",
  "monitor",
  "monitor_path",
  "monitor_target",
  "monitor_tool",
  "my_class",
  "options",
  "package",
  "port",
  "process",
  "protocol",
  "puppi",
  "puppi_helper",
  "service",
  "service_autorestart",
  "source_dir",
  "source_dir_purge",
  "template_inputs",
  "template_outputs",
  "version",
];

/// Normalize raw parameters into a [`Config`].
///
/// # Errors
///
/// Returns [`ConfigError::InvalidParameter`] naming the first key whose value
/// cannot be normalized.
pub fn normalize(raw: &RawParams) -> Result<Config, ConfigError> {
  for key in raw.keys().filter(|k| !KNOWN_KEYS.contains(k)) {
    debug!(key, "ignoring unknown parameter");
  }

  let base_dir = string_or(raw, "base_dir", DEFAULT_BASE_DIR)?;
  let config_dir = match optional_string(raw, "config_dir")? {
    Some(dir) => dir,
    None => format!("{}/etc/system/local", base_dir.trim_end_matches('/')),
  };

  let config = Config {
    absent: boolean(raw, "absent", false)?,
    disable: boolean(raw, "disable", false)?,
    disableboot: boolean(raw, "disableboot", false)?,

    version: optional_string(raw, "version")?,
    package: string_or(raw, "package", SERVICE_TITLE)?,
    service: string_or(raw, "service", SERVICE_TITLE)?,
    process: string_or(raw, "process", DEFAULT_PROCESS)?,
    service_autorestart: boolean(raw, "service_autorestart", true)?,

    base_dir,
    config_dir,
    config_file_owner: string_or(raw, "config_file_owner", DEFAULT_FILE_OWNER)?,
    config_file_group: string_or(raw, "config_file_group", DEFAULT_FILE_OWNER)?,
    config_file_mode: string_or(raw, "config_file_mode", DEFAULT_FILE_MODE)?,

    port: port(raw, "port")?,
    protocol: protocol(raw, "protocol")?,
    forward_server: endpoint_list(raw, "forward_server")?,
    deployment_server: optional_string(raw, "deployment_server")?,
    monitor_path: list(raw, "monitor_path")?,
    admin_password: optional_string(raw, "admin_password")?,

    template_inputs: optional_string(raw, "template_inputs")?,
    template_outputs: optional_string(raw, "template_outputs")?,
    options: table(raw, "options")?,
    source_dir: optional_string(raw, "source_dir")?,
    source_dir_purge: boolean(raw, "source_dir_purge", false)?,
    my_class: optional_string(raw, "my_class")?,
    debug: boolean(raw, "debug", false)?,

    monitor: boolean(raw, "monitor", false)?,
    monitor_tool: list(raw, "monitor_tool")?,
    monitor_target: optional_string(raw, "monitor_target")?,
    firewall: boolean(raw, "firewall", false)?,
    firewall_tool: list(raw, "firewall_tool")?,
    firewall_src: string_or(raw, "firewall_src", DEFAULT_FIREWALL_SRC)?,
    firewall_dst: optional_string(raw, "firewall_dst")?,
    puppi: boolean(raw, "puppi", false)?,
    puppi_helper: string_or(raw, "puppi_helper", DEFAULT_PUPPI_HELPER)?,
  };

  debug!(
    absent = config.absent,
    disable = config.disable,
    disableboot = config.disableboot,
    forward_servers = config.forward_server.len(),
    "parameters normalized"
  );

  Ok(config)
}

fn invalid(key: &str, message: impl Into<String>) -> ConfigError {
  ConfigError::InvalidParameter {
    key: key.to_string(),
    message: message.into(),
  }
}

/// Parse a boolean, accepting the legacy `yes`/`no` strings.
pub fn parse_bool(value: &ParamValue) -> Option<bool> {
  match value {
    ParamValue::Boolean(b) => Some(*b),
    ParamValue::String(s) => match s.trim().to_ascii_lowercase().as_str() {
      "yes" | "true" => Some(true),
      "no" | "false" => Some(false),
      _ => None,
    },
    _ => None,
  }
}

fn boolean(raw: &RawParams, key: &str, default: bool) -> Result<bool, ConfigError> {
  match raw.get(key) {
    None | Some(ParamValue::Null) => Ok(default),
    Some(value) => parse_bool(value).ok_or_else(|| match value {
      ParamValue::String(s) => invalid(key, format!("expected a boolean or yes/no, got '{}'", s)),
      other => invalid(key, format!("expected a boolean or yes/no, got {}", other.type_name())),
    }),
  }
}

fn optional_string(raw: &RawParams, key: &str) -> Result<Option<String>, ConfigError> {
  match raw.get(key) {
    None | Some(ParamValue::Null) => Ok(None),
    Some(ParamValue::String(s)) if s.trim().is_empty() => Ok(None),
    Some(ParamValue::String(s)) => Ok(Some(s.clone())),
    // The parsed f64 has lost the original text (`9.10` reads back as `9.1`).
    Some(ParamValue::Number(n)) => Err(invalid(
      key,
      format!("numeric value {} must be quoted to keep its exact text", n),
    )),
    Some(other) => Err(invalid(key, format!("expected a string, got {}", other.type_name()))),
  }
}

fn string_or(raw: &RawParams, key: &str, default: &str) -> Result<String, ConfigError> {
  Ok(optional_string(raw, key)?.unwrap_or_else(|| default.to_string()))
}

fn list(raw: &RawParams, key: &str) -> Result<Vec<String>, ConfigError> {
  match raw.get(key) {
    None | Some(ParamValue::Null) => Ok(Vec::new()),
    Some(ParamValue::String(s)) if s.trim().is_empty() => Ok(Vec::new()),
    Some(ParamValue::String(s)) => Ok(vec![s.clone()]),
    Some(ParamValue::Array(items)) => items
      .iter()
      .enumerate()
      .map(|(i, item)| match item {
        ParamValue::String(s) => Ok(s.clone()),
        other => Err(invalid(
          key,
          format!("element {} must be a string, got {}", i, other.type_name()),
        )),
      })
      .collect(),
    Some(other) => Err(invalid(
      key,
      format!("expected a string or a list of strings, got {}", other.type_name()),
    )),
  }
}

/// A list of `host:port` endpoints. Entries must not be blank.
fn endpoint_list(raw: &RawParams, key: &str) -> Result<Vec<String>, ConfigError> {
  let entries = list(raw, key)?;
  if let Some(pos) = entries.iter().position(|e| e.trim().is_empty()) {
    return Err(invalid(key, format!("element {} is empty", pos)));
  }
  Ok(entries)
}

fn port(raw: &RawParams, key: &str) -> Result<u16, ConfigError> {
  let text = match raw.get(key) {
    None | Some(ParamValue::Null) => return Ok(DEFAULT_PORT),
    Some(ParamValue::Number(n)) => n.to_string(),
    Some(ParamValue::String(s)) => s.trim().to_string(),
    Some(other) => return Err(invalid(key, format!("expected a port number, got {}", other.type_name()))),
  };
  match text.parse::<u16>() {
    Ok(0) | Err(_) => Err(invalid(key, format!("'{}' is not a port in 1-65535", text))),
    Ok(p) => Ok(p),
  }
}

fn protocol(raw: &RawParams, key: &str) -> Result<Protocol, ConfigError> {
  match optional_string(raw, key)? {
    None => Ok(Protocol::default()),
    Some(s) => match s.to_ascii_lowercase().as_str() {
      "tcp" => Ok(Protocol::Tcp),
      "udp" => Ok(Protocol::Udp),
      _ => Err(invalid(key, format!("unsupported protocol '{}', expected tcp or udp", s))),
    },
  }
}

fn table(raw: &RawParams, key: &str) -> Result<BTreeMap<String, ParamValue>, ConfigError> {
  match raw.get(key) {
    None | Some(ParamValue::Null) => Ok(BTreeMap::new()),
    Some(ParamValue::Table(t)) => {
      for (name, value) in t {
        check_option_value(key, name, value)?;
      }
      Ok(t.clone())
    }
    Some(other) => Err(invalid(key, format!("expected a table, got {}", other.type_name()))),
  }
}

/// Template options render numbers as text, which is only exact for integers.
fn check_option_value(key: &str, name: &str, value: &ParamValue) -> Result<(), ConfigError> {
  match value {
    ParamValue::Number(n) if n.fract() != 0.0 || n.abs() > MAX_EXACT_INTEGER => Err(invalid(
      key,
      format!("option '{}': numeric value {} must be quoted to keep its exact text", name, n),
    )),
    ParamValue::Array(items) => items.iter().try_for_each(|item| check_option_value(key, name, item)),
    ParamValue::Table(entries) => entries
      .iter()
      .try_for_each(|(inner, item)| check_option_value(key, &format!("{}.{}", name, inner), item)),
    _ => Ok(()),
  }
}
