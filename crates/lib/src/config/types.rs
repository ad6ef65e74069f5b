//! Parameter types.
//!
//! Parameters exist in two forms:
//!
//! - [`RawParams`]: the untyped option bag as read from YAML or JSON. Legacy
//!   forms such as `"yes"`/`"no"` booleans or a lone string where a list is
//!   expected are still present here.
//! - [`Config`]: the normalized, strongly typed configuration produced by
//!   [`normalize`](super::normalize). Everything downstream of the validator
//!   only ever sees this type.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A raw parameter value.
///
/// Mirrors the value space of YAML and JSON documents. Numbers are kept as
/// `f64`, so their source text is gone: only a port or an integral template
/// option is accepted as a bare number, everything else has to be quoted.
///
/// # Example
///
/// ```json
/// {
///   "monitor": "yes",
///   "port": 42,
///   "forward_server": ["a:9997", "b:9997"],
///   "options": { "opt_a": "value_a" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
  /// A boolean value.
  Boolean(bool),
  /// A numeric value.
  Number(f64),
  /// A string value.
  String(String),
  /// An ordered sequence of values.
  Array(Vec<ParamValue>),
  /// A map with string keys.
  Table(BTreeMap<String, ParamValue>),
  /// An explicit null, treated as "not set".
  Null,
}

impl ParamValue {
  /// Short type name used in validation messages.
  pub fn type_name(&self) -> &'static str {
    match self {
      ParamValue::Boolean(_) => "boolean",
      ParamValue::Number(_) => "number",
      ParamValue::String(_) => "string",
      ParamValue::Array(_) => "array",
      ParamValue::Table(_) => "table",
      ParamValue::Null => "null",
    }
  }

  /// Render a scalar as text. Returns `None` for arrays, tables and null.
  ///
  /// Integral numbers print without a fraction (`3.0` becomes `"3"`).
  pub fn as_scalar_string(&self) -> Option<String> {
    match self {
      ParamValue::Boolean(b) => Some(b.to_string()),
      ParamValue::Number(n) => Some(n.to_string()),
      ParamValue::String(s) => Some(s.clone()),
      _ => None,
    }
  }
}

impl From<&str> for ParamValue {
  fn from(value: &str) -> Self {
    ParamValue::String(value.to_string())
  }
}

impl From<bool> for ParamValue {
  fn from(value: bool) -> Self {
    ParamValue::Boolean(value)
  }
}

/// The raw option bag, keyed by option name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawParams(pub BTreeMap<String, ParamValue>);

impl RawParams {
  pub fn new() -> Self {
    Self::default()
  }

  /// Builder-style insert, mostly useful in tests and embedding code.
  pub fn with(mut self, key: &str, value: impl Into<ParamValue>) -> Self {
    self.0.insert(key.to_string(), value.into());
    self
  }

  pub fn get(&self, key: &str) -> Option<&ParamValue> {
    self.0.get(key)
  }

  pub fn keys(&self) -> impl Iterator<Item = &str> {
    self.0.keys().map(String::as_str)
  }
}

/// Transport protocol of the firewalled port.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
  #[default]
  Tcp,
  Udp,
}

impl Protocol {
  pub fn as_str(&self) -> &'static str {
    match self {
      Protocol::Tcp => "tcp",
      Protocol::Udp => "udp",
    }
  }
}

impl fmt::Display for Protocol {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// The normalized configuration.
///
/// Built once per evaluation and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Config {
  // Lifecycle flags
  pub absent: bool,
  pub disable: bool,
  pub disableboot: bool,

  // Package and service
  pub version: Option<String>,
  pub package: String,
  pub service: String,
  pub process: String,
  pub service_autorestart: bool,

  // Paths and file attributes
  pub base_dir: String,
  pub config_dir: String,
  pub config_file_owner: String,
  pub config_file_group: String,
  pub config_file_mode: String,

  // Splunk topology
  pub port: u16,
  pub protocol: Protocol,
  pub forward_server: Vec<String>,
  pub deployment_server: Option<String>,
  pub monitor_path: Vec<String>,
  #[serde(skip)]
  pub admin_password: Option<String>,

  // Customizations
  pub template_inputs: Option<String>,
  pub template_outputs: Option<String>,
  pub options: BTreeMap<String, ParamValue>,
  pub source_dir: Option<String>,
  pub source_dir_purge: bool,
  pub my_class: Option<String>,
  pub debug: bool,

  // Integrations
  pub monitor: bool,
  pub monitor_tool: Vec<String>,
  pub monitor_target: Option<String>,
  pub firewall: bool,
  pub firewall_tool: Vec<String>,
  pub firewall_src: String,
  pub firewall_dst: Option<String>,
  pub puppi: bool,
  pub puppi_helper: String,
}
