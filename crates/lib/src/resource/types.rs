use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of a managed resource, as understood by the convergence engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
  Package,
  Service,
  File,
  Exec,
  FirewallRule,
  MonitorProcess,
  Puppize,
}

impl ResourceKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      ResourceKind::Package => "package",
      ResourceKind::Service => "service",
      ResourceKind::File => "file",
      ResourceKind::Exec => "exec",
      ResourceKind::FirewallRule => "firewall_rule",
      ResourceKind::MonitorProcess => "monitor_process",
      ResourceKind::Puppize => "puppize",
    }
  }
}

impl fmt::Display for ResourceKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A resolved attribute value.
///
/// Serialized untagged, so a catalog reads as plain JSON:
///
/// ```json
/// { "ensure": "present", "enable": true, "tool": ["nagios", "munin"] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
  Boolean(bool),
  String(String),
  Array(Vec<AttrValue>),
}

impl AttrValue {
  pub fn as_str(&self) -> Option<&str> {
    match self {
      AttrValue::String(s) => Some(s),
      _ => None,
    }
  }

  pub fn as_bool(&self) -> Option<bool> {
    match self {
      AttrValue::Boolean(b) => Some(*b),
      _ => None,
    }
  }
}

impl fmt::Display for AttrValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      AttrValue::Boolean(b) => write!(f, "{}", b),
      AttrValue::String(s) => write!(f, "{:?}", s),
      AttrValue::Array(items) => {
        write!(f, "[")?;
        for (i, item) in items.iter().enumerate() {
          if i > 0 {
            write!(f, ", ")?;
          }
          write!(f, "{}", item)?;
        }
        write!(f, "]")
      }
    }
  }
}

impl From<bool> for AttrValue {
  fn from(value: bool) -> Self {
    AttrValue::Boolean(value)
  }
}

impl From<&str> for AttrValue {
  fn from(value: &str) -> Self {
    AttrValue::String(value.to_string())
  }
}

impl From<String> for AttrValue {
  fn from(value: String) -> Self {
    AttrValue::String(value)
  }
}

impl From<&String> for AttrValue {
  fn from(value: &String) -> Self {
    AttrValue::String(value.clone())
  }
}

/// A single declarative resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagedResource {
  pub kind: ResourceKind,
  pub name: String,
  pub attributes: BTreeMap<String, AttrValue>,
}

impl ManagedResource {
  pub fn new(kind: ResourceKind, name: impl Into<String>) -> Self {
    Self {
      kind,
      name: name.into(),
      attributes: BTreeMap::new(),
    }
  }

  /// Set an attribute, builder style.
  pub fn attr(mut self, key: &str, value: impl Into<AttrValue>) -> Self {
    self.attributes.insert(key.to_string(), value.into());
    self
  }

  /// Set an attribute only when a value is present.
  pub fn attr_opt<V: Into<AttrValue>>(self, key: &str, value: Option<V>) -> Self {
    match value {
      Some(v) => self.attr(key, v),
      None => self,
    }
  }

  pub fn get(&self, key: &str) -> Option<&AttrValue> {
    self.attributes.get(key)
  }

  pub fn get_str(&self, key: &str) -> Option<&str> {
    self.get(key).and_then(AttrValue::as_str)
  }

  pub fn get_bool(&self, key: &str) -> Option<bool> {
    self.get(key).and_then(AttrValue::as_bool)
  }

  /// The catalog key, e.g. `file[splunk_inputs.conf]`.
  pub fn reference(&self) -> String {
    reference(self.kind, &self.name)
  }
}

/// Build a `kind[name]` reference.
pub fn reference(kind: ResourceKind, name: &str) -> String {
  format!("{}[{}]", kind, name)
}

/// Collapse a tool list into an attribute: one tool is a plain string.
pub fn list_attr(values: &[String]) -> Option<AttrValue> {
  match values {
    [] => None,
    [single] => Some(AttrValue::from(single)),
    many => Some(AttrValue::Array(many.iter().map(AttrValue::from).collect())),
  }
}
