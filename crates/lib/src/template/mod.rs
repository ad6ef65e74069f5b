//! Template rendering for managed configuration files.
//!
//! Templates are looked up by id through a [`TemplateStore`] (storage is the
//! caller's business) and rendered against a [`TemplateContext`] built from
//! host facts and the normalized configuration. See [`placeholder`] for the
//! syntax.

mod placeholder;

use std::borrow::Cow;
use std::collections::BTreeMap;

use tracing::debug;

pub use placeholder::{
  Placeholder, PlaceholderError, Resolver, Segment, parse, substitute, substitute_segments,
};

use crate::config::{Config, ParamValue};
use crate::facts::HostFacts;

/// Errors that can occur while loading or rendering a template.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
  #[error("template not found: {0}")]
  NotFound(String),

  #[error("failed to load template '{id}': {message}")]
  Load { id: String, message: String },

  #[error("template '{id}' is malformed: {source}")]
  Syntax {
    id: String,
    #[source]
    source: PlaceholderError,
  },

  #[error("failed to render template '{id}': {source}")]
  Rendering {
    id: String,
    #[source]
    source: PlaceholderError,
  },
}

/// Source of template text, keyed by template id (e.g. `splunk/inputs.conf`).
pub trait TemplateStore {
  fn load(&self, id: &str) -> Result<String, TemplateError>;
}

/// An in-memory template store.
#[derive(Debug, Clone, Default)]
pub struct MemoryTemplates {
  templates: BTreeMap<String, String>,
}

impl MemoryTemplates {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with(mut self, id: &str, source: &str) -> Self {
    self.insert(id, source);
    self
  }

  pub fn insert(&mut self, id: &str, source: &str) {
    self.templates.insert(id.to_string(), source.to_string());
  }
}

impl TemplateStore for MemoryTemplates {
  fn load(&self, id: &str) -> Result<String, TemplateError> {
    self
      .templates
      .get(id)
      .cloned()
      .ok_or_else(|| TemplateError::NotFound(id.to_string()))
  }
}

/// Values visible to a template.
///
/// Variables: `fqdn`, `hostname`, `ipaddress` (empty when unknown), `port`,
/// `protocol`, `base_dir`, `config_dir`, `debug`. Options come verbatim from
/// the `options` parameter; arrays of scalars render comma separated.
#[derive(Debug, Clone)]
pub struct TemplateContext<'a> {
  vars: BTreeMap<&'static str, String>,
  options: &'a BTreeMap<String, ParamValue>,
}

impl<'a> TemplateContext<'a> {
  pub fn new(facts: &HostFacts, config: &'a Config) -> Self {
    let vars = BTreeMap::from([
      ("fqdn", facts.fqdn.clone()),
      ("hostname", facts.hostname.clone()),
      ("ipaddress", facts.ipaddress.clone().unwrap_or_default()),
      ("port", config.port.to_string()),
      ("protocol", config.protocol.to_string()),
      ("base_dir", config.base_dir.clone()),
      ("config_dir", config.config_dir.clone()),
      ("debug", config.debug.to_string()),
    ]);
    Self {
      vars,
      options: &config.options,
    }
  }
}

impl Resolver for TemplateContext<'_> {
  fn resolve_var(&self, name: &str) -> Result<Cow<'_, str>, PlaceholderError> {
    self
      .vars
      .get(name)
      .map(|v| Cow::Borrowed(v.as_str()))
      .ok_or_else(|| PlaceholderError::UnknownVariable(name.to_string()))
  }

  fn resolve_option(&self, key: &str) -> Result<Cow<'_, str>, PlaceholderError> {
    let value = self
      .options
      .get(key)
      .ok_or_else(|| PlaceholderError::UnresolvedOption(key.to_string()))?;

    match value {
      ParamValue::String(s) => Ok(Cow::Borrowed(s.as_str())),
      ParamValue::Null => Ok(Cow::Borrowed("")),
      ParamValue::Array(items) => items
        .iter()
        .map(|item| {
          item
            .as_scalar_string()
            .ok_or_else(|| PlaceholderError::NonScalarOption(key.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(|parts| Cow::Owned(parts.join(","))),
      other => other
        .as_scalar_string()
        .map(Cow::Owned)
        .ok_or_else(|| PlaceholderError::NonScalarOption(key.to_string())),
    }
  }
}

/// Renders templates from a store.
pub struct TemplateRenderer<'s> {
  store: &'s dyn TemplateStore,
}

impl<'s> TemplateRenderer<'s> {
  pub fn new(store: &'s dyn TemplateStore) -> Self {
    Self { store }
  }

  /// Render template `id` against `ctx`.
  ///
  /// # Errors
  ///
  /// [`TemplateError::NotFound`] when the store has no such template,
  /// [`TemplateError::Syntax`] for malformed placeholders and
  /// [`TemplateError::Rendering`] when the context cannot satisfy one.
  pub fn render(&self, id: &str, ctx: &TemplateContext<'_>) -> Result<String, TemplateError> {
    let text = self.store.load(id)?;
    let segments = parse(&text).map_err(|source| TemplateError::Syntax {
      id: id.to_string(),
      source,
    })?;
    let content = substitute_segments(&segments, ctx).map_err(|source| TemplateError::Rendering {
      id: id.to_string(),
      source,
    })?;
    debug!(template = id, bytes = content.len(), "rendered template");
    Ok(content)
  }
}
