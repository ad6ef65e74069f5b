//! Parameter evaluation.
//!
//! This module provides [`evaluate`], which takes a raw parameter set and
//! the host facts and returns the resulting [`Catalog`] together with the
//! lifecycle verdict that shaped it.

use serde::Serialize;
use tracing::info;

use crate::builder;
use crate::config::{Config, ConfigError, RawParams, normalize};
use crate::facts::HostFacts;
use crate::integrations;
use crate::lifecycle::{LifecycleVerdict, resolve};
use crate::resource::{Catalog, CatalogError};
use crate::template::{TemplateError, TemplateRenderer, TemplateStore};
use crate::util::hash::{HashError, Hashable, ObjectHash};

/// Errors that can occur during evaluation.
#[derive(Debug, thiserror::Error)]
pub enum EvalError {
  /// Invalid parameter value.
  #[error("configuration error: {0}")]
  Config(#[from] ConfigError),

  /// Template lookup or rendering error.
  #[error("template error: {0}")]
  Template(#[from] TemplateError),

  /// Two resources claimed the same name.
  #[error("catalog error: {0}")]
  Catalog(#[from] CatalogError),

  #[error("failed to hash catalog: {0}")]
  Hash(#[from] HashError),
}

/// The result of one evaluation.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
  pub verdict: LifecycleVerdict,
  pub catalog: Catalog,
  /// Content hash of `catalog`.
  pub hash: ObjectHash,
}

/// Evaluate a raw parameter set into a catalog.
///
/// This function:
/// 1. Normalizes the raw parameters into a [`Config`]
/// 2. Resolves the lifecycle verdict
/// 3. Builds the core resources, rendering templates from `store`
/// 4. Adds the monitoring, firewall and puppi integrations
/// 5. Collects everything into a [`Catalog`] and hashes it
///
/// Nothing is returned on failure; a catalog is either complete or absent.
///
/// # Example
/// ```
/// use splunk_lib::config::RawParams;
/// use splunk_lib::eval::evaluate;
/// use splunk_lib::facts::HostFacts;
/// use splunk_lib::resource::ResourceKind;
/// use splunk_lib::template::MemoryTemplates;
///
/// let raw = RawParams::new().with("deployment_server", "ds.example42.com:8089");
/// let facts = HostFacts::new("idx1.example42.com");
/// let evaluation = evaluate(&raw, &facts, &MemoryTemplates::new()).unwrap();
///
/// let file = evaluation.catalog.get(ResourceKind::File, "splunk_deployment_server").unwrap();
/// assert_eq!(file.get_str("ensure"), Some("present"));
/// ```
pub fn evaluate(raw: &RawParams, facts: &HostFacts, store: &dyn TemplateStore) -> Result<Evaluation, EvalError> {
  let config = normalize(raw)?;
  evaluate_config(&config, facts, store)
}

/// Evaluate an already normalized configuration.
pub fn evaluate_config(config: &Config, facts: &HostFacts, store: &dyn TemplateStore) -> Result<Evaluation, EvalError> {
  let verdict = resolve(config);
  let renderer = TemplateRenderer::new(store);

  let mut catalog = Catalog::new();
  catalog.extend(builder::build(config, &verdict, facts, &renderer)?)?;
  catalog.extend(integrations::dispatch(config, &verdict, facts))?;

  let hash = catalog.compute_hash()?;
  info!(
    fqdn = %facts.fqdn,
    state = %verdict.state,
    resources = catalog.len(),
    hash = %hash,
    "catalog evaluated"
  );

  Ok(Evaluation { verdict, catalog, hash })
}
