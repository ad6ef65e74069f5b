//! Implementation of the `splunkctl plan` command.
//!
//! This command evaluates a parameter file for one host and prints the
//! resulting catalog and its hash.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use splunk_lib::config::{load_params, normalize};
use splunk_lib::eval::evaluate_config;
use splunk_lib::facts::HostFacts;
use splunk_lib::resource::{ManagedResource, ResourceKind};

use super::detect_facts;
use crate::output::{OutputFormat, print_json, print_resource, print_stat, print_success, print_warning, truncate_hash};
use crate::templates::DirTemplates;

/// Attributes shown next to each resource in text output.
const SUMMARY_ATTRS: &[&str] = &["ensure", "enable", "path", "command", "tool", "helper"];

pub fn cmd_plan(
  params: &Path,
  fqdn: Option<String>,
  ipaddress: Option<String>,
  templates: Option<PathBuf>,
  format: OutputFormat,
) -> Result<()> {
  let raw = load_params(params).with_context(|| format!("Failed to load parameters: {}", params.display()))?;
  let config = normalize(&raw).with_context(|| format!("Invalid parameters in {}", params.display()))?;

  let mut facts = fqdn.map(HostFacts::new).unwrap_or_else(detect_facts);
  if let Some(ip) = ipaddress {
    facts = facts.with_ipaddress(ip);
  }

  let store = DirTemplates::new(templates.unwrap_or_else(|| DirTemplates::default_root(params)));
  debug!(templates = %store.root().display(), fqdn = %facts.fqdn, "planning");
  let uses_templates = config.template_inputs.is_some() || config.template_outputs.is_some();
  if uses_templates && !store.root().is_dir() {
    print_warning(&format!("Template directory not found: {}", store.root().display()));
  }

  let evaluation = evaluate_config(&config, &facts, &store).context("Failed to evaluate catalog")?;

  if format.is_json() {
    return print_json(&evaluation);
  }

  print_success(&format!("Catalog for {} ({})", facts.fqdn, evaluation.verdict.state));
  print_stat("Hash", truncate_hash(&evaluation.hash.0));
  print_stat("Resources", &evaluation.catalog.len().to_string());
  println!();
  for resource in evaluation.catalog.iter() {
    print_resource(marker_state(resource), &resource.reference(), &summary(resource));
  }

  Ok(())
}

/// The ensure-like state used to pick a marker.
///
/// Integrations carry `enable` rather than `ensure`; a service without
/// `ensure` has its run state left alone.
fn marker_state(resource: &ManagedResource) -> Option<&str> {
  if let Some(ensure) = resource.get_str("ensure") {
    return Some(ensure);
  }
  match (resource.kind, resource.get_bool("enable")) {
    (ResourceKind::Service, _) => None,
    (_, Some(false)) => Some("absent"),
    _ => Some("present"),
  }
}

fn summary(resource: &ManagedResource) -> String {
  let parts: Vec<String> = SUMMARY_ATTRS
    .iter()
    .filter_map(|key| resource.get(key).map(|value| format!("{}={}", key, value)))
    .collect();
  if parts.is_empty() {
    String::new()
  } else {
    format!("({})", parts.join(", "))
  }
}
