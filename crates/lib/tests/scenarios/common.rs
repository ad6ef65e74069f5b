//! Shared helpers for catalog scenarios.

use splunk_lib::config::RawParams;
use splunk_lib::eval::{EvalError, Evaluation, evaluate};
use splunk_lib::facts::HostFacts;
use splunk_lib::resource::{ManagedResource, ResourceKind};
use splunk_lib::template::MemoryTemplates;

pub const INPUTS_TEMPLATE: &str = "fqdn: $${fqdn}\nopt_a: $${options:opt_a}\n";

/// Facts of the host every scenario evaluates for.
pub fn facts() -> HostFacts {
  HostFacts::new("rspec.example42.com").with_ipaddress("10.42.42.42")
}

pub fn templates() -> MemoryTemplates {
  MemoryTemplates::new()
    .with("splunk/spec.erb", INPUTS_TEMPLATE)
    .with("splunk/outputs.conf", "[tcpout]\nindexAndForward = $${options:index_and_forward}\n")
}

pub fn try_evaluate(yaml: &str) -> Result<Evaluation, EvalError> {
  let raw = RawParams::from_yaml_str(yaml).unwrap_or_else(|e| panic!("bad scenario yaml: {}", e));
  evaluate(&raw, &facts(), &templates())
}

pub fn evaluate_yaml(yaml: &str) -> Evaluation {
  try_evaluate(yaml).unwrap_or_else(|e| panic!("evaluation failed: {}", e))
}

/// Look up a resource, panicking with its reference when missing.
pub fn resource<'a>(evaluation: &'a Evaluation, kind: ResourceKind, name: &str) -> &'a ManagedResource {
  evaluation
    .catalog
    .get(kind, name)
    .unwrap_or_else(|| panic!("missing {}[{}]", kind, name))
}

pub fn str_attr<'a>(evaluation: &'a Evaluation, kind: ResourceKind, name: &str, key: &str) -> Option<&'a str> {
  resource(evaluation, kind, name).get_str(key)
}

pub fn bool_attr(evaluation: &Evaluation, kind: ResourceKind, name: &str, key: &str) -> Option<bool> {
  resource(evaluation, kind, name).get_bool(key)
}
