//! Implementation of the `splunkctl validate` command.
//!
//! Loads and normalizes a parameter file without rendering anything, then
//! reports the lifecycle the parameters resolve to.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::json;

use splunk_lib::config::{load_params, normalize};
use splunk_lib::lifecycle::resolve;

use crate::output::{OutputFormat, print_json, print_stat, print_success};

pub fn cmd_validate(params: &Path, format: OutputFormat) -> Result<()> {
  let raw = load_params(params).with_context(|| format!("Failed to load parameters: {}", params.display()))?;
  let config = normalize(&raw).with_context(|| format!("Invalid parameters in {}", params.display()))?;
  let verdict = resolve(&config);

  if format.is_json() {
    return print_json(&json!({ "config": config, "verdict": verdict }));
  }

  print_success(&format!("{} is valid", params.display()));
  print_stat("Lifecycle", verdict.state.as_str());
  print_stat("Package", verdict.package_ensure.as_str());
  print_stat(
    "Service",
    verdict.service_ensure.map(|e| e.as_str()).unwrap_or("unmanaged"),
  );
  print_stat("Enabled at boot", &verdict.service_enable.to_string());
  print_stat("Listener", &format!("{}/{}", config.port, config.protocol));
  print_stat("Forward servers", &config.forward_server.len().to_string());
  print_stat(
    "Deployment server",
    config.deployment_server.as_deref().unwrap_or("none"),
  );

  Ok(())
}
