//! Implementation of the `splunkctl facts` command.

use anyhow::Result;
use serde_json::json;

use splunk_lib::facts::HostFacts;

use crate::output::{OutputFormat, print_info, print_json, print_stat};

/// Facts for the machine splunkctl runs on.
///
/// Only the host name is detected; the IP address has to be passed in.
pub fn detect_facts() -> HostFacts {
  let hostname = whoami::fallible::hostname().unwrap_or_else(|_| "unknown".to_string());
  HostFacts::new(hostname)
}

pub fn cmd_facts(format: OutputFormat) -> Result<()> {
  let facts = detect_facts();

  if format.is_json() {
    print_json(&json!({
      "fqdn": facts.fqdn,
      "hostname": facts.hostname,
      "ipaddress": facts.ipaddress,
    }))?;
  } else {
    print_info("Detected host facts");
    print_stat("fqdn", &facts.fqdn);
    print_stat("hostname", &facts.hostname);
    print_stat("ipaddress", facts.ipaddress.as_deref().unwrap_or("unknown (use --ipaddress)"));
  }

  Ok(())
}
