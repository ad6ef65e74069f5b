//! Host facts.
//!
//! Facts describe the managed host and are supplied by whatever inventory
//! layer drives the evaluation. Only the fully qualified name is required.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostFacts {
  /// Fully qualified domain name of the managed host.
  pub fqdn: String,
  /// Short host name. Defaults to the first label of `fqdn`.
  pub hostname: String,
  /// Primary IP address, used as the default monitor target and firewall destination.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub ipaddress: Option<String>,
}

impl HostFacts {
  pub fn new(fqdn: impl Into<String>) -> Self {
    let fqdn = fqdn.into();
    let hostname = fqdn.split('.').next().unwrap_or(&fqdn).to_string();
    Self {
      fqdn,
      hostname,
      ipaddress: None,
    }
  }

  pub fn with_ipaddress(mut self, ipaddress: impl Into<String>) -> Self {
    self.ipaddress = Some(ipaddress.into());
    self
  }
}
