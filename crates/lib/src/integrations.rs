//! Auxiliary integrations: process monitoring, firewalling and puppi.
//!
//! Each integration is independent and fires only when its flag is set. Their
//! enable state mirrors the lifecycle verdict, with one asymmetry: firewall
//! rules follow [`LifecycleVerdict::firewall_enable`], which stays true when
//! only boot-time start is disabled.

use tracing::debug;

use crate::config::Config;
use crate::facts::HostFacts;
use crate::lifecycle::LifecycleVerdict;
use crate::resource::{ManagedResource, ResourceKind, list_attr, names};

/// Emit the auxiliary resources selected by `config`.
pub fn dispatch(config: &Config, verdict: &LifecycleVerdict, facts: &HostFacts) -> Vec<ManagedResource> {
  let mut resources = Vec::new();

  if config.monitor {
    resources.push(monitor_process(config, verdict, facts));
  }
  if config.firewall {
    resources.push(firewall_rule(config, verdict, facts));
  }
  if config.puppi {
    resources.push(puppize(config, verdict));
  }

  debug!(
    monitor = config.monitor,
    firewall = config.firewall,
    puppi = config.puppi,
    count = resources.len(),
    "dispatched integrations"
  );
  resources
}

fn monitor_process(config: &Config, verdict: &LifecycleVerdict, facts: &HostFacts) -> ManagedResource {
  let target = config.monitor_target.as_ref().or(facts.ipaddress.as_ref());
  let pidfile = format!("{}/var/run/splunk/splunkd.pid", config.base_dir.trim_end_matches('/'));

  ManagedResource::new(ResourceKind::MonitorProcess, names::monitor_process())
    .attr("process", &config.process)
    .attr("service", &config.service)
    .attr("pidfile", pidfile)
    .attr("enable", verdict.aux_enable)
    .attr_opt("target", target)
    .attr_opt("tool", list_attr(&config.monitor_tool))
}

fn firewall_rule(config: &Config, verdict: &LifecycleVerdict, facts: &HostFacts) -> ManagedResource {
  let destination = config.firewall_dst.as_ref().or(facts.ipaddress.as_ref());

  ManagedResource::new(ResourceKind::FirewallRule, names::firewall_rule(config.protocol, config.port))
    .attr("source", &config.firewall_src)
    .attr_opt("destination", destination)
    .attr("protocol", config.protocol.as_str())
    .attr("port", config.port.to_string())
    .attr("action", "allow")
    .attr("direction", "input")
    .attr("enable", verdict.firewall_enable)
    .attr_opt("tool", list_attr(&config.firewall_tool))
}

fn puppize(config: &Config, verdict: &LifecycleVerdict) -> ManagedResource {
  let ensure = if verdict.is_absent() { "absent" } else { "present" };

  ManagedResource::new(ResourceKind::Puppize, names::service())
    .attr("ensure", ensure)
    .attr("helper", &config.puppi_helper)
}
