//! Resource names.
//!
//! Every name is derived from [`SERVICE_TITLE`] here so that no two concerns
//! can end up with the same `kind[name]` key.

use crate::config::Protocol;
use crate::consts::SERVICE_TITLE;

/// Title of the package, service and puppi resources.
pub fn service() -> &'static str {
  SERVICE_TITLE
}

pub fn forward_server() -> String {
  format!("{SERVICE_TITLE}_add_forward_server")
}

pub fn deployment_server() -> String {
  format!("{SERVICE_TITLE}_deployment_server")
}

pub fn add_monitor() -> String {
  format!("{SERVICE_TITLE}_add_monitor")
}

pub fn admin_password() -> String {
  format!("{SERVICE_TITLE}_change_admin_password")
}

pub fn inputs_conf() -> String {
  format!("{SERVICE_TITLE}_inputs.conf")
}

pub fn outputs_conf() -> String {
  format!("{SERVICE_TITLE}_outputs.conf")
}

pub fn source_dir() -> String {
  format!("{SERVICE_TITLE}.dir")
}

pub fn firewall_rule(protocol: Protocol, port: u16) -> String {
  format!("{SERVICE_TITLE}_{protocol}_{port}")
}

pub fn monitor_process() -> String {
  format!("{SERVICE_TITLE}_process")
}
