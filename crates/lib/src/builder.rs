//! Core resource construction.
//!
//! Produces the package, the service and every file (plus the execs that
//! feed splunk CLI scripts) for a normalized [`Config`] and its
//! [`LifecycleVerdict`].
//!
//! The CLI scripts (`splunk_add_forward_server`, `splunk_add_monitor`,
//! `splunk_change_admin_password`) and the deployment client file are always
//! part of the catalog: present with content when their option is set,
//! `ensure: absent` otherwise. Under [`Lifecycle::Absent`](crate::lifecycle::Lifecycle::Absent)
//! every file is absent regardless of options, no template is rendered and no
//! exec is emitted.

use tracing::debug;

use crate::config::Config;
use crate::consts::DEFAULT_AUTH;
use crate::facts::HostFacts;
use crate::lifecycle::LifecycleVerdict;
use crate::resource::{ManagedResource, ResourceKind, names, reference};
use crate::template::{TemplateContext, TemplateError, TemplateRenderer};

/// Build the core resources.
///
/// # Errors
///
/// Fails with a [`TemplateError`] when `template_inputs` or
/// `template_outputs` cannot be rendered.
pub fn build(
  config: &Config,
  verdict: &LifecycleVerdict,
  facts: &HostFacts,
  renderer: &TemplateRenderer<'_>,
) -> Result<Vec<ManagedResource>, TemplateError> {
  let mut resources = vec![package(config, verdict), service(config, verdict)];

  resources.extend(script(
    config,
    verdict,
    &names::forward_server(),
    forward_server_lines(&config.forward_server),
  ));
  resources.extend(script(
    config,
    verdict,
    &names::add_monitor(),
    monitor_lines(&config.monitor_path),
  ));
  let password_lines: Vec<String> = config.admin_password.as_deref().map(admin_password_line).into_iter().collect();
  resources.extend(script(config, verdict, &names::admin_password(), password_lines));

  resources.push(deployment_client(config, verdict));

  let ctx = TemplateContext::new(facts, config);
  if let Some(id) = &config.template_inputs {
    let owner = config.config_file_owner.as_str();
    let inputs = rendered_conf(config, verdict, renderer, &ctx, &names::inputs_conf(), "inputs.conf", id, owner)?;
    resources.push(inputs);
  }
  if let Some(id) = &config.template_outputs {
    // A custom class takes ownership of outputs.conf.
    let owner = config.my_class.as_deref().unwrap_or(&config.config_file_owner);
    let outputs = rendered_conf(config, verdict, renderer, &ctx, &names::outputs_conf(), "outputs.conf", id, owner)?;
    resources.push(outputs);
  }

  if let Some(source) = &config.source_dir {
    resources.push(source_dir(config, verdict, source));
  }

  debug!(count = resources.len(), state = %verdict.state, "built core resources");
  Ok(resources)
}

fn package_ref() -> String {
  reference(ResourceKind::Package, names::service())
}

fn service_ref() -> String {
  reference(ResourceKind::Service, names::service())
}

fn package(config: &Config, verdict: &LifecycleVerdict) -> ManagedResource {
  ManagedResource::new(ResourceKind::Package, names::service())
    .attr("ensure", verdict.package_ensure.as_str())
    .attr("name", &config.package)
}

fn service(config: &Config, verdict: &LifecycleVerdict) -> ManagedResource {
  let resource = ManagedResource::new(ResourceKind::Service, names::service())
    .attr_opt("ensure", verdict.service_ensure.map(|e| e.as_str()))
    .attr("enable", verdict.service_enable)
    .attr("name", &config.service)
    .attr("hasstatus", true)
    .attr("hasrestart", true);

  if verdict.is_absent() {
    resource
  } else {
    resource.attr("require", package_ref())
  }
}

/// Command lines registering each forward server, in input order.
pub fn forward_server_lines(servers: &[String]) -> Vec<String> {
  servers
    .iter()
    .map(|server| {
      format!("splunk add forward-server {server} --accept-license --answer-yes --auto-ports --no-prompt -auth {DEFAULT_AUTH}")
    })
    .collect()
}

/// Command lines adding each monitored path, in input order.
pub fn monitor_lines(paths: &[String]) -> Vec<String> {
  paths
    .iter()
    .map(|path| format!("splunk add monitor {path} --accept-license --answer-yes --no-prompt -auth {DEFAULT_AUTH}"))
    .collect()
}

pub fn admin_password_line(password: &str) -> String {
  format!("splunk edit user admin -password {password} -role admin -auth {DEFAULT_AUTH}")
}

fn script_path(config: &Config, name: &str) -> String {
  format!("{}/etc/{}", config.base_dir.trim_end_matches('/'), name)
}

/// A CLI script file and the exec that runs it when its content changes.
fn script(config: &Config, verdict: &LifecycleVerdict, name: &str, lines: Vec<String>) -> Vec<ManagedResource> {
  let path = script_path(config, name);
  let file = ManagedResource::new(ResourceKind::File, name).attr("path", path.as_str());

  if verdict.is_absent() || lines.is_empty() {
    return vec![file.attr("ensure", "absent")];
  }

  let mut content = lines.join("\n");
  content.push('\n');

  // Scripts carry the admin credentials, keep them private.
  let file = file
    .attr("ensure", "present")
    .attr("content", content)
    .attr("owner", "root")
    .attr("group", "root")
    .attr("mode", "0700")
    .attr("require", package_ref());

  let bin_dir = format!("{}/bin", config.base_dir.trim_end_matches('/'));
  let exec = ManagedResource::new(ResourceKind::Exec, name)
    .attr("command", format!("sh {}", path))
    .attr("cwd", bin_dir.as_str())
    .attr("path", format!("{}:/usr/bin:/bin", bin_dir))
    .attr("refreshonly", true)
    .attr("subscribe", reference(ResourceKind::File, name))
    .attr("require", service_ref());

  vec![file, exec]
}

fn deployment_client(config: &Config, verdict: &LifecycleVerdict) -> ManagedResource {
  let path = format!("{}/deploymentclient.conf", config.config_dir);
  let file = ManagedResource::new(ResourceKind::File, names::deployment_server()).attr("path", path);

  match &config.deployment_server {
    Some(server) if !verdict.is_absent() => conf_attrs(
      file
        .attr("ensure", "present")
        .attr("content", deployment_client_content(server)),
      config,
      &config.config_file_owner,
    ),
    _ => file.attr("ensure", "absent"),
  }
}

pub fn deployment_client_content(server: &str) -> String {
  format!("[deployment-client]\n\n[target-broker:deploymentServer]\ntargetUri = {server}\n")
}

/// Ownership, mode and restart wiring shared by managed `.conf` files.
fn conf_attrs(file: ManagedResource, config: &Config, owner: &str) -> ManagedResource {
  let file = file
    .attr("owner", owner)
    .attr("group", &config.config_file_group)
    .attr("mode", &config.config_file_mode)
    .attr("require", package_ref());

  if config.service_autorestart {
    file.attr("notify", service_ref())
  } else {
    file
  }
}

#[allow(clippy::too_many_arguments)]
fn rendered_conf(
  config: &Config,
  verdict: &LifecycleVerdict,
  renderer: &TemplateRenderer<'_>,
  ctx: &TemplateContext<'_>,
  name: &str,
  file_name: &str,
  template_id: &str,
  owner: &str,
) -> Result<ManagedResource, TemplateError> {
  let path = format!("{}/{}", config.config_dir, file_name);
  let file = ManagedResource::new(ResourceKind::File, name).attr("path", path);

  if verdict.is_absent() {
    return Ok(file.attr("ensure", "absent"));
  }

  let content = renderer.render(template_id, ctx)?;
  Ok(conf_attrs(
    file.attr("ensure", "present").attr("content", content),
    config,
    owner,
  ))
}

fn source_dir(config: &Config, verdict: &LifecycleVerdict, source: &str) -> ManagedResource {
  let dir = ManagedResource::new(ResourceKind::File, names::source_dir()).attr("path", config.config_dir.as_str());

  if verdict.is_absent() {
    return dir.attr("ensure", "absent").attr("force", true);
  }

  let dir = dir
    .attr("ensure", "directory")
    .attr("source", source)
    .attr("recurse", true)
    .attr("purge", config.source_dir_purge)
    .attr("force", config.source_dir_purge)
    .attr("require", package_ref());

  if config.service_autorestart {
    dir.attr("notify", service_ref())
  } else {
    dir
  }
}
