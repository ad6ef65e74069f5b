use splunk_lib::lifecycle::Lifecycle;
use splunk_lib::resource::ResourceKind::{Exec, File, FirewallRule, MonitorProcess, Package, Service};

use super::common::*;

const INTEGRATIONS: &str = "monitor: true\nfirewall: true\nport: '42'\n";

#[test]
fn standard_installation() {
  let evaluation = evaluate_yaml("{}");

  assert_eq!(str_attr(&evaluation, Package, "splunk", "ensure"), Some("latest"));
  assert_eq!(str_attr(&evaluation, Service, "splunk", "ensure"), Some("running"));
  assert_eq!(bool_attr(&evaluation, Service, "splunk", "enable"), Some(true));
  assert_eq!(str_attr(&evaluation, Service, "splunk", "require"), Some("package[splunk]"));
}

#[test]
fn installation_with_monitoring_and_firewalling() {
  let evaluation = evaluate_yaml(INTEGRATIONS);

  assert_eq!(str_attr(&evaluation, Service, "splunk", "ensure"), Some("running"));
  assert_eq!(bool_attr(&evaluation, MonitorProcess, "splunk_process", "enable"), Some(true));
  assert_eq!(bool_attr(&evaluation, FirewallRule, "splunk_tcp_42", "enable"), Some(true));
  assert_eq!(
    str_attr(&evaluation, FirewallRule, "splunk_tcp_42", "destination"),
    Some("10.42.42.42")
  );
}

#[test]
fn decommissioning_absent() {
  let yaml = format!(
    "{INTEGRATIONS}absent: true\nforward_server: 127.0.0.1\ndeployment_server: 127.0.0.1\nmonitor_path: /dir/file\n"
  );
  let evaluation = evaluate_yaml(&yaml);

  assert_eq!(evaluation.verdict.state, Lifecycle::Absent);
  assert_eq!(str_attr(&evaluation, Package, "splunk", "ensure"), Some("absent"));
  assert_eq!(str_attr(&evaluation, Service, "splunk", "ensure"), Some("absent"));
  assert_eq!(bool_attr(&evaluation, Service, "splunk", "enable"), Some(false));

  for name in [
    "splunk_add_forward_server",
    "splunk_deployment_server",
    "splunk_add_monitor",
    "splunk_change_admin_password",
  ] {
    assert_eq!(str_attr(&evaluation, File, name, "ensure"), Some("absent"), "{name}");
  }
  assert!(evaluation.catalog.iter().all(|r| r.kind != Exec));

  assert_eq!(bool_attr(&evaluation, MonitorProcess, "splunk_process", "enable"), Some(false));
  assert_eq!(bool_attr(&evaluation, FirewallRule, "splunk_tcp_42", "enable"), Some(false));
}

#[test]
fn decommissioning_disable() {
  let evaluation = evaluate_yaml(&format!("{INTEGRATIONS}disable: true\n"));

  assert_eq!(str_attr(&evaluation, Package, "splunk", "ensure"), Some("latest"));
  assert_eq!(str_attr(&evaluation, Service, "splunk", "ensure"), Some("stopped"));
  assert_eq!(bool_attr(&evaluation, Service, "splunk", "enable"), Some(false));
  assert_eq!(bool_attr(&evaluation, MonitorProcess, "splunk_process", "enable"), Some(false));
  assert_eq!(bool_attr(&evaluation, FirewallRule, "splunk_tcp_42", "enable"), Some(false));
}

#[test]
fn decommissioning_disableboot() {
  let evaluation = evaluate_yaml(&format!("{INTEGRATIONS}disableboot: true\n"));

  assert_eq!(str_attr(&evaluation, Package, "splunk", "ensure"), Some("latest"));
  let service = resource(&evaluation, Service, "splunk");
  assert!(service.get("ensure").is_none());
  assert_eq!(service.get_bool("enable"), Some(false));
  assert_eq!(bool_attr(&evaluation, MonitorProcess, "splunk_process", "enable"), Some(false));
  assert_eq!(bool_attr(&evaluation, FirewallRule, "splunk_tcp_42", "enable"), Some(true));
}

#[test]
fn all_flags_resolve_to_absent() {
  let evaluation = evaluate_yaml("absent: 'yes'\ndisable: 'yes'\ndisableboot: 'yes'\n");
  assert_eq!(evaluation.verdict.state, Lifecycle::Absent);
  assert_eq!(str_attr(&evaluation, Package, "splunk", "ensure"), Some("absent"));
}

#[test]
fn pinned_version() {
  let evaluation = evaluate_yaml("version: '9.1.2'\n");
  assert_eq!(str_attr(&evaluation, Package, "splunk", "ensure"), Some("9.1.2"));

  let evaluation = evaluate_yaml("version: '9.10'
");
  assert_eq!(str_attr(&evaluation, Package, "splunk", "ensure"), Some("9.10"));
}

#[test]
fn unquoted_version_is_rejected() {
  for yaml in ["version: 9.10
", "version: 7.0
"] {
    let err = try_evaluate(yaml).unwrap_err();
    assert!(err.to_string().contains("invalid parameter 'version'"), "{yaml}: {err}");
  }
}
