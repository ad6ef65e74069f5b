use splunk_lib::eval::EvalError;
use splunk_lib::resource::AttrValue;
use splunk_lib::resource::ResourceKind::{FirewallRule, MonitorProcess, Puppize};

use super::common::*;

#[test]
fn puppi_integration() {
  let evaluation = evaluate_yaml("puppi: true\npuppi_helper: myhelper\n");
  assert_eq!(str_attr(&evaluation, Puppize, "splunk", "helper"), Some("myhelper"));
  assert_eq!(str_attr(&evaluation, Puppize, "splunk", "ensure"), Some("present"));
}

#[test]
fn monitoring_tools_integration() {
  let evaluation = evaluate_yaml("monitor: true\nmonitor_tool: puppi\n");
  assert_eq!(str_attr(&evaluation, MonitorProcess, "splunk_process", "tool"), Some("puppi"));
}

#[test]
fn several_monitoring_tools_stay_a_list() {
  let evaluation = evaluate_yaml("monitor: true\nmonitor_tool: [nagios, munin]\n");
  let tool = resource(&evaluation, MonitorProcess, "splunk_process").get("tool");
  assert_eq!(
    tool,
    Some(&AttrValue::Array(vec!["nagios".into(), "munin".into()]))
  );
}

#[test]
fn firewall_tools_integration() {
  let evaluation = evaluate_yaml("firewall: true\nfirewall_tool: iptables\nprotocol: tcp\nport: '42'\n");
  assert_eq!(str_attr(&evaluation, FirewallRule, "splunk_tcp_42", "tool"), Some("iptables"));
}

#[test]
fn udp_changes_the_rule_name() {
  let evaluation = evaluate_yaml("firewall: true\nprotocol: UDP\nport: 514\n");
  assert!(evaluation.catalog.get(FirewallRule, "splunk_udp_514").is_some());
  assert!(evaluation.catalog.get(FirewallRule, "splunk_tcp_514").is_none());
}

#[test]
fn oldgen_module_set_integration() {
  let yaml = "monitor: 'yes'\nmonitor_tool: puppi\nfirewall: 'yes'\nfirewall_tool: iptables\npuppi: 'yes'\nport: '42'\n";
  let evaluation = evaluate_yaml(yaml);

  assert_eq!(str_attr(&evaluation, MonitorProcess, "splunk_process", "tool"), Some("puppi"));
  assert_eq!(str_attr(&evaluation, FirewallRule, "splunk_tcp_42", "tool"), Some("iptables"));
  assert_eq!(str_attr(&evaluation, Puppize, "splunk", "ensure"), Some("present"));
}

#[test]
fn bare_yes_is_accepted() {
  // YAML 1.2 keeps an unquoted yes as a string.
  let evaluation = evaluate_yaml("monitor: yes\n");
  assert!(evaluation.catalog.get(MonitorProcess, "splunk_process").is_some());
}

#[test]
fn invalid_boolean_names_the_key() {
  let err = try_evaluate("firewall: maybe\n").unwrap_err();
  assert!(matches!(err, EvalError::Config(_)));
  assert!(err.to_string().contains("firewall"));
}
