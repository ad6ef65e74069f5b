use predicates::prelude::*;

use super::common::*;

fn resource<'a>(plan: &'a serde_json::Value, reference: &str) -> &'a serde_json::Value {
  let resource = &plan["catalog"]["resources"][reference];
  assert!(!resource.is_null(), "missing {reference}");
  &resource["attributes"]
}

#[test]
fn standard_installation() {
  let env = TestEnv::from_fixture("standard.yaml");
  let plan = plan_json(&env.params_path, &[]);

  assert_eq!(plan["verdict"]["state"], "installed");
  assert_eq!(resource(&plan, "package[splunk]")["ensure"], "latest");
  assert_eq!(resource(&plan, "service[splunk]")["ensure"], "running");
  assert_eq!(resource(&plan, "service[splunk]")["enable"], true);
  assert_eq!(resource(&plan, "file[splunk_deployment_server]")["ensure"], "absent");
  assert_eq!(plan["hash"].as_str().unwrap().len(), 20);
}

#[test]
fn integrations_fixture() {
  let env = TestEnv::from_fixture("integrations.yaml");
  let plan = plan_json(&env.params_path, &[]);

  assert_eq!(resource(&plan, "monitor_process[splunk_process]")["enable"], true);
  assert_eq!(resource(&plan, "monitor_process[splunk_process]")["tool"], "puppi");
  assert_eq!(resource(&plan, "firewall_rule[splunk_tcp_42]")["tool"], "iptables");
  assert_eq!(resource(&plan, "firewall_rule[splunk_tcp_42]")["destination"], "10.42.42.42");
  assert_eq!(resource(&plan, "puppize[splunk]")["ensure"], "present");

  let forward = resource(&plan, "file[splunk_add_forward_server]")["content"]
    .as_str()
    .unwrap();
  assert_eq!(forward.lines().count(), 2);
  assert!(!plan["catalog"]["resources"]["exec[splunk_add_forward_server]"].is_null());
}

#[test]
fn absent_fixture() {
  let env = TestEnv::from_fixture("absent.yaml");
  let plan = plan_json(&env.params_path, &[]);

  assert_eq!(plan["verdict"]["state"], "absent");
  assert_eq!(resource(&plan, "package[splunk]")["ensure"], "absent");
  assert_eq!(resource(&plan, "file[splunk_add_forward_server]")["ensure"], "absent");
  assert_eq!(resource(&plan, "firewall_rule[splunk_tcp_42]")["enable"], false);
  assert_eq!(resource(&plan, "puppize[splunk]")["ensure"], "absent");
}

#[test]
fn templates_next_to_params_are_used() {
  let env = TestEnv::from_fixture("templated.yaml").with_templates();
  let plan = plan_json(&env.params_path, &[]);

  let content = resource(&plan, "file[splunk_inputs.conf]")["content"].as_str().unwrap();
  assert!(content.contains("fqdn: rspec.example42.com"));
  assert!(content.contains("value_a"));
}

#[test]
fn explicit_template_dir() {
  let env = TestEnv::from_fixture("templated.yaml");
  let templates = fixture_path("templates");
  let plan = plan_json(&env.params_path, &["--templates", templates.to_str().unwrap()]);

  assert!(!resource(&plan, "file[splunk_inputs.conf]")["content"].is_null());
}

#[test]
fn missing_template_fails_with_its_id() {
  let env = TestEnv::from_fixture("templated.yaml");
  splunkctl()
    .arg("plan")
    .arg(&env.params_path)
    .args(["--fqdn", "rspec.example42.com"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Template directory not found"))
    .stderr(predicate::str::contains("splunk/spec.erb"));
}

#[test]
fn json_params_are_accepted() {
  let env = TestEnv::from_fixture("params.json");
  let plan = plan_json(&env.params_path, &[]);

  assert_eq!(resource(&plan, "file[splunk_deployment_server]")["ensure"], "present");
  assert_eq!(resource(&plan, "service[splunk]")["ensure"], "stopped");
}

#[test]
fn plan_hash_is_stable() {
  let env = TestEnv::from_fixture("integrations.yaml");
  let first = plan_json(&env.params_path, &[]);
  let second = plan_json(&env.params_path, &[]);
  assert_eq!(first["hash"], second["hash"]);
}

#[test]
fn text_output_lists_resources() {
  let env = TestEnv::from_fixture("integrations.yaml");
  splunkctl()
    .arg("plan")
    .arg(&env.params_path)
    .args(["--fqdn", "rspec.example42.com"])
    .env("NO_COLOR", "1")
    .assert()
    .success()
    .stdout(predicate::str::contains("Catalog for rspec.example42.com (installed)"))
    .stdout(predicate::str::contains("firewall_rule[splunk_tcp_42]"))
    .stdout(predicate::str::contains("monitor_process[splunk_process]"));
}
