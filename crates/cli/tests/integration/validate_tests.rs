use predicates::prelude::*;

use super::common::*;

#[test]
fn validate_reports_lifecycle() {
  let env = TestEnv::from_fixture("absent.yaml");
  splunkctl()
    .arg("validate")
    .arg(&env.params_path)
    .env("NO_COLOR", "1")
    .assert()
    .success()
    .stdout(predicate::str::contains("Lifecycle: absent"));
}

#[test]
fn validate_json_hides_admin_password() {
  let env = TestEnv::from_fixture("integrations.yaml");
  env.write_file("params.yaml", &format!("{}admin_password: s3cret\n", fixture_content("integrations.yaml")));

  let output = splunkctl()
    .arg("validate")
    .arg(&env.params_path)
    .args(["--format", "json"])
    .output()
    .unwrap();
  assert!(output.status.success());

  let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(json["config"]["port"], 42);
  assert_eq!(json["verdict"]["firewall_enable"], true);
  assert!(!String::from_utf8_lossy(&output.stdout).contains("s3cret"));
}

#[test]
fn invalid_parameter_is_reported_with_key() {
  let env = TestEnv::from_fixture("invalid.yaml");
  splunkctl()
    .arg("validate")
    .arg(&env.params_path)
    .assert()
    .failure()
    .stderr(predicate::str::contains("invalid parameter 'port'"));
}

#[test]
fn conflicting_flags_warn_but_succeed() {
  let env = TestEnv::from_fixture("standard.yaml");
  env.write_file("params.yaml", "disable: true\ndisableboot: true\n");
  splunkctl()
    .arg("validate")
    .arg(&env.params_path)
    .env("NO_COLOR", "1")
    .assert()
    .success()
    .stdout(predicate::str::contains("Lifecycle: disabled"))
    .stderr(predicate::str::contains("conflicting lifecycle flags"));
}
