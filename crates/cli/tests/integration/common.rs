//! Shared test helpers for CLI integration tests.

use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Get path to a fixture file.
pub fn fixture_path(name: &str) -> PathBuf {
  PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    .join("tests")
    .join("fixtures")
    .join(name)
}

/// Read fixture content.
pub fn fixture_content(name: &str) -> String {
  std::fs::read_to_string(fixture_path(name)).unwrap_or_else(|e| panic!("Failed to load fixture {}: {}", name, e))
}

pub fn splunkctl() -> Command {
  cargo_bin_cmd!("splunkctl")
}

/// Run `plan --format json` for the test host and parse stdout.
pub fn plan_json(params: &std::path::Path, extra: &[&str]) -> serde_json::Value {
  let output = splunkctl()
    .arg("plan")
    .arg(params)
    .args(["--fqdn", "rspec.example42.com", "--ipaddress", "10.42.42.42", "--format", "json"])
    .args(extra)
    .output()
    .unwrap();
  assert!(
    output.status.success(),
    "plan failed: {}",
    String::from_utf8_lossy(&output.stderr)
  );
  serde_json::from_slice(&output.stdout).unwrap()
}

/// Isolated test environment.
///
/// Each test gets its own temporary directory holding a parameter file and,
/// optionally, a template tree.
pub struct TestEnv {
  pub temp: TempDir,
  pub params_path: PathBuf,
}

impl TestEnv {
  /// Create from a fixture file, copied to `params.yaml` (or `params.json`).
  pub fn from_fixture(name: &str) -> Self {
    let temp = TempDir::new().unwrap();
    let file_name = if name.ends_with(".json") { "params.json" } else { "params.yaml" };
    let params_path = temp.path().join(file_name);
    std::fs::write(&params_path, fixture_content(name)).unwrap();
    Self { temp, params_path }
  }

  /// Write a file relative to the temp directory.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }

  /// Copy the fixture template tree to `templates/` next to the parameter file.
  pub fn with_templates(self) -> Self {
    self.write_file("templates/splunk/spec.erb", &fixture_content("templates/splunk/spec.erb"));
    self
  }
}
