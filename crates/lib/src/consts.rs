//! Crate-wide constants.

/// Title shared by the package, service and puppi resources.
pub const SERVICE_TITLE: &str = "splunk";

/// Length of the truncated catalog hash.
pub const OBJ_HASH_PREFIX_LEN: usize = 20;

/// Credentials the splunk CLI is driven with before an admin password is set.
pub const DEFAULT_AUTH: &str = "admin:changeme";

pub const DEFAULT_PORT: u16 = 8089;
pub const DEFAULT_BASE_DIR: &str = "/opt/splunk";
pub const DEFAULT_PROCESS: &str = "splunkd";
pub const DEFAULT_FILE_OWNER: &str = "root";
pub const DEFAULT_FILE_MODE: &str = "0644";
pub const DEFAULT_FIREWALL_SRC: &str = "0.0.0.0/0";
pub const DEFAULT_PUPPI_HELPER: &str = "standard";
