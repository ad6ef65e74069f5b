//! Lifecycle resolution.
//!
//! The `absent`, `disable` and `disableboot` flags may be set in any
//! combination. They never conflict as far as the caller is concerned: the
//! first match in the order absent > disable > disableboot wins, and the
//! resulting [`LifecycleVerdict`] drives every `ensure`/`enable` attribute in
//! the catalog.
//!
//! | state            | package  | service ensure | enable | aux   | firewall |
//! |------------------|----------|----------------|--------|-------|----------|
//! | installed        | latest   | running        | true   | true  | true     |
//! | disabled-at-boot | latest   | (omitted)      | false  | false | true     |
//! | disabled         | latest   | stopped        | false  | false | false    |
//! | absent           | absent   | absent         | false  | false | false    |
//!
//! `latest` is replaced by the pinned version when `version` is set.

use std::fmt;

use serde::{Serialize, Serializer};
use tracing::{debug, warn};

use crate::config::Config;

/// The single active lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifecycle {
  Installed,
  DisabledAtBoot,
  Disabled,
  Absent,
}

impl Lifecycle {
  pub fn as_str(&self) -> &'static str {
    match self {
      Lifecycle::Installed => "installed",
      Lifecycle::DisabledAtBoot => "disabled_at_boot",
      Lifecycle::Disabled => "disabled",
      Lifecycle::Absent => "absent",
    }
  }
}

impl fmt::Display for Lifecycle {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Desired package state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageEnsure {
  Latest,
  /// A pinned package version.
  Version(String),
  Absent,
}

impl PackageEnsure {
  pub fn as_str(&self) -> &str {
    match self {
      PackageEnsure::Latest => "latest",
      PackageEnsure::Version(v) => v,
      PackageEnsure::Absent => "absent",
    }
  }
}

impl Serialize for PackageEnsure {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(self.as_str())
  }
}

/// Desired service run state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceEnsure {
  Running,
  Stopped,
  Absent,
}

impl ServiceEnsure {
  pub fn as_str(&self) -> &'static str {
    match self {
      ServiceEnsure::Running => "running",
      ServiceEnsure::Stopped => "stopped",
      ServiceEnsure::Absent => "absent",
    }
  }
}

/// The resolved lifecycle and every attribute derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LifecycleVerdict {
  pub state: Lifecycle,
  pub package_ensure: PackageEnsure,
  /// `None` under [`Lifecycle::DisabledAtBoot`]: the run state is left to
  /// whatever the host currently has, so the attribute is not managed.
  pub service_ensure: Option<ServiceEnsure>,
  pub service_enable: bool,
  /// Enable flag for monitoring integrations. Only true when installed.
  pub aux_enable: bool,
  /// Enable flag for firewall rules. Stays true under disabled-at-boot.
  pub firewall_enable: bool,
}

impl LifecycleVerdict {
  pub fn is_absent(&self) -> bool {
    self.state == Lifecycle::Absent
  }
}

/// Resolve the lifecycle verdict for a configuration.
pub fn resolve(config: &Config) -> LifecycleVerdict {
  let flags = [config.absent, config.disable, config.disableboot];
  if flags.iter().filter(|f| **f).count() > 1 {
    warn!(
      absent = config.absent,
      disable = config.disable,
      disableboot = config.disableboot,
      "conflicting lifecycle flags, applying precedence absent > disable > disableboot"
    );
  }

  let installed_package = match &config.version {
    Some(version) => PackageEnsure::Version(version.clone()),
    None => PackageEnsure::Latest,
  };

  let verdict = if config.absent {
    LifecycleVerdict {
      state: Lifecycle::Absent,
      package_ensure: PackageEnsure::Absent,
      service_ensure: Some(ServiceEnsure::Absent),
      service_enable: false,
      aux_enable: false,
      firewall_enable: false,
    }
  } else if config.disable {
    LifecycleVerdict {
      state: Lifecycle::Disabled,
      package_ensure: installed_package,
      service_ensure: Some(ServiceEnsure::Stopped),
      service_enable: false,
      aux_enable: false,
      firewall_enable: false,
    }
  } else if config.disableboot {
    LifecycleVerdict {
      state: Lifecycle::DisabledAtBoot,
      package_ensure: installed_package,
      service_ensure: None,
      service_enable: false,
      aux_enable: false,
      firewall_enable: true,
    }
  } else {
    LifecycleVerdict {
      state: Lifecycle::Installed,
      package_ensure: installed_package,
      service_ensure: Some(ServiceEnsure::Running),
      service_enable: true,
      aux_enable: true,
      firewall_enable: true,
    }
  };

  debug!(state = %verdict.state, "lifecycle resolved");
  verdict
}
