//! Entity records: long-running services, one-shot tasks and timers.
//!
//! Entities never hold a pointer to their project. Everything that needs
//! project context (slugs, launcher lookup) takes `&Project` instead, so the
//! types serialize without cycles and need no fix-up after load.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Environment variables, iterated in key order.
pub type Environment = BTreeMap<String, String>;

pub const DEFAULT_RESTART: &str = "always";
pub const DEFAULT_RESTART_SEC: u32 = 5;

fn default_restart() -> String {
    DEFAULT_RESTART.to_owned()
}

fn default_restart_sec() -> u32 {
    DEFAULT_RESTART_SEC
}

/// Something stored in a name-keyed project collection.
pub trait Named {
    fn name(&self) -> &str;
}

/// A long-running process, restarted by the service manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    /// Executable path or a command name looked up on `PATH` at render time.
    pub exec_start: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    /// systemd `Restart=` policy token, passed through verbatim.
    #[serde(default = "default_restart")]
    pub restart: String,
    #[serde(default = "default_restart_sec")]
    pub restart_sec: u32,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub environment: Environment,
}

impl Service {
    /// A service with the default restart policy and no args or environment.
    pub fn new(name: impl Into<String>, exec_start: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            exec_start: exec_start.into(),
            args: Vec::new(),
            restart: default_restart(),
            restart_sec: DEFAULT_RESTART_SEC,
            environment: Environment::new(),
        }
    }
}

impl Named for Service {
    fn name(&self) -> &str {
        &self.name
    }
}

/// A task that runs once to completion, started manually or by a [`Timer`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneShot {
    pub name: String,
    pub exec_start: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub environment: Environment,
}

impl OneShot {
    pub fn new(name: impl Into<String>, exec_start: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            exec_start: exec_start.into(),
            args: Vec::new(),
            environment: Environment::new(),
        }
    }
}

impl Named for OneShot {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Re-triggers a [`OneShot`] after it has been inactive for `interval`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    pub name: String,
    /// Name of the launched one-shot.
    #[serde(rename = "launch")]
    pub launcher: String,
    /// systemd time span (`30s`, `1h 30m`, `1d`), not validated here.
    pub interval: String,
}

impl Timer {
    /// Name used when the caller does not choose one: `<launcher>-timer-<interval>`.
    pub fn default_name(launcher: &str, interval: &str) -> String {
        format!("{launcher}-timer-{interval}")
    }
}

impl Named for Timer {
    fn name(&self) -> &str {
        &self.name
    }
}
