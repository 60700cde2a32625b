// ABOUTME: Caller-owned records the controller reads from and populates.
// ABOUTME: ServerRecord mirrors a container's observed runtime state; UserRecord names its owner.

use crate::runtime::{ContainerInfo, ContainerState};
use crate::types::ContainerId;
use serde::Serialize;

/// Observable state of a server, derived from the last inspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerStatus {
    /// Never inspected, or created but not started.
    #[default]
    Pending,
    Running,
    /// Exited with code zero.
    Stopped,
    /// Exited with a nonzero code, or dead.
    Failed,
}

impl ServerStatus {
    fn from_inspect(info: &ContainerInfo) -> Self {
        match info.state {
            ContainerState::Running | ContainerState::Restarting | ContainerState::Paused => {
                ServerStatus::Running
            }
            ContainerState::Exited if info.exit_code == 0 => ServerStatus::Stopped,
            ContainerState::Exited | ContainerState::Dead => ServerStatus::Failed,
            ContainerState::Created | ContainerState::Removing => ServerStatus::Pending,
        }
    }
}

/// An application server as the persistence layer stores it.
///
/// `jvm_options` and `jvm_memory` are launch settings owned by the caller.
/// Everything else is overwritten from inspect results by the controller.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ServerRecord {
    pub jvm_options: String,
    pub jvm_memory: Option<u64>,
    pub container_id: Option<ContainerId>,
    pub container_name: Option<String>,
    pub ip_address: Option<String>,
    pub running: bool,
    pub exit_code: Option<i64>,
    pub status: ServerStatus,
}

impl ServerRecord {
    pub fn with_jvm_options(jvm_options: impl Into<String>) -> Self {
        Self {
            jvm_options: jvm_options.into(),
            ..Default::default()
        }
    }

    /// Bindings for the server configuration hooks (`MEMORY_VALUE`, `JVM_OPTIONS`).
    ///
    /// Memory is left unbound when unknown so the token stays visible in the command.
    pub fn config_bindings(&self) -> Vec<(&'static str, String)> {
        let mut bindings = Vec::with_capacity(2);
        if let Some(memory) = self.jvm_memory {
            bindings.push(("MEMORY_VALUE", memory.to_string()));
        }
        bindings.push(("JVM_OPTIONS", self.jvm_options.clone()));
        bindings
    }

    /// Overwrite the runtime fields from a fresh inspect.
    pub(crate) fn refresh_from(&mut self, info: &ContainerInfo) {
        self.container_id = Some(info.id.clone());
        self.container_name = Some(info.name.clone());
        self.ip_address = info.ip_address.clone();
        self.running = info.running;
        self.exit_code = Some(info.exit_code);
        self.status = ServerStatus::from_inspect(info);
    }
}

/// Owner of a server container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub login: String,
}

impl UserRecord {
    pub fn new(login: impl Into<String>) -> Self {
        Self {
            login: login.into(),
        }
    }
}
