// ABOUTME: Runtime type definitions for Docker and Podman.
// ABOUTME: Includes the RuntimeType enum, detected socket info, and the explicit override config.

use serde::{Deserialize, Serialize};

pub(crate) const DOCKER_SOCKET: &str = "/var/run/docker.sock";
pub(crate) const ROOTFUL_PODMAN_SOCKET: &str = "/run/podman/podman.sock";

/// The container runtime type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeType {
    Docker,
    Podman,
}

impl RuntimeType {
    /// Socket used when the runtime is forced but no socket is given.
    pub fn default_socket(&self) -> &'static str {
        match self {
            RuntimeType::Docker => DOCKER_SOCKET,
            RuntimeType::Podman => ROOTFUL_PODMAN_SOCKET,
        }
    }
}

impl std::fmt::Display for RuntimeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuntimeType::Docker => write!(f, "docker"),
            RuntimeType::Podman => write!(f, "podman"),
        }
    }
}

/// Which daemon to talk to and where its socket lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeInfo {
    pub runtime_type: RuntimeType,
    pub socket_path: String,
}

/// Explicit runtime override from configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuntimeConfig {
    /// Skip detection and use this runtime.
    #[serde(default)]
    pub runtime: Option<RuntimeType>,
    /// Socket path; defaults to the runtime's well-known socket.
    #[serde(default)]
    pub socket: Option<String>,
}
