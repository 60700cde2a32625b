// ABOUTME: Shared types used across runtime trait definitions.
// ABOUTME: ContainerConfig, ContainerInfo, ExecConfig, ExecResult, etc.

use crate::types::{ContainerId, ImageRef};
use std::collections::HashMap;

/// Configuration for creating a container.
#[derive(Debug, Clone)]
pub struct ContainerConfig {
    /// Name for the container.
    pub name: String,
    /// Image to run.
    pub image: ImageRef,
    /// Labels to apply.
    pub labels: HashMap<String, String>,
    /// Bind mounts.
    pub volumes: Vec<VolumeMount>,
    /// Containers whose volumes are mounted into this one.
    pub volumes_from: Vec<String>,
}

/// Volume mount configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeMount {
    /// Host path or volume name.
    pub source: String,
    /// Target path in container.
    pub target: String,
    pub read_only: bool,
}

/// Information about a container, as returned by inspect.
#[derive(Debug, Clone)]
pub struct ContainerInfo {
    pub id: ContainerId,
    /// Name without the leading `/`.
    pub name: String,
    pub state: ContainerState,
    /// Status string as the daemon reports it (`running`, `exited`, ...).
    pub status: String,
    pub running: bool,
    pub exit_code: i64,
    /// Declared environment, `KEY=value` entries.
    pub env: Vec<String>,
    /// First non-empty IP address across attached networks.
    pub ip_address: Option<String>,
}

/// Container state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerState {
    Created,
    Running,
    Paused,
    Restarting,
    Removing,
    Exited,
    Dead,
}

/// Exec configuration for running commands in containers.
#[derive(Debug, Clone)]
pub struct ExecConfig {
    /// Command and arguments to run.
    pub cmd: Vec<String>,
    /// User to run as; the image default when `None`.
    pub user: Option<String>,
    pub attach_stdout: bool,
    pub attach_stderr: bool,
}

impl Default for ExecConfig {
    fn default() -> Self {
        Self {
            cmd: Vec::new(),
            user: None,
            attach_stdout: true,
            attach_stderr: true,
        }
    }
}

/// Result of an exec operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecResult {
    /// Exit code, when the daemon reported one.
    pub exit_code: Option<i64>,
    /// Stdout and stderr interleaved in arrival order.
    pub output: Vec<u8>,
}

impl ExecResult {
    /// Output decoded lossily as UTF-8.
    pub fn output_text(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }
}

/// Exec instance information.
#[derive(Debug, Clone)]
pub struct ExecInfo {
    pub running: bool,
    pub exit_code: Option<i64>,
}
