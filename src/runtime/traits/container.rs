// ABOUTME: Container operations trait for container runtimes.
// ABOUTME: Create, start, stop, kill, remove, inspect, and list containers.

use super::sealed::Sealed;
use super::shared_types::{ContainerConfig, ContainerInfo};
use crate::types::ContainerId;
use async_trait::async_trait;
use std::time::Duration;

/// Container lifecycle operations.
///
/// `container` arguments accept either a name or an id; the daemon resolves both.
#[async_trait]
pub trait ContainerOps: Sealed + Send + Sync {
    /// Create a container from the given configuration.
    async fn create_container(
        &self,
        config: &ContainerConfig,
    ) -> Result<ContainerId, ContainerError>;

    /// Start a created container.
    async fn start_container(&self, container: &str) -> Result<(), ContainerError>;

    /// Stop a running container, killing it once `timeout` elapses.
    async fn stop_container(&self, container: &str, timeout: Duration)
    -> Result<(), ContainerError>;

    /// Send SIGKILL to a running container.
    async fn kill_container(&self, container: &str) -> Result<(), ContainerError>;

    /// Remove a container.
    async fn remove_container(&self, container: &str, force: bool) -> Result<(), ContainerError>;

    /// Get detailed information about a container.
    async fn inspect_container(&self, container: &str) -> Result<ContainerInfo, ContainerError>;

    /// Ids of the containers matching the given filters.
    async fn list_containers(
        &self,
        filters: &ContainerFilters,
    ) -> Result<Vec<ContainerId>, ContainerError>;
}

/// Filters for listing containers.
#[derive(Debug, Clone, Default)]
pub struct ContainerFilters {
    /// Include stopped containers.
    pub all: bool,
}

impl ContainerFilters {
    /// Every container the daemon knows about, stopped ones included.
    pub fn everything() -> Self {
        Self { all: true }
    }
}

/// Errors from container operations.
#[derive(Debug, thiserror::Error)]
pub enum ContainerError {
    #[error("container not found: {0}")]
    NotFound(String),

    #[error("container already exists: {0}")]
    AlreadyExists(String),

    #[error("container not running: {0}")]
    NotRunning(String),

    #[error("container already running: {0}")]
    AlreadyRunning(String),

    #[error("image not found: {0}")]
    ImageNotFound(String),

    #[error("container is in use: {0}")]
    Conflict(String),

    #[error("runtime error: {0}")]
    Runtime(String),
}
