// ABOUTME: Exec operations trait for container runtimes.
// ABOUTME: Create and start exec instances inside running containers.

use super::sealed::Sealed;
use super::shared_types::{ExecConfig, ExecResult};
use crate::types::ExecId;
use async_trait::async_trait;

/// Exec operations: run commands in containers.
#[async_trait]
pub trait ExecOps: Sealed + Send + Sync {
    /// Create an exec instance without starting it.
    async fn exec_create(&self, container: &str, config: &ExecConfig)
    -> Result<ExecId, ExecError>;

    /// Start a created exec instance and collect its output.
    async fn exec_start(&self, exec_id: &ExecId) -> Result<ExecResult, ExecError>;

    /// Create and run an exec instance, returning the result.
    async fn exec(&self, container: &str, config: &ExecConfig) -> Result<ExecResult, ExecError> {
        let exec_id = self.exec_create(container, config).await?;
        self.exec_start(&exec_id).await
    }
}

/// Errors from exec operations.
#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    #[error("container not found: {0}")]
    ContainerNotFound(String),

    #[error("container not running: {0}")]
    ContainerNotRunning(String),

    #[error("exec instance not found: {0}")]
    ExecNotFound(String),

    #[error("exec failed: {0}")]
    Failed(String),

    #[error("runtime error: {0}")]
    Runtime(String),
}
