// ABOUTME: Bollard-based container runtime implementation.
// ABOUTME: Supports both Docker and Podman via the Docker-compatible API.

use crate::runtime::error::{ConnectError, PingSnafu, SocketSnafu};
use crate::runtime::traits::sealed::Sealed;
use crate::runtime::traits::{
    ArchiveError, ArchiveOps, ArchiveStream, ContainerConfig, ContainerError, ContainerFilters,
    ContainerInfo, ContainerOps, ContainerState, ExecConfig, ExecError, ExecInfo,
    ExecOps, ExecResult,
};
use crate::runtime::types::RuntimeInfo;
use crate::types::{ContainerId, ExecId};
use async_trait::async_trait;
use bollard::Docker;
use bollard::exec::{StartExecOptions, StartExecResults};
use bollard::models::{ContainerCreateBody, ContainerStateStatusEnum, HostConfig, Mount, MountTypeEnum};
use bollard::query_parameters::{
    CreateContainerOptions, DownloadFromContainerOptions, InspectContainerOptions,
    KillContainerOptions, ListContainersOptions, RemoveContainerOptions, StartContainerOptions,
    StopContainerOptions,
};
use futures::StreamExt;
use snafu::ResultExt;
use std::time::Duration;

/// Seconds the HTTP client waits on a single daemon request.
const REQUEST_TIMEOUT_SECS: u64 = 120;

// =============================================================================
// Error Mapping Helpers
// =============================================================================

fn status_of(e: &bollard::errors::Error) -> Option<(u16, &str)> {
    match e {
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } => Some((*status_code, message.as_str())),
        _ => None,
    }
}

fn map_container_create_error(e: bollard::errors::Error) -> ContainerError {
    match status_of(&e) {
        Some((404, message)) => ContainerError::ImageNotFound(message.to_string()),
        Some((409, message)) => ContainerError::AlreadyExists(message.to_string()),
        _ => ContainerError::Runtime(e.to_string()),
    }
}

fn map_container_start_error(e: bollard::errors::Error) -> ContainerError {
    match status_of(&e) {
        Some((404, message)) => ContainerError::NotFound(message.to_string()),
        Some((304, message)) => ContainerError::AlreadyRunning(message.to_string()),
        _ => ContainerError::Runtime(e.to_string()),
    }
}

fn map_container_stop_error(e: bollard::errors::Error) -> ContainerError {
    match status_of(&e) {
        Some((404, message)) => ContainerError::NotFound(message.to_string()),
        Some((304, message)) | Some((409, message)) => {
            ContainerError::NotRunning(message.to_string())
        }
        _ => ContainerError::Runtime(e.to_string()),
    }
}

fn map_container_remove_error(e: bollard::errors::Error) -> ContainerError {
    match status_of(&e) {
        Some((404, message)) => ContainerError::NotFound(message.to_string()),
        Some((409, message)) => ContainerError::Conflict(message.to_string()),
        _ => ContainerError::Runtime(e.to_string()),
    }
}

fn map_container_not_found_error(e: bollard::errors::Error) -> ContainerError {
    match status_of(&e) {
        Some((404, message)) => ContainerError::NotFound(message.to_string()),
        _ => ContainerError::Runtime(e.to_string()),
    }
}

fn map_exec_create_error(e: bollard::errors::Error) -> ExecError {
    match status_of(&e) {
        Some((404, message)) => ExecError::ContainerNotFound(message.to_string()),
        Some((409, message)) => ExecError::ContainerNotRunning(message.to_string()),
        _ => ExecError::Runtime(e.to_string()),
    }
}

fn map_exec_not_found_error(e: bollard::errors::Error) -> ExecError {
    match status_of(&e) {
        Some((404, message)) => ExecError::ExecNotFound(message.to_string()),
        _ => ExecError::Runtime(e.to_string()),
    }
}

fn map_archive_error(e: bollard::errors::Error) -> ArchiveError {
    match status_of(&e) {
        Some((404, message)) => ArchiveError::NotFound(message.to_string()),
        Some(_) => ArchiveError::Runtime(e.to_string()),
        None => ArchiveError::StreamError(e.to_string()),
    }
}

fn map_state(status: ContainerStateStatusEnum) -> ContainerState {
    match status {
        ContainerStateStatusEnum::CREATED => ContainerState::Created,
        ContainerStateStatusEnum::RUNNING => ContainerState::Running,
        ContainerStateStatusEnum::PAUSED => ContainerState::Paused,
        ContainerStateStatusEnum::RESTARTING => ContainerState::Restarting,
        ContainerStateStatusEnum::REMOVING => ContainerState::Removing,
        ContainerStateStatusEnum::DEAD => ContainerState::Dead,
        _ => ContainerState::Exited,
    }
}

// =============================================================================
// BollardRuntime
// =============================================================================

/// Container runtime implementation using bollard.
///
/// Docker and Podman are both reached through the Docker-compatible API on
/// a local Unix socket.
pub struct BollardRuntime {
    client: Docker,
}

impl BollardRuntime {
    /// Create a new BollardRuntime from a Docker client.
    pub fn new(client: Docker) -> Self {
        Self { client }
    }

    /// Connect to the daemon described by `info` and make sure it answers.
    pub async fn connect(info: &RuntimeInfo) -> Result<Self, ConnectError> {
        let client = Docker::connect_with_unix(
            &info.socket_path,
            REQUEST_TIMEOUT_SECS,
            bollard::API_DEFAULT_VERSION,
        )
        .context(SocketSnafu {
            socket: info.socket_path.as_str(),
        })?;

        client.ping().await.context(PingSnafu {
            socket: info.socket_path.as_str(),
        })?;

        tracing::debug!(runtime = %info.runtime_type, socket = %info.socket_path, "connected");
        Ok(Self::new(client))
    }

    async fn exec_inspect_internal(&self, exec_id: &ExecId) -> Result<ExecInfo, ExecError> {
        let details = self
            .client
            .inspect_exec(exec_id.as_str())
            .await
            .map_err(map_exec_not_found_error)?;

        Ok(ExecInfo {
            running: details.running.unwrap_or(false),
            exit_code: details.exit_code,
        })
    }
}

impl Sealed for BollardRuntime {}

#[async_trait]
impl ContainerOps for BollardRuntime {
    async fn create_container(
        &self,
        config: &ContainerConfig,
    ) -> Result<ContainerId, ContainerError> {
        let mounts: Vec<Mount> = config
            .volumes
            .iter()
            .map(|m| Mount {
                source: Some(m.source.clone()),
                target: Some(m.target.clone()),
                typ: Some(MountTypeEnum::BIND),
                read_only: Some(m.read_only),
                ..Default::default()
            })
            .collect();

        let host_config = HostConfig {
            mounts: if mounts.is_empty() { None } else { Some(mounts) },
            volumes_from: if config.volumes_from.is_empty() {
                None
            } else {
                Some(config.volumes_from.clone())
            },
            ..Default::default()
        };

        let body = ContainerCreateBody {
            image: Some(config.image.to_string()),
            labels: if config.labels.is_empty() {
                None
            } else {
                Some(config.labels.clone())
            },
            host_config: Some(host_config),
            ..Default::default()
        };

        let opts = CreateContainerOptions {
            name: Some(config.name.clone()),
            ..Default::default()
        };

        let response = self
            .client
            .create_container(Some(opts), body)
            .await
            .map_err(map_container_create_error)?;

        for warning in &response.warnings {
            tracing::warn!(container = %config.name, "daemon warning on create: {}", warning);
        }

        Ok(ContainerId::new(response.id))
    }

    async fn start_container(&self, container: &str) -> Result<(), ContainerError> {
        self.client
            .start_container(container, None::<StartContainerOptions>)
            .await
            .map_err(map_container_start_error)
    }

    async fn stop_container(
        &self,
        container: &str,
        timeout: Duration,
    ) -> Result<(), ContainerError> {
        let opts = StopContainerOptions {
            t: Some(timeout.as_secs() as i32),
            signal: None,
        };

        self.client
            .stop_container(container, Some(opts))
            .await
            .map_err(map_container_stop_error)
    }

    async fn kill_container(&self, container: &str) -> Result<(), ContainerError> {
        self.client
            .kill_container(container, None::<KillContainerOptions>)
            .await
            .map_err(map_container_stop_error)
    }

    async fn remove_container(&self, container: &str, force: bool) -> Result<(), ContainerError> {
        let opts = RemoveContainerOptions {
            force,
            ..Default::default()
        };

        self.client
            .remove_container(container, Some(opts))
            .await
            .map_err(map_container_remove_error)
    }

    async fn inspect_container(&self, container: &str) -> Result<ContainerInfo, ContainerError> {
        let details = self
            .client
            .inspect_container(container, None::<InspectContainerOptions>)
            .await
            .map_err(map_container_not_found_error)?;

        let state = details.state.as_ref();
        let status = state.and_then(|s| s.status);

        let ip_address = details
            .network_settings
            .as_ref()
            .and_then(|settings| settings.networks.as_ref())
            .and_then(|networks| {
                networks
                    .values()
                    .filter_map(|endpoint| endpoint.ip_address.clone())
                    .find(|ip| !ip.is_empty())
            });

        let config = details.config.unwrap_or_default();

        Ok(ContainerInfo {
            id: ContainerId::new(details.id.unwrap_or_else(|| container.to_string())),
            name: details
                .name
                .unwrap_or_default()
                .trim_start_matches('/')
                .to_string(),
            state: status.map(map_state).unwrap_or(ContainerState::Exited),
            status: status.map(|s| s.to_string()).unwrap_or_default(),
            running: state.and_then(|s| s.running).unwrap_or(false),
            exit_code: state.and_then(|s| s.exit_code).unwrap_or(0),
            env: config.env.unwrap_or_default(),
            ip_address,
        })
    }

    async fn list_containers(
        &self,
        filters: &ContainerFilters,
    ) -> Result<Vec<ContainerId>, ContainerError> {
        let opts = ListContainersOptions {
            all: filters.all,
            ..Default::default()
        };

        let containers = self
            .client
            .list_containers(Some(opts))
            .await
            .map_err(|e| ContainerError::Runtime(e.to_string()))?;

        Ok(containers
            .into_iter()
            .filter_map(|c| c.id)
            .map(ContainerId::new)
            .collect())
    }
}

#[async_trait]
impl ExecOps for BollardRuntime {
    async fn exec_create(
        &self,
        container: &str,
        config: &ExecConfig,
    ) -> Result<ExecId, ExecError> {
        let opts = bollard::models::ExecConfig {
            cmd: Some(config.cmd.clone()),
            user: config.user.clone(),
            attach_stdout: Some(config.attach_stdout),
            attach_stderr: Some(config.attach_stderr),
            ..Default::default()
        };

        let response = self
            .client
            .create_exec(container, opts)
            .await
            .map_err(map_exec_create_error)?;

        Ok(ExecId::new(response.id))
    }

    async fn exec_start(&self, exec_id: &ExecId) -> Result<ExecResult, ExecError> {
        let opts = StartExecOptions {
            detach: false,
            ..Default::default()
        };

        let started = self
            .client
            .start_exec(exec_id.as_str(), Some(opts))
            .await
            .map_err(map_exec_not_found_error)?;

        let mut output = Vec::new();
        if let StartExecResults::Attached { output: mut stream, .. } = started {
            while let Some(item) = stream.next().await {
                match item {
                    Ok(bollard::container::LogOutput::StdOut { message })
                    | Ok(bollard::container::LogOutput::StdErr { message })
                    | Ok(bollard::container::LogOutput::Console { message }) => {
                        output.extend_from_slice(&message);
                    }
                    Ok(bollard::container::LogOutput::StdIn { .. }) => {}
                    Err(e) => return Err(ExecError::Failed(e.to_string())),
                }
            }
        }

        let info = self.exec_inspect_internal(exec_id).await?;
        if info.running {
            tracing::debug!(exec = %exec_id.short(), "output closed before exec finished");
        }

        Ok(ExecResult {
            exit_code: info.exit_code,
            output,
        })
    }
}

#[async_trait]
impl ArchiveOps for BollardRuntime {
    async fn download_archive(
        &self,
        container: &str,
        path: &str,
    ) -> Result<ArchiveStream, ArchiveError> {
        let opts = DownloadFromContainerOptions {
            path: path.to_string(),
        };

        let stream = self
            .client
            .download_from_container(container, Some(opts))
            .map(|chunk| chunk.map_err(map_archive_error));

        Ok(Box::pin(stream))
    }
}
