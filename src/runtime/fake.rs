// ABOUTME: Scripted in-memory runtime for unit tests.
// ABOUTME: Records every call in order and returns canned inspect, exec, and archive responses.

use crate::runtime::traits::sealed::Sealed;
use crate::runtime::traits::{
    ArchiveError, ArchiveOps, ArchiveStream, ContainerConfig, ContainerError, ContainerFilters,
    ContainerInfo, ContainerOps, ContainerState, ExecConfig, ExecError, ExecOps,
    ExecResult,
};
use crate::types::{ContainerId, ExecId};
use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;
use std::collections::{HashSet, VecDeque};
use std::time::Duration;

/// A daemon call as the fake saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Create(String),
    Start(String),
    Stop(String),
    Kill(String),
    Remove(String),
    Inspect(String),
    List,
    ExecCreate {
        container: String,
        cmd: Vec<String>,
        user: Option<String>,
    },
    ExecStart(String),
    Download {
        container: String,
        path: String,
    },
}

/// Operations that can be told to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum FailPoint {
    Create,
    Start,
    Stop,
    Kill,
    Remove,
    Inspect,
    List,
    ExecCreate,
    Download,
}

#[derive(Default)]
pub(crate) struct FakeRuntime {
    calls: Mutex<Vec<Call>>,
    created: Mutex<Vec<ContainerConfig>>,
    failing: Mutex<HashSet<FailPoint>>,
    info: Mutex<Option<ContainerInfo>>,
    exec_results: Mutex<VecDeque<Result<ExecResult, ExecError>>>,
    archive: Mutex<Option<Vec<u8>>>,
}

impl FakeRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    /// What inspect returns. Without one, inspect reports not found.
    pub fn with_info(self, info: ContainerInfo) -> Self {
        *self.info.lock() = Some(info);
        self
    }

    pub fn failing(self, point: FailPoint) -> Self {
        self.failing.lock().insert(point);
        self
    }

    /// Queue the result of the next exec start.
    pub fn with_exec(self, result: Result<ExecResult, ExecError>) -> Self {
        self.exec_results.lock().push_back(result);
        self
    }

    /// Queue an exec start that prints `output`.
    pub fn with_exec_output(self, output: &str) -> Self {
        self.with_exec(Ok(ExecResult {
            exit_code: Some(0),
            output: output.as_bytes().to_vec(),
        }))
    }

    pub fn with_archive(self, archive: Vec<u8>) -> Self {
        *self.archive.lock() = Some(archive);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn created(&self) -> Vec<ContainerConfig> {
        self.created.lock().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().push(call);
    }

    fn fails(&self, point: FailPoint) -> bool {
        self.failing.lock().contains(&point)
    }
}

/// A container in the given state, for `with_info`.
pub(crate) fn container_info(name: &str, status: &str, exit_code: i64) -> ContainerInfo {
    let state = match status.to_ascii_lowercase().as_str() {
        "running" => ContainerState::Running,
        "created" => ContainerState::Created,
        _ => ContainerState::Exited,
    };
    ContainerInfo {
        id: ContainerId::new(format!("{}-id", name)),
        name: name.to_string(),
        state,
        status: status.to_string(),
        running: state == ContainerState::Running,
        exit_code,
        env: Vec::new(),
        ip_address: None,
    }
}

impl Sealed for FakeRuntime {}

#[async_trait]
impl ContainerOps for FakeRuntime {
    async fn create_container(
        &self,
        config: &ContainerConfig,
    ) -> Result<ContainerId, ContainerError> {
        self.record(Call::Create(config.name.clone()));
        if self.fails(FailPoint::Create) {
            return Err(ContainerError::AlreadyExists(config.name.clone()));
        }
        self.created.lock().push(config.clone());
        Ok(ContainerId::new(format!("{}-id", config.name)))
    }

    async fn start_container(&self, container: &str) -> Result<(), ContainerError> {
        self.record(Call::Start(container.to_string()));
        if self.fails(FailPoint::Start) {
            return Err(ContainerError::NotFound(container.to_string()));
        }
        Ok(())
    }

    async fn stop_container(
        &self,
        container: &str,
        _timeout: Duration,
    ) -> Result<(), ContainerError> {
        self.record(Call::Stop(container.to_string()));
        if self.fails(FailPoint::Stop) {
            return Err(ContainerError::NotRunning(container.to_string()));
        }
        Ok(())
    }

    async fn kill_container(&self, container: &str) -> Result<(), ContainerError> {
        self.record(Call::Kill(container.to_string()));
        if self.fails(FailPoint::Kill) {
            return Err(ContainerError::NotRunning(container.to_string()));
        }
        Ok(())
    }

    async fn remove_container(&self, container: &str, _force: bool) -> Result<(), ContainerError> {
        self.record(Call::Remove(container.to_string()));
        if self.fails(FailPoint::Remove) {
            return Err(ContainerError::Conflict(container.to_string()));
        }
        Ok(())
    }

    async fn inspect_container(&self, container: &str) -> Result<ContainerInfo, ContainerError> {
        self.record(Call::Inspect(container.to_string()));
        if self.fails(FailPoint::Inspect) {
            return Err(ContainerError::Runtime("daemon went away".to_string()));
        }
        self.info
            .lock()
            .clone()
            .ok_or_else(|| ContainerError::NotFound(container.to_string()))
    }

    async fn list_containers(
        &self,
        _filters: &ContainerFilters,
    ) -> Result<Vec<ContainerId>, ContainerError> {
        self.record(Call::List);
        if self.fails(FailPoint::List) {
            return Err(ContainerError::Runtime("connection refused".to_string()));
        }
        Ok(self
            .info
            .lock()
            .iter()
            .map(|info| info.id.clone())
            .collect())
    }
}

#[async_trait]
impl ExecOps for FakeRuntime {
    async fn exec_create(
        &self,
        container: &str,
        config: &ExecConfig,
    ) -> Result<ExecId, ExecError> {
        self.record(Call::ExecCreate {
            container: container.to_string(),
            cmd: config.cmd.clone(),
            user: config.user.clone(),
        });
        if self.fails(FailPoint::ExecCreate) {
            return Err(ExecError::ContainerNotRunning(container.to_string()));
        }
        Ok(ExecId::new(format!("exec-{}", self.calls.lock().len())))
    }

    async fn exec_start(&self, exec_id: &ExecId) -> Result<ExecResult, ExecError> {
        self.record(Call::ExecStart(exec_id.to_string()));
        self.exec_results
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(ExecResult::default()))
    }
}

#[async_trait]
impl ArchiveOps for FakeRuntime {
    async fn download_archive(
        &self,
        container: &str,
        path: &str,
    ) -> Result<ArchiveStream, ArchiveError> {
        self.record(Call::Download {
            container: container.to_string(),
            path: path.to_string(),
        });
        if self.fails(FailPoint::Download) {
            return Err(ArchiveError::NotFound(path.to_string()));
        }

        let archive = self.archive.lock().clone().unwrap_or_default();
        // Two chunks so the controller has to reassemble them.
        let middle = archive.len() / 2;
        let chunks: Vec<Result<Bytes, ArchiveError>> = vec![
            Ok(Bytes::copy_from_slice(&archive[..middle])),
            Ok(Bytes::copy_from_slice(&archive[middle..])),
        ];
        Ok(Box::pin(futures::stream::iter(chunks)))
    }
}
