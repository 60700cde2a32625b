// ABOUTME: Lifecycle controller for application server containers.
// ABOUTME: Drives create/start/inspect sequences, privileged exec retries, hooks, and file extraction.

mod error;
mod exec;
mod extract;
mod mounts;

pub use error::{ControllerError, ControllerErrorKind, Operation};
pub use exec::{Privilege, is_permission_denied, shell_command};
pub use mounts::{OWNER_LABEL, SHARED_DIR_PROPERTY, shared_directory};

use crate::config::ControllerConfig;
use crate::diagnostics::{Diagnostics, Warning};
use crate::hooks::LifecycleAction;
use crate::model::{ServerRecord, UserRecord};
use crate::runtime::{
    ArchiveError, ContainerFilters, ContainerInfo, ExecError, ExecResult, ServerRuntime,
};
use crate::types::{ContainerHandle, ContainerId, ContainerName, ImageRef};
use error::{
    ArchiveSnafu, ContainerSnafu, ExecSnafu, MissingEnvironmentSnafu,
    PermissionRetryExhaustedSnafu,
};
use futures::StreamExt;
use snafu::ResultExt;
use std::io::Write;

pub type Result<T, E = ControllerError> = std::result::Result<T, E>;

/// Manages server containers on one daemon.
///
/// Every operation awaits its daemon calls one after another. Nothing is
/// serialized per container: callers must not overlap lifecycle operations
/// on the same container. Operations that can raise non-fatal warnings
/// record them in a [`Diagnostics`] owned by the caller.
pub struct ServerController<R> {
    runtime: R,
    settings: ControllerConfig,
}

impl<R: ServerRuntime> ServerController<R> {
    pub fn new(runtime: R, settings: ControllerConfig) -> Self {
        Self {
            runtime,
            settings,
        }
    }

    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    pub fn settings(&self) -> &ControllerConfig {
        &self.settings
    }

    async fn inspect(&self, target: &str) -> Result<ContainerInfo> {
        self.runtime
            .inspect_container(target)
            .await
            .context(ContainerSnafu {
                operation: Operation::Inspect,
                target,
            })
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Create the container for `server`, owned by `user`.
    ///
    /// The returned handle has no id yet; see [`ServerController::resolve_handle`].
    pub async fn create(
        &self,
        name: &ContainerName,
        image: &ImageRef,
        server: &ServerRecord,
        user: &UserRecord,
    ) -> Result<ContainerHandle> {
        let config = mounts::container_config(name, image, server, user, &self.settings);
        tracing::debug!(
            container = %name,
            image = %image,
            shared = ?config.volumes.first().map(|m| &m.source),
            "creating container"
        );

        let id = self
            .runtime
            .create_container(&config)
            .await
            .context(ContainerSnafu {
                operation: Operation::Create,
                target: name.as_str(),
            })?;

        tracing::info!(container = %name, id = %id.short(), "container created");
        Ok(ContainerHandle::new(name.clone()))
    }

    /// Start the container, then inspect it and copy its state onto `server`.
    ///
    /// If inspect fails after a successful start the container may be running,
    /// but this still fails and `server` is left untouched.
    pub async fn start(&self, name: &ContainerName, server: &mut ServerRecord) -> Result<()> {
        self.runtime
            .start_container(name.as_str())
            .await
            .context(ContainerSnafu {
                operation: Operation::Start,
                target: name.as_str(),
            })?;

        let info = self.inspect(name.as_str()).await?;
        server.refresh_from(&info);

        tracing::info!(container = %name, id = %info.id.short(), "container started");
        Ok(())
    }

    pub async fn stop(&self, name: &ContainerName) -> Result<()> {
        self.runtime
            .stop_container(name.as_str(), self.settings.stop_timeout)
            .await
            .context(ContainerSnafu {
                operation: Operation::Stop,
                target: name.as_str(),
            })?;
        tracing::info!(container = %name, "container stopped");
        Ok(())
    }

    pub async fn kill(&self, name: &ContainerName) -> Result<()> {
        self.runtime
            .kill_container(name.as_str())
            .await
            .context(ContainerSnafu {
                operation: Operation::Kill,
                target: name.as_str(),
            })?;
        tracing::info!(container = %name, "container killed");
        Ok(())
    }

    /// Remove the container. Handles to it are invalid afterwards.
    pub async fn remove(&self, name: &ContainerName) -> Result<()> {
        self.runtime
            .remove_container(name.as_str(), false)
            .await
            .context(ContainerSnafu {
                operation: Operation::Remove,
                target: name.as_str(),
            })?;
        tracing::info!(container = %name, "container removed");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Exec
    // -------------------------------------------------------------------------

    /// Run `command` once with the given privilege and return its result.
    pub async fn execute_as(
        &self,
        container: &str,
        command: &str,
        privilege: Privilege,
    ) -> std::result::Result<ExecResult, ExecError> {
        tracing::debug!(container, command, ?privilege, "exec");
        let config = exec::exec_config(command, privilege, &self.settings.privileged_user);
        self.runtime.exec(container, &config).await
    }

    /// Run `command` inside `container` and return its combined output.
    ///
    /// The first attempt runs unprivileged. If its output is classified as a
    /// permission failure, the same command is re-run exactly once as the
    /// privileged user and that output is returned. A daemon failure of the
    /// retry is [`ControllerError::PermissionRetryExhausted`]; there is no
    /// further fallback. The retry is recorded in `diag`.
    pub async fn execute(
        &self,
        container: &str,
        command: &str,
        diag: &mut Diagnostics,
    ) -> Result<String> {
        let first = self
            .execute_as(container, command, Privilege::Unprivileged)
            .await
            .context(ExecSnafu { container, command })?;

        if !is_permission_denied(&first, &self.settings.permission_denied_marker) {
            return Ok(first.output_text());
        }

        diag.warn(Warning::privileged_retry(format!(
            "[{}] exec command in privileged mode: {}",
            container, command
        )));

        let retried = self
            .execute_as(container, command, Privilege::Privileged)
            .await
            .context(PermissionRetryExhaustedSnafu { container, command })?;

        Ok(retried.output_text())
    }

    /// Resolve `action` against `bindings` and run it through [`ServerController::execute`].
    pub async fn run_hook<K, V>(
        &self,
        container: &str,
        action: LifecycleAction,
        bindings: &[(K, V)],
        diag: &mut Diagnostics,
    ) -> Result<String>
    where
        K: AsRef<str> + Sync,
        V: AsRef<str> + Sync,
    {
        let command = action.command(bindings);
        tracing::info!(container, hook = %action, "{}", action.label());
        self.execute(container, &command, diag).await
    }

    // -------------------------------------------------------------------------
    // State queries
    // -------------------------------------------------------------------------

    pub async fn is_running(&self, handle: &ContainerHandle) -> Result<bool> {
        Ok(self.inspect(handle.target()).await?.running)
    }

    /// Whether the daemon reports the container as exited.
    ///
    /// A nonzero exit code is recorded in `diag` but does not change the
    /// answer.
    pub async fn is_stopped_gracefully(
        &self,
        handle: &ContainerHandle,
        diag: &mut Diagnostics,
    ) -> Result<bool> {
        let info = self.inspect(handle.target()).await?;
        let exited = info.status.eq_ignore_ascii_case("exited");

        if info.exit_code != 0 {
            diag.warn(Warning::brutal_stop(format!(
                "container {} may have been stopped brutally, exit code {}",
                handle.name, info.exit_code
            )));
        }

        Ok(exited)
    }

    /// Value of the first environment entry starting with `variable`.
    pub async fn env_variable(&self, container: &ContainerId, variable: &str) -> Result<String> {
        let info = self.inspect(container.as_str()).await?;

        let value = info
            .env
            .iter()
            .find(|entry| entry.starts_with(variable))
            .map(|entry| entry.split_once('=').map_or(entry.as_str(), |(_, v)| v));

        match value {
            Some(value) => Ok(value.to_string()),
            None => MissingEnvironmentSnafu {
                container: container.as_str(),
                variable,
            }
            .fail(),
        }
    }

    pub async fn container_id(&self, name: &ContainerName) -> Result<ContainerId> {
        Ok(self.inspect(name.as_str()).await?.id)
    }

    pub async fn container_name(&self, id: &ContainerId) -> Result<String> {
        Ok(self.inspect(id.as_str()).await?.name)
    }

    /// Fill in `handle.id` from a fresh inspect of its name.
    pub async fn resolve_handle(&self, handle: &mut ContainerHandle) -> Result<()> {
        let id = self.container_id(&handle.name).await?;
        handle.id = Some(id);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Files and enumeration
    // -------------------------------------------------------------------------

    /// Stream `path` out of the container and write its file content to `sink`.
    ///
    /// Returns the number of bytes written. Nothing reaches `sink` unless the
    /// whole archive decodes.
    pub async fn extract_file<W: Write + ?Sized>(
        &self,
        container: &ContainerId,
        path: &str,
        sink: &mut W,
    ) -> Result<u64> {
        let context = || ArchiveSnafu {
            container: container.as_str(),
            path,
        };

        let mut stream = self
            .runtime
            .download_archive(container.as_str(), path)
            .await
            .with_context(|_| context())?;

        let mut archive = Vec::new();
        while let Some(chunk) = stream.next().await {
            archive.extend_from_slice(&chunk.with_context(|_| context())?);
        }
        let written = extract::untar_into(archive.as_slice(), sink)
            .map_err(ArchiveError::from)
            .with_context(|_| context())?;

        tracing::debug!(container = %container.short(), path, bytes = written, "extracted");
        Ok(written)
    }

    /// Ids of every container on the daemon, stopped ones included.
    ///
    /// Best effort: a daemon failure is recorded in `diag` and yields an
    /// empty list instead of an error.
    pub async fn list_container_ids(&self, diag: &mut Diagnostics) -> Vec<ContainerId> {
        match self
            .runtime
            .list_containers(&ContainerFilters::everything())
            .await
        {
            Ok(ids) => ids,
            Err(e) => {
                diag.warn(Warning::listing_failed(format!(
                    "listing containers failed: {}",
                    e
                )));
                Vec::new()
            }
        }
    }
}
