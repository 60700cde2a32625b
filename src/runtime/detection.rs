// ABOUTME: Local runtime detection.
// ABOUTME: Honors an explicit override, else checks Podman sockets first, then Docker.

use super::types::{DOCKER_SOCKET, ROOTFUL_PODMAN_SOCKET, RuntimeConfig, RuntimeInfo, RuntimeType};
use std::path::Path;

/// Error during runtime detection.
#[derive(Debug, thiserror::Error)]
pub enum DetectionError {
    #[error("no container runtime found (checked Podman and Docker sockets)")]
    NoRuntimeFound,

    #[error("configured socket does not exist: {0}")]
    SocketMissing(String),
}

/// Pick the runtime to connect to.
///
/// An explicit `runtime` in `config` wins; its socket must exist. Otherwise
/// falls back to [`detect_local`].
pub fn detect_runtime(config: &RuntimeConfig) -> Result<RuntimeInfo, DetectionError> {
    let Some(runtime_type) = config.runtime else {
        return detect_local();
    };

    let socket_path = config
        .socket
        .clone()
        .unwrap_or_else(|| runtime_type.default_socket().to_string());

    if !Path::new(&socket_path).exists() {
        return Err(DetectionError::SocketMissing(socket_path));
    }

    Ok(RuntimeInfo {
        runtime_type,
        socket_path,
    })
}

/// Detect the container runtime on this host.
///
/// Detection order:
/// 1. Rootless Podman socket (`/run/user/$UID/podman/podman.sock`)
/// 2. Rootful Podman socket (`/run/podman/podman.sock`)
/// 3. Docker socket (`/var/run/docker.sock`)
pub fn detect_local() -> Result<RuntimeInfo, DetectionError> {
    let rootless = current_uid().map(|uid| format!("/run/user/{}/podman/podman.sock", uid));

    let candidates = rootless
        .into_iter()
        .map(|socket| (RuntimeType::Podman, socket))
        .chain([
            (RuntimeType::Podman, ROOTFUL_PODMAN_SOCKET.to_string()),
            (RuntimeType::Docker, DOCKER_SOCKET.to_string()),
        ]);

    for (runtime_type, socket_path) in candidates {
        if Path::new(&socket_path).exists() {
            tracing::debug!(runtime = %runtime_type, socket = %socket_path, "detected runtime");
            return Ok(RuntimeInfo {
                runtime_type,
                socket_path,
            });
        }
    }

    Err(DetectionError::NoRuntimeFound)
}

fn current_uid() -> Option<String> {
    std::env::var("UID").ok().or_else(|| {
        std::fs::read_to_string("/proc/self/status")
            .ok()
            .and_then(|s| {
                s.lines()
                    .find(|l| l.starts_with("Uid:"))
                    .and_then(|l| l.split_whitespace().nth(1))
                    .map(|s| s.to_string())
            })
    })
}
