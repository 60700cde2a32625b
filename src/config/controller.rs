// ABOUTME: Tunables for the lifecycle controller.
// ABOUTME: Privileged exec user, permission failure marker, mounts, and stop timeout.

use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct ControllerConfig {
    /// User a command is re-run as after a permission failure.
    #[serde(default = "default_privileged_user")]
    pub privileged_user: String,

    /// Output text that marks an unprivileged attempt as a permission failure.
    #[serde(default = "default_permission_denied_marker")]
    pub permission_denied_marker: String,

    /// Container whose volumes every server mounts. `null` disables it.
    #[serde(default = "default_base_volume")]
    pub base_volume: Option<String>,

    /// Where a server's shared host directory appears inside the container.
    #[serde(default = "default_shared_mount_target")]
    pub shared_mount_target: String,

    /// Grace period before a stop turns into a kill.
    #[serde(default = "default_stop_timeout", with = "humantime_serde")]
    pub stop_timeout: Duration,
}

fn default_privileged_user() -> String {
    "root".to_string()
}

fn default_permission_denied_marker() -> String {
    "Permission denied".to_string()
}

fn default_base_volume() -> Option<String> {
    Some("java".to_string())
}

fn default_shared_mount_target() -> String {
    "/cloudunit/shared".to_string()
}

fn default_stop_timeout() -> Duration {
    Duration::from_secs(10)
}

impl Default for ControllerConfig {
    fn default() -> Self {
        ControllerConfig {
            privileged_user: default_privileged_user(),
            permission_denied_marker: default_permission_denied_marker(),
            base_volume: default_base_volume(),
            shared_mount_target: default_shared_mount_target(),
            stop_timeout: default_stop_timeout(),
        }
    }
}
