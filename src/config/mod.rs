// ABOUTME: Configuration types and parsing for dockhand.yml.
// ABOUTME: Handles file discovery, YAML parsing, and the init template.

mod controller;

pub use controller::ControllerConfig;

use crate::error::{Error, Result};
use crate::runtime::RuntimeConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "dockhand.yml";
pub const CONFIG_FILENAME_ALT: &str = "dockhand.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".dockhand/config.yml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Which daemon to use; auto-detected when empty.
    #[serde(default)]
    pub daemon: RuntimeConfig,

    #[serde(default)]
    pub controller: ControllerConfig,
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty file is a valid, all-defaults config.
        if yaml.trim().is_empty() {
            return Ok(Config::default());
        }
        serde_yaml::from_str(yaml).map_err(Error::from)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// First config file found in `dir`, if any.
    pub fn find(dir: &Path) -> Option<PathBuf> {
        [CONFIG_FILENAME, CONFIG_FILENAME_ALT, CONFIG_FILENAME_DIR]
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
    }

    pub fn discover(dir: &Path) -> Result<Self> {
        match Self::find(dir) {
            Some(path) => Self::load(&path),
            None => Err(Error::ConfigNotFound(dir.to_path_buf())),
        }
    }

    /// Like [`Config::discover`], but a missing file means defaults.
    pub fn discover_or_default(dir: &Path) -> Result<Self> {
        match Self::find(dir) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading config");
                Self::load(&path)
            }
            None => Ok(Config::default()),
        }
    }
}

pub fn init_config(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    std::fs::write(&config_path, template_yaml(&ControllerConfig::default()))?;
    Ok(config_path)
}

fn template_yaml(defaults: &ControllerConfig) -> String {
    format!(
        r#"# Uncomment to skip socket detection.
# daemon:
#   runtime: docker
#   socket: /var/run/docker.sock

controller:
  privileged_user: {}
  permission_denied_marker: "{}"
  base_volume: {}
  shared_mount_target: {}
  stop_timeout: {}s
"#,
        defaults.privileged_user,
        defaults.permission_denied_marker,
        defaults.base_volume.as_deref().unwrap_or("null"),
        defaults.shared_mount_target,
        defaults.stop_timeout.as_secs()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_parses_back_to_defaults() {
        let defaults = ControllerConfig::default();
        let config = Config::from_yaml(&template_yaml(&defaults)).unwrap();

        assert_eq!(config.controller.privileged_user, defaults.privileged_user);
        assert_eq!(
            config.controller.permission_denied_marker,
            defaults.permission_denied_marker
        );
        assert_eq!(config.controller.base_volume, defaults.base_volume);
        assert_eq!(config.controller.stop_timeout, defaults.stop_timeout);
        assert!(config.daemon.runtime.is_none());
    }
}
