// ABOUTME: Derives the create request for a server container.
// ABOUTME: Baseline volume plus an optional shared host directory taken from JVM options.

use std::collections::HashMap;

use crate::config::ControllerConfig;
use crate::model::{ServerRecord, UserRecord};
use crate::runtime::{ContainerConfig, VolumeMount};
use crate::types::{ContainerName, ImageRef};

/// JVM system property naming the host directory shared with the server.
pub const SHARED_DIR_PROPERTY: &str = "-Dcloudunit.shared.dir=";

/// Label carrying the owning user's login.
pub const OWNER_LABEL: &str = "dockhand.owner";

/// The shared host directory declared in `jvm_options`, if any.
///
/// The last occurrence wins, as it would on a JVM command line.
pub fn shared_directory(jvm_options: &str) -> Option<&str> {
    jvm_options
        .split_whitespace()
        .filter_map(|option| option.strip_prefix(SHARED_DIR_PROPERTY))
        .next_back()
        .map(|dir| dir.trim_matches('"'))
        .filter(|dir| !dir.is_empty())
}

pub(crate) fn container_config(
    name: &ContainerName,
    image: &ImageRef,
    server: &ServerRecord,
    user: &UserRecord,
    settings: &ControllerConfig,
) -> ContainerConfig {
    let volumes = shared_directory(&server.jvm_options)
        .map(|dir| VolumeMount {
            source: dir.to_string(),
            target: settings.shared_mount_target.clone(),
            read_only: false,
        })
        .into_iter()
        .collect();

    let mut labels = HashMap::new();
    labels.insert(OWNER_LABEL.to_string(), user.login.clone());

    ContainerConfig {
        name: name.to_string(),
        image: image.clone(),
        labels,
        volumes,
        volumes_from: settings.base_volume.iter().cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_shared_directory() {
        assert_eq!(
            shared_directory("-Xms512m -Dcloudunit.shared.dir=/srv/shared/alice -Xss1m"),
            Some("/srv/shared/alice")
        );
    }

    #[test]
    fn no_property_means_no_shared_directory() {
        assert_eq!(shared_directory("-Xms512m -Xmx1g"), None);
        assert_eq!(shared_directory(""), None);
        assert_eq!(shared_directory("-Dcloudunit.shared.dir="), None);
    }

    #[test]
    fn last_occurrence_wins() {
        assert_eq!(
            shared_directory("-Dcloudunit.shared.dir=/a -Dcloudunit.shared.dir=\"/b\""),
            Some("/b")
        );
    }
}
