// ABOUTME: Handle to a daemon-managed container.
// ABOUTME: Pairs the stable caller-chosen name with the id learned from inspect.

use super::{ContainerId, ContainerName};

/// Identifies one live container.
///
/// `id` stays `None` until an inspect has confirmed the container exists.
/// After a successful remove the handle no longer refers to anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerHandle {
    pub name: ContainerName,
    pub id: Option<ContainerId>,
}

impl ContainerHandle {
    pub fn new(name: ContainerName) -> Self {
        Self { name, id: None }
    }

    /// What to address the daemon with: the id when known, else the name.
    pub fn target(&self) -> &str {
        self.id
            .as_ref()
            .map(ContainerId::as_str)
            .unwrap_or_else(|| self.name.as_str())
    }
}

impl From<ContainerName> for ContainerHandle {
    fn from(name: ContainerName) -> Self {
        Self::new(name)
    }
}
