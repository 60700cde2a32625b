// ABOUTME: Composable capability traits for container runtimes.
// ABOUTME: Defines ContainerOps, ExecOps, and ArchiveOps plus the types they exchange.

mod archive;
mod container;
mod exec;
pub(crate) mod sealed;
mod shared_types;

pub use archive::{ArchiveError, ArchiveOps, ArchiveStream};
pub use container::{ContainerError, ContainerFilters, ContainerOps};
pub use exec::{ExecError, ExecOps};
pub use shared_types::*;

/// Everything the lifecycle controller needs from a runtime.
pub trait ServerRuntime: ContainerOps + ExecOps + ArchiveOps {}

impl<T: ContainerOps + ExecOps + ArchiveOps> ServerRuntime for T {}
