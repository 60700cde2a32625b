// ABOUTME: Type-safe identifiers and validated domain types.
// ABOUTME: Keeps container ids, exec ids, names, and image references apart at compile time.

mod container_name;
mod handle;
mod id;
mod image_ref;

pub use container_name::{ContainerName, ContainerNameError};
pub use handle::ContainerHandle;
pub use id::{ContainerId, ExecId};
pub use image_ref::{ImageRef, ParseImageRefError};
