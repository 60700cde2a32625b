// ABOUTME: Container runtime adapter for Docker and Podman.
// ABOUTME: Detects the local daemon socket and exposes the capability traits the controller drives.

mod bollard;
mod detection;
mod error;
#[cfg(test)]
pub(crate) mod fake;
pub mod traits;
mod types;

pub use bollard::BollardRuntime;
pub use detection::{DetectionError, detect_local, detect_runtime};
pub use error::{ConnectError, ConnectErrorKind};
pub use traits::*;
pub use types::{RuntimeConfig, RuntimeInfo, RuntimeType};
