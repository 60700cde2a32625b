// ABOUTME: Controller error types with SNAFU context selectors.
// ABOUTME: Every daemon failure carries the operation and the container it targeted.

use crate::runtime::{ArchiveError, ContainerError, ExecError};
use snafu::Snafu;
use std::fmt;

/// Container-level daemon call the controller was making.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Start,
    Stop,
    Kill,
    Remove,
    Inspect,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Create => "create",
            Operation::Start => "start",
            Operation::Stop => "stop",
            Operation::Kill => "kill",
            Operation::Remove => "remove",
            Operation::Inspect => "inspect",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ControllerError {
    #[snafu(display("{operation} failed for container {target}: {source}"))]
    Container {
        operation: Operation,
        target: String,
        source: ContainerError,
    },

    #[snafu(display("exec in container {container} failed for `{command}`: {source}"))]
    Exec {
        container: String,
        command: String,
        source: ExecError,
    },

    #[snafu(display("cannot extract {path} from container {container}: {source}"))]
    Archive {
        container: String,
        path: String,
        source: ArchiveError,
    },

    #[snafu(display("{variable} is missing from the environment of container {container}"))]
    MissingEnvironment { container: String, variable: String },

    #[snafu(display(
        "privileged retry in container {container} failed for `{command}`: {source}"
    ))]
    PermissionRetryExhausted {
        container: String,
        command: String,
        source: ExecError,
    },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerErrorKind {
    /// The daemon rejected or failed a call.
    RuntimeCall,
    /// A container does not declare an environment variable it is expected to.
    MissingEnvironment,
    /// A command failed again after being re-run privileged.
    PermissionRetryExhausted,
}

impl ControllerError {
    pub fn kind(&self) -> ControllerErrorKind {
        match self {
            ControllerError::Container { .. }
            | ControllerError::Exec { .. }
            | ControllerError::Archive { .. } => ControllerErrorKind::RuntimeCall,
            ControllerError::MissingEnvironment { .. } => ControllerErrorKind::MissingEnvironment,
            ControllerError::PermissionRetryExhausted { .. } => {
                ControllerErrorKind::PermissionRetryExhausted
            }
        }
    }

    /// The daemon call that failed, for container-level errors.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            ControllerError::Container { operation, .. } => Some(*operation),
            _ => None,
        }
    }
}
