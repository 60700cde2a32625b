// ABOUTME: Runtime connection error types with SNAFU pattern.
// ABOUTME: Unifies detection and socket connection failures for programmatic handling.

use snafu::Snafu;

use super::detection::DetectionError;

/// Failure to reach a container daemon.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ConnectError {
    #[snafu(display("runtime detection failed: {source}"))]
    Detection { source: DetectionError },

    #[snafu(display("cannot connect to {socket}: {source}"))]
    Socket {
        socket: String,
        source: bollard::errors::Error,
    },

    #[snafu(display("daemon at {socket} did not answer ping: {source}"))]
    Ping {
        socket: String,
        source: bollard::errors::Error,
    },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectErrorKind {
    /// No usable daemon socket on this host.
    NoRuntimeFound,
    /// The socket exists but the client could not be built or the daemon is silent.
    ConnectionFailed,
}

impl ConnectError {
    pub fn kind(&self) -> ConnectErrorKind {
        match self {
            ConnectError::Detection { .. } => ConnectErrorKind::NoRuntimeFound,
            ConnectError::Socket { .. } | ConnectError::Ping { .. } => {
                ConnectErrorKind::ConnectionFailed
            }
        }
    }
}

impl From<DetectionError> for ConnectError {
    fn from(source: DetectionError) -> Self {
        ConnectError::Detection { source }
    }
}
