// ABOUTME: Application-wide error types for dockhand.
// ABOUTME: Uses thiserror to wrap config, connection, and controller failures for the CLI.

use crate::controller::ControllerError;
use crate::runtime::ConnectError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("file already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("configuration file not found in {0}")]
    ConfigNotFound(PathBuf),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error(transparent)]
    Controller(#[from] ControllerError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
