// ABOUTME: Archive operations trait for container runtimes.
// ABOUTME: Streams a tar archive of a path inside a container's filesystem.

use super::sealed::Sealed;
use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;

/// Chunks of a tar archive as the daemon sends them.
pub type ArchiveStream = Pin<Box<dyn Stream<Item = Result<Bytes, ArchiveError>> + Send>>;

/// Filesystem extraction from containers.
#[async_trait]
pub trait ArchiveOps: Sealed + Send + Sync {
    /// Request a tar archive of `path` inside `container`.
    ///
    /// Errors for a missing path may surface either here or on the first
    /// chunk of the stream, depending on the daemon.
    async fn download_archive(
        &self,
        container: &str,
        path: &str,
    ) -> Result<ArchiveStream, ArchiveError>;
}

/// Errors from archive operations.
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("container or path not found: {0}")]
    NotFound(String),

    #[error("stream error: {0}")]
    StreamError(String),

    #[error("cannot decode archive: {0}")]
    Decode(#[from] std::io::Error),

    #[error("runtime error: {0}")]
    Runtime(String),
}
