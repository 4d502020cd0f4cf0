use std::collections::TryReserveError;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FfindError {
    // Config
    #[error("no root directory provided")]
    MissingRoot,

    // Traversal
    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("path not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("IO error at {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("path exceeds {limit} bytes: {}", .path.display())]
    PathTooLong { path: PathBuf, limit: usize },

    #[error("work queue allocation failed, subtree dropped: {}", .0.display())]
    QueueFull(PathBuf),

    // Startup
    #[error("out of memory")]
    StartupAlloc(#[from] TryReserveError),

    #[error("no worker thread could be started")]
    WorkerSpawn(#[source] std::io::Error),
}

impl FfindError {
    /// Classify an enumeration failure for `path`.
    pub(crate) fn from_io(path: PathBuf, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path),
            std::io::ErrorKind::NotFound         => Self::NotFound(path),
            _ => Self::Io { path, source: err },
        }
    }

    /// The path this error occurred at, if applicable.
    /// Callers use this to present "Skipped: <path>" without pattern matching on variants.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::PermissionDenied(p)
            | Self::NotFound(p)
            | Self::QueueFull(p)
            | Self::PathTooLong { path: p, .. }
            | Self::Io { path: p, .. } => Some(p.as_path()),
            _ => None,
        }
    }

    /// Whether the search can continue after this error.
    ///
    /// Recoverable errors cost at most one directory or one entry; the walk
    /// keeps going and they can be collected for reporting afterwards.
    ///
    /// Fatal errors (missing root, startup allocation, no workers) stop the
    /// run before any traversal happens.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            Self::MissingRoot | Self::StartupAlloc(_) | Self::WorkerSpawn(_)
        )
    }
}
