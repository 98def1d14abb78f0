use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures that abort a run before anything is mutated.
#[derive(Debug, Error)]
pub enum PruneError {
    #[error("path unavailable: {}", path.display())]
    PathUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot list {}", path.display())]
    Enumeration {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no media_path setting in {}", .0.display())]
    MediaPath(PathBuf),
}

impl PruneError {
    pub fn unavailable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        PruneError::PathUnavailable { path: path.into(), source }
    }
}

/// A single filesystem mutation that did not happen. Logged and counted,
/// never propagated out of a bulk pass.
#[derive(Debug, Error)]
pub enum FsOpError {
    #[error("failed to delete {}", path.display())]
    Delete {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to truncate {}", path.display())]
    Truncate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to remove directory {}", path.display())]
    Compaction {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
