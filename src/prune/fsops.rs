use crate::error::FsOpError;
use std::cell::RefCell;
use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// The mutating calls the pruning and compaction passes make.
pub trait Mutator {
    /// Delete a file, or an empty directory. A target that is already gone
    /// counts as removed.
    fn remove(&self, path: &Path) -> Result<(), FsOpError>;

    /// Remove an empty directory left behind by pruning.
    fn rmdir(&self, path: &Path) -> Result<(), FsOpError>;

    /// Cut a file to zero length in place.
    fn truncate_to_zero(&self, path: &Path) -> Result<(), FsOpError>;

    /// Whether an earlier call already removed `path` without the
    /// filesystem reflecting it (a dry run).
    fn was_removed(&self, _path: &Path) -> bool { false }
}

/// Every mutating filesystem call goes through here so a dry run can swap
/// each one for a log line.
///
/// A dry run remembers what it would have removed, so later passes see the
/// tree as a live run would have left it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FsOps {
    dry_run: bool,
    pretend_removed: RefCell<HashSet<PathBuf>>,
}

impl FsOps {
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run, pretend_removed: RefCell::default() }
    }
    pub fn live() -> Self { Self::new(false) }
    pub fn dry_run() -> Self { Self::new(true) }
    pub fn is_dry_run(&self) -> bool { self.dry_run }

    fn pretend(&self, path: &Path) {
        self.pretend_removed.borrow_mut().insert(path.to_path_buf());
    }
}

impl Mutator for FsOps {
    fn remove(&self, path: &Path) -> Result<(), FsOpError> {
        if self.dry_run {
            info!(path = %path.display(), "dry run: would remove");
            self.pretend(path);
            return Ok(());
        }
        let result = match fs::symlink_metadata(path) {
            Ok(meta) if meta.is_dir() => fs::remove_dir(path),
            Ok(_) => fs::remove_file(path),
            Err(err) => Err(err),
        };
        already_gone_is_ok(result).map_err(|source| FsOpError::Delete {
            path: path.to_path_buf(),
            source,
        })
    }

    fn rmdir(&self, path: &Path) -> Result<(), FsOpError> {
        if self.dry_run {
            info!(path = %path.display(), "dry run: would remove directory");
            self.pretend(path);
            return Ok(());
        }
        debug!(path = %path.display(), "removing directory");
        already_gone_is_ok(fs::remove_dir(path)).map_err(|source| FsOpError::Compaction {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Copy-on-write filesystems with no free blocks can refuse an unlink
    /// because it needs fresh metadata blocks; dropping the data first
    /// releases blocks without allocating any.
    fn truncate_to_zero(&self, path: &Path) -> Result<(), FsOpError> {
        if self.dry_run {
            info!(path = %path.display(), "dry run: would overwrite with zero length data");
            return Ok(());
        }
        info!(path = %path.display(), "overwriting with zero length data");
        let result = OpenOptions::new().write(true).truncate(true).open(path).map(drop);
        already_gone_is_ok(result).map_err(|source| FsOpError::Truncate {
            path: path.to_path_buf(),
            source,
        })
    }

    fn was_removed(&self, path: &Path) -> bool {
        self.dry_run && self.pretend_removed.borrow().contains(path)
    }
}

fn already_gone_is_ok(result: io::Result<()>) -> io::Result<()> {
    match result {
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}
