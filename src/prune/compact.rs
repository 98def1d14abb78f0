use crate::prune::engine::root_cause;
use crate::prune::fsops::Mutator;
use crate::prune::keep::KeepList;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Nesting below the root past which directories are left alone.
pub const DEFAULT_MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CompactReport {
    pub removed: u64,
    pub failed:  u64,
}

/// Post-order removal of directories emptied by pruning.
///
/// A directory goes only when every child was itself removed and the
/// keep-list does not protect it. Files always count as remaining: deleting
/// them is the pruning pass's job, and a file already removed (or, in a dry
/// run, marked as removed) counts as gone. The directory `compact` is called
/// on is never removed.
#[derive(Debug)]
pub struct Compactor<'a, M> {
    keep:      &'a KeepList,
    ops:       &'a M,
    max_depth: usize,
    report:    CompactReport,
}

impl<'a, M: Mutator> Compactor<'a, M> {
    pub fn new(keep: &'a KeepList, ops: &'a M) -> Self {
        Self { keep, ops, max_depth: DEFAULT_MAX_DEPTH, report: CompactReport::default() }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn report(&self) -> CompactReport { self.report }

    /// Compact everything below `root`. Returns whether `root` ended up
    /// removed, which by construction is never.
    pub fn compact(&mut self, root: &Path) -> bool {
        self.visit(root, 0)
    }

    fn visit(&mut self, path: &Path, depth: usize) -> bool {
        if self.ops.was_removed(path) { return true; }
        match fs::symlink_metadata(path) {
            Ok(meta) if meta.is_dir() => {}
            Err(err) if depth > 0 && err.kind() == io::ErrorKind::NotFound => return true,
            _ => return false,
        }
        if depth > self.max_depth {
            debug!(path = %path.display(), "too deep, leaving in place");
            return false;
        }

        let children: Vec<PathBuf> = match fs::read_dir(path) {
            Ok(rd) => rd.flatten().map(|e| e.path()).collect(),
            Err(err) => {
                warn!(path = %path.display(), "cannot list directory: {}", err);
                return false;
            }
        };

        // Visit every child even after one is kept; siblings still compact.
        let mut emptied = true;
        for child in &children {
            emptied &= self.visit(child, depth + 1);
        }

        if !emptied { return false; }
        if depth == 0 || self.keep.is_protected(path) {
            debug!(path = %path.display(), "keeping protected directory");
            return false;
        }

        match self.ops.rmdir(path) {
            Ok(()) => {
                self.report.removed += 1;
                true
            }
            Err(err) => {
                self.report.failed += 1;
                warn!("{}: {}", err, root_cause(&err));
                false
            }
        }
    }
}

/// Compact `root` with the default depth bound.
pub fn compact<M: Mutator>(root: &Path, keep: &KeepList, ops: &M) -> (bool, CompactReport) {
    let mut compactor = Compactor::new(keep, ops);
    let removed = compactor.compact(root);
    (removed, compactor.report())
}
