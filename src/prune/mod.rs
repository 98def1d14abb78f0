pub mod compact;
pub mod engine;
pub mod fsops;
pub mod keep;

use crate::collectors::statvfs::SpaceProbe;
use crate::error::PruneError;
use crate::util::human::{fmt_bytes, fmt_pct};
use compact::{CompactReport, Compactor};
use engine::{prune_oldest, PruneReport};
use fsops::FsOps;
use keep::KeepList;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

/// Everything one run needs, resolved from config file and flags.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub root:            PathBuf,
    pub target_free_pct: u8,
    pub keep_files:      Vec<String>,
    pub dry_run:         bool,
    pub max_depth:       usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub root:              PathBuf,
    pub dry_run:           bool,
    pub target_free_pct:   u8,
    pub free_pct_before:   f64,
    pub free_pct_after:    f64,
    pub keep:              KeepList,
    pub prune:             PruneReport,
    pub compact:           CompactReport,
    pub finished_at:       String,
}

/// Resolve `root` to an absolute path with no symlinks or `..` left in it.
/// Fails with `PathUnavailable` unless it is an existing directory.
pub fn check_root(root: &Path) -> Result<PathBuf, PruneError> {
    let resolved = fs::canonicalize(root).map_err(|err| PruneError::unavailable(root, err))?;
    let meta = fs::metadata(&resolved).map_err(|err| PruneError::unavailable(root, err))?;
    if !meta.is_dir() {
        return Err(PruneError::unavailable(root, io::Error::other("not a directory")));
    }
    Ok(resolved)
}

/// Prune `opts.root` to the target free share, then compact the emptied
/// directories. Only precondition failures are returned as errors; the
/// compaction pass starts strictly after pruning has finished.
pub fn run<P: SpaceProbe>(opts: &RunOptions, probe: &P) -> Result<RunReport, PruneError> {
    let root = check_root(&opts.root)?;
    let before = probe.stats(&root)?;
    let keep = KeepList::for_root(&opts.keep_files, &root)?;
    let ops = FsOps::new(opts.dry_run);
    let target_pct = f64::from(opts.target_free_pct);

    info!(root = %root.display(), keep = ?keep.patterns(), "starting run");
    info!(
        "target free {}, currently {} ({} free), {} to delete",
        fmt_pct(target_pct),
        fmt_pct(before.free_pct()),
        fmt_bytes(before.free_bytes()),
        fmt_bytes(before.bytes_to_target(target_pct)),
    );
    if opts.dry_run {
        info!("dry run, no files will be deleted");
    }

    let prune = prune_oldest(&root, &keep, target_pct, probe, &ops)?;

    let mut compactor = Compactor::new(&keep, &ops).with_max_depth(opts.max_depth);
    compactor.compact(&root);
    let compact = compactor.report();

    let free_pct_after = probe.free_pct(&root)?;
    info!(
        deleted = prune.deleted,
        failed  = prune.failed,
        dirs    = compact.removed,
        "done: freed {}, free space now {}",
        fmt_bytes(prune.freed_bytes),
        fmt_pct(free_pct_after),
    );

    Ok(RunReport {
        root,
        dry_run:         opts.dry_run,
        target_free_pct: opts.target_free_pct,
        free_pct_before: before.free_pct(),
        free_pct_after,
        keep,
        prune,
        compact,
        finished_at:     chrono::Local::now().to_rfc3339(),
    })
}
