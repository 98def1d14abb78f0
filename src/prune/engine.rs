use crate::collectors::statvfs::SpaceProbe;
use crate::collectors::tree::list_oldest_first;
use crate::error::PruneError;
use crate::prune::fsops::Mutator;
use crate::prune::keep::KeepList;
use crate::util::human::fmt_bytes;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info, warn};

/// Outcome of one pruning pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PruneReport {
    pub target_bytes: u64,
    pub freed_bytes:  u64,
    pub deleted:      u64,
    pub failed:       u64,
    /// Files passed over because the keep-list protects them.
    pub skipped:      u64,
    /// Whether the zero-length overwrite for a full volume was attempted.
    pub truncated:    bool,
}

impl PruneReport {
    pub fn target_met(&self) -> bool {
        self.freed_bytes >= self.target_bytes
    }
}

/// Delete files under `root`, oldest first, until enough bytes are gone to
/// lift the volume's free share to `target_pct`.
///
/// Running out of deletable files is not an error; compare
/// [`PruneReport::target_met`] or re-read the volume afterwards. Per-file
/// failures are logged and the pass moves on.
pub fn prune_oldest<P: SpaceProbe, M: Mutator>(
    root:       &Path,
    keep:       &KeepList,
    target_pct: f64,
    probe:      &P,
    ops:        &M,
) -> Result<PruneReport, PruneError> {
    let stats = probe.stats(root)?;
    let mut report = PruneReport { target_bytes: stats.bytes_to_target(target_pct), ..Default::default() };

    if report.target_bytes == 0 {
        info!("adequate space remaining, no need to remove any files");
        return Ok(report);
    }

    // One-shot: only the first deletion of the run gets the overwrite.
    let mut volume_full = stats.is_full();

    for entry in list_oldest_first(root)? {
        if keep.is_protected(&entry.path) {
            debug!(path = %entry.path.display(), "skipping protected file");
            report.skipped += 1;
            continue;
        }

        if volume_full {
            report.truncated = true;
            volume_full = false;
            if let Err(err) = ops.truncate_to_zero(&entry.path) {
                warn!("{}: {}", err, root_cause(&err));
            }
        }

        match ops.remove(&entry.path) {
            Ok(()) => {
                report.deleted += 1;
                report.freed_bytes += entry.size;
                info!(
                    path     = %entry.path.display(),
                    modified = %entry.modified_local(),
                    "removed {}  {}/{}",
                    fmt_bytes(entry.size),
                    fmt_bytes(report.freed_bytes),
                    fmt_bytes(report.target_bytes),
                );
            }
            Err(err) => {
                report.failed += 1;
                warn!("{}: {}", err, root_cause(&err));
            }
        }

        if report.target_met() { break; }
    }

    if report.target_met() {
        info!("freed {} of {} requested", fmt_bytes(report.freed_bytes), fmt_bytes(report.target_bytes));
    } else {
        info!(
            "ran out of deletable files: freed {} of {} requested",
            fmt_bytes(report.freed_bytes),
            fmt_bytes(report.target_bytes),
        );
    }
    Ok(report)
}

pub(crate) fn root_cause(err: &dyn std::error::Error) -> String {
    let mut cause = err;
    while let Some(next) = cause.source() {
        cause = next;
    }
    cause.to_string()
}
