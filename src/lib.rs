//! spaceprune - free disk space by deleting the oldest media first
//!
//! Given a media directory and a minimum free-space percentage, spaceprune
//! deletes regular files in ascending modification-time order until the
//! volume has enough room, then removes directories the deletions left empty.
//!
//! - Paths ending in any keep-list suffix are never deleted or compacted. The
//!   keep-list always holds the root and its first-level entries.
//! - When the volume is completely full, the first file is cut to zero length
//!   before it is unlinked (copy-on-write filesystems may refuse the unlink).
//! - A dry run logs every decision and mutates nothing.

pub mod collectors;
pub mod config;
pub mod error;
pub mod models;
pub mod motioneye;
pub mod prune;
pub mod util;

pub use collectors::statvfs::{FixedProbe, SpaceProbe, Statvfs};
pub use collectors::tree::list_oldest_first;
pub use error::{FsOpError, PruneError};
pub use models::entry::FileEntry;
pub use models::volume::VolumeStats;
pub use prune::compact::{compact, CompactReport, Compactor};
pub use prune::engine::{prune_oldest, PruneReport};
pub use prune::fsops::{FsOps, Mutator};
pub use prune::keep::KeepList;
pub use prune::{check_root, run, RunOptions, RunReport};
