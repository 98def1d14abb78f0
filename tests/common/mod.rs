#![allow(dead_code)]

use filetime::{set_file_mtime, FileTime};
use spaceprune::{FixedProbe, VolumeStats};
use std::fs;
use std::path::{Path, PathBuf};

/// Write `size` bytes at `root/rel` with the given mtime (seconds since epoch).
pub fn file(root: &Path, rel: &str, size: usize, mtime: i64) -> PathBuf {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, vec![b'x'; size]).unwrap();
    set_file_mtime(&path, FileTime::from_unix_time(mtime, 0)).unwrap();
    path
}

/// A 10_000 byte volume with `free_pct` percent available.
pub fn volume(free_pct: u64) -> FixedProbe {
    FixedProbe(VolumeStats {
        total_blocks:     100,
        free_blocks:      free_pct,
        available_blocks: free_pct,
        block_size:       100,
    })
}

/// Relative paths of every entry under `root`, sorted, directories marked with a trailing '/'.
pub fn snapshot(root: &Path) -> Vec<(String, Vec<u8>)> {
    let mut out: Vec<(String, Vec<u8>)> = walkdir::WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .map(|e| e.unwrap())
        .map(|e| {
            let rel = e.path().strip_prefix(root).unwrap().to_string_lossy().into_owned();
            if e.file_type().is_dir() {
                (format!("{}/", rel), Vec::new())
            } else {
                (rel, fs::read(e.path()).unwrap())
            }
        })
        .collect();
    out.sort();
    out
}
