use crate::error::PruneError;
use crate::models::entry::FileEntry;
use std::fs;
use std::path::Path;
use tracing::warn;
use walkdir::WalkDir;

/// Every regular file under `root`, oldest modification time first.
///
/// Ties are broken by path so repeated runs over an unchanged tree agree.
/// Symlinks are neither followed nor yielded. Entries that cannot be read
/// are skipped with a warning; only an unreadable root is an error.
pub fn list_oldest_first(root: &Path) -> Result<Vec<FileEntry>, PruneError> {
    fs::read_dir(root).map_err(|source| PruneError::Enumeration {
        path: root.to_path_buf(),
        source,
    })?;

    let mut entries = Vec::new();
    for result in WalkDir::new(root).follow_links(false) {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                warn!("skipping unreadable entry: {}", err);
                continue;
            }
        };
        if !entry.file_type().is_file() { continue; }

        let meta = match entry.metadata() {
            Ok(meta) => meta,
            Err(err) => {
                warn!(path = %entry.path().display(), "could not stat: {}", err);
                continue;
            }
        };
        let modified = match meta.modified() {
            Ok(t) => t,
            Err(err) => {
                warn!(path = %entry.path().display(), "no modification time: {}", err);
                continue;
            }
        };

        entries.push(FileEntry { path: entry.into_path(), modified, size: meta.len() });
    }

    entries.sort_by(|a, b| a.modified.cmp(&b.modified).then_with(|| a.path.cmp(&b.path)));
    Ok(entries)
}
