use crate::error::PruneError;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Marker file that shields itself from deletion.
pub const DEFAULT_KEEP_FILE: &str = ".donotdelete";

/// Path suffixes that are never deleted or compacted.
///
/// Matching is plain string suffix containment on the full path, so both
/// `".donotdelete"` and an extension such as `".mkv"` work as patterns.
/// Empty patterns are dropped, since they would match every path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct KeepList {
    patterns: Vec<String>,
}

impl KeepList {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = KeepList::default();
        list.extend(patterns);
        list
    }

    /// The run's keep-list: `base`, the root itself, and the name of every
    /// entry directly under the root, so first-level directories survive
    /// compaction even when emptied. Built once; later changes to the root
    /// are not picked up.
    pub fn for_root(base: &[String], root: &Path) -> Result<Self, PruneError> {
        let mut list = KeepList::new(base.iter().cloned());
        list.extend([root.to_string_lossy().into_owned()]);

        let children = fs::read_dir(root).map_err(|source| PruneError::Enumeration {
            path: root.to_path_buf(),
            source,
        })?;
        list.extend(
            children
                .flatten()
                .map(|entry| entry.file_name().to_string_lossy().into_owned()),
        );
        Ok(list)
    }

    pub fn extend<I, S>(&mut self, patterns: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for p in patterns {
            let p = p.into();
            if !p.is_empty() && !self.patterns.contains(&p) {
                self.patterns.push(p);
            }
        }
    }

    pub fn is_protected(&self, path: &Path) -> bool {
        let path = path.to_string_lossy();
        self.patterns.iter().any(|p| path.ends_with(p.as_str()))
    }

    pub fn patterns(&self) -> &[String] { &self.patterns }
    pub fn len(&self) -> usize { self.patterns.len() }
    pub fn is_empty(&self) -> bool { self.patterns.is_empty() }
}
