use std::path::PathBuf;
use std::time::SystemTime;

/// One regular file seen during enumeration.
///
/// A snapshot taken once when the tree was walked: the file may be gone or
/// rewritten by the time it is acted on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path:     PathBuf,
    pub modified: SystemTime,
    pub size:     u64,
}

impl FileEntry {
    /// Modification time in local time, for log lines.
    pub fn modified_local(&self) -> String {
        chrono::DateTime::<chrono::Local>::from(self.modified)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
    }
}
