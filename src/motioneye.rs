//! Lookup of the media directory in a motionEye configuration file.

use crate::error::PruneError;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG: &str = "/etc/motioneye/motioneye.conf";

/// The `media_path` setting from the motionEye config at `conf`.
pub fn media_path(conf: &Path) -> Result<PathBuf, PruneError> {
    let text = fs::read_to_string(conf).map_err(|err| PruneError::unavailable(conf, err))?;
    parse_media_path(&text).ok_or_else(|| PruneError::MediaPath(conf.to_path_buf()))
}

/// First line whose trimmed text starts with `media_path`; the value is
/// whatever follows the first run of whitespace.
pub fn parse_media_path(text: &str) -> Option<PathBuf> {
    text.lines()
        .map(str::trim)
        .filter(|line| line.starts_with("media_path"))
        .find_map(|line| {
            let (key, value) = line.split_once(char::is_whitespace)?;
            if key != "media_path" { return None; }
            let value = value.trim();
            (!value.is_empty()).then(|| PathBuf::from(value))
        })
}
