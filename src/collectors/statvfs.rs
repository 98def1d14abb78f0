use crate::error::PruneError;
use crate::models::volume::VolumeStats;
use std::path::Path;

/// Source of volume statistics for a path.
pub trait SpaceProbe {
    fn stats(&self, path: &Path) -> Result<VolumeStats, PruneError>;

    fn free_pct(&self, path: &Path) -> Result<f64, PruneError> {
        Ok(self.stats(path)?.free_pct())
    }

    fn free_bytes(&self, path: &Path) -> Result<u64, PruneError> {
        Ok(self.stats(path)?.free_bytes())
    }

    fn bytes_to_target(&self, path: &Path, target_pct: f64) -> Result<u64, PruneError> {
        Ok(self.stats(path)?.bytes_to_target(target_pct))
    }
}

/// Reads the live volume with statvfs(3).
#[derive(Debug, Clone, Copy, Default)]
pub struct Statvfs;

impl SpaceProbe for Statvfs {
    fn stats(&self, path: &Path) -> Result<VolumeStats, PruneError> {
        use nix::sys::statvfs::statvfs;
        let stat = statvfs(path)
            .map_err(|errno| PruneError::unavailable(path, std::io::Error::from(errno)))?;

        Ok(VolumeStats {
            total_blocks:     stat.blocks() as u64,
            free_blocks:      stat.blocks_free() as u64,
            available_blocks: stat.blocks_available() as u64,
            block_size:       stat.fragment_size() as u64,
        })
    }
}

/// A probe that always answers with the same numbers.
#[derive(Debug, Clone, Copy)]
pub struct FixedProbe(pub VolumeStats);

impl SpaceProbe for FixedProbe {
    fn stats(&self, _path: &Path) -> Result<VolumeStats, PruneError> {
        Ok(self.0)
    }
}
