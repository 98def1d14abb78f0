use serde::Serialize;

/// Block counts for the volume holding a path, as reported by statvfs.
///
/// Never cached: every query re-reads the volume, since deletions change it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VolumeStats {
    pub total_blocks:     u64,
    pub free_blocks:      u64,
    /// Blocks available to an unprivileged process (excludes the root reserve).
    pub available_blocks: u64,
    /// Fragment size; the unit all block counts are expressed in.
    pub block_size:       u64,
}

impl VolumeStats {
    pub fn used_blocks(&self) -> u64 {
        self.total_blocks.saturating_sub(self.free_blocks)
    }

    pub fn total_bytes(&self) -> u64 {
        self.total_blocks.saturating_mul(self.block_size)
    }

    pub fn free_bytes(&self) -> u64 {
        self.available_blocks.saturating_mul(self.block_size)
    }

    /// Share of the user-addressable blocks still available, 0..=100.
    ///
    /// Reserved blocks are left out of the denominator, so a volume whose
    /// reserve is untouched but whose user space is exhausted reads as 0.
    pub fn free_pct(&self) -> f64 {
        let addressable = self.used_blocks() + self.available_blocks;
        if addressable == 0 { return 0.0; }
        (self.available_blocks as f64 * 100.0 / addressable as f64).clamp(0.0, 100.0)
    }

    pub fn is_full(&self) -> bool {
        self.free_pct() == 0.0
    }

    /// Bytes that must be released to lift the free share to `target_pct`.
    /// Zero when the target is already met.
    pub fn bytes_to_target(&self, target_pct: f64) -> u64 {
        let deficit = target_pct - self.free_pct();
        if deficit <= 0.0 { return 0; }
        (deficit * self.total_bytes() as f64 / 100.0).ceil() as u64
    }
}
