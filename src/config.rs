use crate::motioneye;
use crate::prune::compact::DEFAULT_MAX_DEPTH;
use crate::prune::keep::DEFAULT_KEEP_FILE;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub source: SourceConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Minimum free disk space to restore, percent (0-100)
    pub target_free_pct: u8,
    /// Path suffixes that are never deleted, e.g. ".donotdelete" or ".mkv"
    pub keep_files:      Vec<String>,
    /// Log intended deletions without touching the filesystem
    pub dry_run:         bool,
    pub verbose:         bool,
    /// Directories nested deeper than this are never compacted
    pub max_depth:       usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Media directory to prune. Unset = read media_path from the motionEye config.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root:            Option<PathBuf>,
    pub motioneye_config: PathBuf,
}

// ── Defaults ─────────────────────────────────────────────────────────

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            target_free_pct: 20,
            keep_files:      vec![DEFAULT_KEEP_FILE.into()],
            dry_run:         false,
            verbose:         false,
            max_depth:       DEFAULT_MAX_DEPTH,
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self { root: None, motioneye_config: PathBuf::from(motioneye::DEFAULT_CONFIG) }
    }
}

// ── Load / Save ───────────────────────────────────────────────────────

impl Config {
    /// Load the user's config. A missing file means defaults; a file that
    /// does not parse is an error.
    pub fn load() -> Result<Self> {
        match Config::config_path() {
            Some(path) if path.exists() => Config::load_from(&path),
            _ => Ok(Config::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let cfg: Config = toml::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        cfg.validate().with_context(|| format!("in {}", path.display()))?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.general.target_free_pct > 100 {
            anyhow::bail!("target_free_pct must be 0-100, got {}", self.general.target_free_pct);
        }
        Ok(())
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("spaceprune").join("spaceprune.toml"))
    }

    pub fn write_defaults(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let text = toml::to_string_pretty(&Config::default())?;
        fs::write(path, format!("# spaceprune configuration\n# Generated by --write-config, edit freely\n\n{}", text))
            .with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }
}
