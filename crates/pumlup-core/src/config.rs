//! Run settings: where the store and config file live, which endpoints to ask
//! and which file names count as the artifact.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::artifact::ArtifactPattern;

pub const DEFAULT_GITHUB_RELEASES_URL: &str =
    "https://api.github.com/repos/plantuml/plantuml/releases";
pub const DEFAULT_FEED_URL: &str = "https://sourceforge.net/projects/plantuml.mirror/rss";

/// Settings loaded from `~/.config/pumlup/config.toml`.
///
/// Relative paths are resolved against the working directory of the process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory holding the downloaded jar(s).
    pub resources_dir: PathBuf,
    /// Line-oriented `key=value` file whose key is rewritten.
    pub ini_file: PathBuf,
    /// Key naming the jar in `ini_file`.
    pub config_key: String,
    /// GitHub releases listing (primary source).
    pub github_releases_url: String,
    /// RSS feed consulted when the primary source has no match.
    pub feed_url: String,
    /// Sent with every request; GitHub requires one.
    pub user_agent: String,
    pub artifact: ArtifactPattern,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            resources_dir: PathBuf::from("resources"),
            ini_file: PathBuf::from("plantumlwebview.ini"),
            config_key: "jar".to_string(),
            github_releases_url: DEFAULT_GITHUB_RELEASES_URL.to_string(),
            feed_url: DEFAULT_FEED_URL.to_string(),
            user_agent: concat!("pumlup/", env!("CARGO_PKG_VERSION")).to_string(),
            artifact: ArtifactPattern::default(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("pumlup")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load settings from the XDG config file, creating a default file if none exists.
pub fn load_or_init() -> Result<Settings> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = Settings::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(&path)
}

/// Load settings from an explicit file. Missing keys take their defaults.
pub fn load_from(path: &Path) -> Result<Settings> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let cfg: Settings =
        toml::from_str(&data).with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}
