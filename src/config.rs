use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::recent::MAX_RECENT_VIEW_ITEMS;
use crate::thumbnail::ICON_VIEW_SIZE;
use crate::utils::expand_home;

// ── Defaults ──────────────────────────────────────────────────────────────────

pub const DEFAULT_WINDOW_WIDTH: i32 = 720;
pub const DEFAULT_WINDOW_HEIGHT: i32 = 560;

// ── Config struct ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub window_width: i32,
    pub window_height: i32,
    /// Upper bound on the number of documents shown in the grid.
    pub max_items: usize,
    /// Edge length of the square thumbnail box, in pixels.
    pub icon_size: u32,
    /// Where rendered thumbnails and the metadata store live.
    pub cache_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            max_items: MAX_RECENT_VIEW_ITEMS,
            icon_size: ICON_VIEW_SIZE,
            cache_dir: default_cache_dir(),
        }
    }
}

// Raw on-disk layout. Every field is optional so a partially-edited file
// keeps working; invalid values are dropped in `apply`.

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    window: RawWindow,
    recent: RawRecent,
    cache: RawCache,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawWindow {
    width: Option<i32>,
    height: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRecent {
    max_items: Option<usize>,
    icon_size: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawCache {
    dir: Option<String>,
}

impl RawConfig {
    fn apply(self, cfg: &mut Config) {
        if let Some(v) = self.window.width.filter(|v| *v > 0) {
            cfg.window_width = v;
        }
        if let Some(v) = self.window.height.filter(|v| *v > 0) {
            cfg.window_height = v;
        }
        if let Some(v) = self.recent.max_items.filter(|v| *v > 0) {
            cfg.max_items = v;
        }
        if let Some(v) = self.recent.icon_size.filter(|v| *v > 0) {
            cfg.icon_size = v;
        }
        if let Some(dir) = self.cache.dir.filter(|d| !d.trim().is_empty()) {
            cfg.cache_dir = expand_home(dir.trim());
        }
    }
}

// ── Paths ─────────────────────────────────────────────────────────────────────

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| expand_home("~/.config"))
        .join("docshelf")
        .join("docshelf.toml")
}

pub fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| expand_home("~/.cache"))
        .join("docshelf")
}

// ── Load ──────────────────────────────────────────────────────────────────────

/// Loads the config from `path`, creating the file with defaults if it does
/// not exist. A file that fails to parse is reported and the defaults are
/// used instead.
pub fn load(path: &Path) -> Config {
    if !path.exists() {
        if let Some(dir) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(dir) {
                log::warn!("cannot create config dir {}: {e}", dir.display());
            }
        }
        if let Err(e) = std::fs::write(path, default_toml()) {
            log::warn!("cannot write default config {}: {e}", path.display());
        }
        return Config::default();
    }

    let content = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            log::warn!("cannot read config {}: {e}", path.display());
            return Config::default();
        }
    };

    parse(&content).unwrap_or_else(|e| {
        log::warn!("{}: {e}; using defaults", path.display());
        Config::default()
    })
}

pub fn parse(content: &str) -> crate::error::Result<Config> {
    let raw: RawConfig = toml::from_str(content)?;
    let mut cfg = Config::default();
    raw.apply(&mut cfg);
    Ok(cfg)
}

// ── Default TOML template ─────────────────────────────────────────────────────

fn default_toml() -> String {
    format!(
        r#"# docshelf configuration
# All values are optional; missing keys fall back to the built-in defaults.

[window]
# Width and height of the start window in pixels.
width  = {width}
height = {height}

[recent]
# Maximum number of recent documents shown.
max_items = {max}
# Size of the square box thumbnails are scaled into.
icon_size = {icon}

[cache]
# Directory holding rendered thumbnails and their metadata.
# dir = "~/.cache/docshelf"
"#,
        width = DEFAULT_WINDOW_WIDTH,
        height = DEFAULT_WINDOW_HEIGHT,
        max = MAX_RECENT_VIEW_ITEMS,
        icon = ICON_VIEW_SIZE,
    )
}
