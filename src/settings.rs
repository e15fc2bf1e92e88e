use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Persisted viewer settings
// ---------------------------------------------------------------------------

const MAX_RECENT: usize = 8;

/// Viewer settings kept between sessions as JSON under the platform config
/// directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Most-recently-opened dataset roots, newest first.
    pub recent_roots: Vec<PathBuf>,
    /// Opacity of the category tint in the overlay view.
    pub overlay_alpha: f32,
    /// Optional cap on the number of images listed per split.
    pub max_images: Option<usize>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            recent_roots: Vec::new(),
            overlay_alpha: 0.5,
            max_images: None,
        }
    }
}

impl Settings {
    fn file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("voc-lens").join("settings.json"))
    }

    /// Load persisted settings, falling back to defaults on any failure.
    pub fn load() -> Settings {
        let Some(path) = Self::file_path() else {
            return Settings::default();
        };
        Self::load_from(&path)
    }

    fn load_from(path: &Path) -> Settings {
        match fs::read_to_string(path) {
            Ok(body) => serde_json::from_str(&body).unwrap_or_else(|e| {
                log::warn!("unreadable settings at {}: {e}", path.display());
                Settings::default()
            }),
            Err(_) => Settings::default(),
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::file_path().context("no config directory on this platform")?;
        self.save_to(&path)
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).context("creating config directory")?;
        }
        let body = serde_json::to_string_pretty(self).context("serializing settings")?;
        fs::write(path, body).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    /// Move `root` to the front of the recent list, dropping duplicates and
    /// anything beyond the cap.
    pub fn remember_root(&mut self, root: &Path) {
        self.recent_roots.retain(|r| r != root);
        self.recent_roots.insert(0, root.to_path_buf());
        self.recent_roots.truncate(MAX_RECENT);
    }
}
