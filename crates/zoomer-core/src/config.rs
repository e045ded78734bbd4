use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::specificity::ComponentMask;

/// User settings loaded from `~/.config/zoomer/config.toml`.
///
/// The component toggles decide which URL parts a *new* preference is
/// anchored to; records keep the mask they were written with even if these
/// settings change later.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Verbose diagnostics (lowers the default log filter to debug).
    #[serde(default)]
    pub debug_mode: bool,
    /// Default zoom in percent; a zoom change back to this value deletes the
    /// stored preference instead of writing one.
    pub default_zoom: u32,
    /// Anchor new preferences to the URL path.
    pub include_path: bool,
    /// Anchor new preferences to the query string.
    pub include_query: bool,
    /// Anchor new preferences to the fragment.
    pub include_fragment: bool,
    /// Maximum stored records before eviction kicks in.
    pub storage_limit: u64,
    /// Percentage of records (1-100) evicted per purge.
    pub purge_percentage: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug_mode: false,
            default_zoom: 100,
            include_path: true,
            include_query: false,
            include_fragment: false,
            storage_limit: 10_000,
            purge_percentage: 10,
        }
    }
}

impl Settings {
    /// The component mask captured onto newly written records.
    pub fn component_mask(&self) -> ComponentMask {
        ComponentMask::from_options(self.include_path, self.include_query, self.include_fragment)
    }

    /// Default zoom as a decimal factor (100 -> 1.0).
    pub fn default_zoom_factor(&self) -> f64 {
        self.default_zoom as f64 / 100.0
    }

    /// Reject settings the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.purge_percentage == 0 || self.purge_percentage > 100 {
            anyhow::bail!(
                "purge_percentage must be between 1 and 100, got {}",
                self.purge_percentage
            );
        }
        if self.default_zoom == 0 {
            anyhow::bail!("default_zoom must be a positive percentage");
        }
        Ok(())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("zoomer")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load settings from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<Settings> {
    let path = config_path()?;
    if !path.exists() {
        let defaults = Settings::default();
        let toml = toml::to_string_pretty(&defaults)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(defaults);
    }

    let data = fs::read_to_string(&path)?;
    let settings: Settings = toml::from_str(&data)?;
    settings.validate()?;
    Ok(settings)
}
