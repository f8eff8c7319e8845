//! # Configuration
//!
//! Guard configuration is loaded with [`confique`], layered in priority order:
//! 1. **Environment variables**: `SAFETITLE_TITLE_SELECTOR`, `SAFETITLE_TOOLTIP_PLACEMENT`.
//! 2. **Config file**: `safetitle.toml` in the directory passed to [`GuardConfig::load`].
//! 3. **Compiled defaults**: via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `title_selector` | `div.inline-title` | Where the title lives inside a view |
//! | `confirm_keys` | `["Enter", "Tab", "ArrowDown"]` | Keys that commit a title edit |
//! | `tooltip_classes` | `["mod-error", "mod-wide"]` | Classes for the error tooltip |
//! | `tooltip_placement` | `bottom` | Tooltip position relative to the title |

use crate::constants::{
    KEYDOWN_INTERCEPTS, TITLE_QUERY_SELECTOR, TOOLTIP_CLASSES, TOOLTIP_PLACEMENT,
};
use crate::error::{Result, SafeTitleError};
use crate::host::TooltipOptions;
use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_FILENAME: &str = "safetitle.toml";

/// Settings for [`crate::guard::TitleGuard`], stored in `safetitle.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GuardConfig {
    /// Selector used to find the title element inside a view.
    #[config(default = "div.inline-title", env = "SAFETITLE_TITLE_SELECTOR")]
    pub title_selector: String,

    /// Keys that commit the title. `Escape` aborts the edit in the host, so
    /// it does not belong here.
    #[config(default = ["Enter", "Tab", "ArrowDown"])]
    pub confirm_keys: Vec<String>,

    #[config(default = ["mod-error", "mod-wide"])]
    pub tooltip_classes: Vec<String>,

    #[config(default = "bottom", env = "SAFETITLE_TOOLTIP_PLACEMENT")]
    pub tooltip_placement: String,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            title_selector: TITLE_QUERY_SELECTOR.to_string(),
            confirm_keys: KEYDOWN_INTERCEPTS.iter().map(|k| k.to_string()).collect(),
            tooltip_classes: TOOLTIP_CLASSES.iter().map(|c| c.to_string()).collect(),
            tooltip_placement: TOOLTIP_PLACEMENT.to_string(),
        }
    }
}

impl GuardConfig {
    /// Loads config from the environment and `safetitle.toml` in `config_dir`.
    /// A missing file is not an error.
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        Self::builder()
            .env()
            .file(config_dir.as_ref().join(CONFIG_FILENAME))
            .load()
            .map_err(|e| SafeTitleError::Config(e.to_string()))
    }

    pub fn is_confirm_key(&self, key: &str) -> bool {
        self.confirm_keys.iter().any(|k| k == key)
    }

    pub fn tooltip_options(&self) -> TooltipOptions {
        TooltipOptions {
            classes: self.tooltip_classes.clone(),
            placement: self.tooltip_placement.clone(),
        }
    }
}
