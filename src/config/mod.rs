//! Overlay configuration: loaded once at startup from a RON file.
//!
//! Missing file means defaults. A broken file is reported and also falls back
//! to defaults, so a typo in the config never disables the overlay silently.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::shared::*;

pub const DEFAULT_CONFIG_PATH: &str = "assets/config/overlay.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// Words the tooltip composer stitches together. Localization lives with the
/// host; these are the strings it hands over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipStrings {
    pub days: String,
    pub day_unit: String,
    pub hour_unit: String,
    pub minute_unit: String,
    pub days_to_mature: String,
    pub ready_to_harvest: String,
    pub with: String,
    pub unknown_fertilizer: String,
    pub stump: String,
    pub fertilized: String,
    pub wheat: String,
    pub beets: String,
    pub unmilled_rice: String,
}

impl Default for TooltipStrings {
    fn default() -> Self {
        Self {
            days: "days".into(),
            day_unit: "d".into(),
            hour_unit: "h".into(),
            minute_unit: "m".into(),
            days_to_mature: "days to mature".into(),
            ready_to_harvest: "Ready to harvest".into(),
            with: "with".into(),
            unknown_fertilizer: "Unknown Fertilizer".into(),
            stump: "stump".into(),
            fertilized: "fertilized".into(),
            wheat: "wheat".into(),
            beets: "beets".into(),
            unmilled_rice: "unmilled rice".into(),
        }
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Initial state of the crop and machine time overlay.
    pub enabled: bool,
    /// Aim and target are refreshed on every Nth update tick.
    pub poll_interval_ticks: u32,
    pub strings: TooltipStrings,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            poll_interval_ticks: DEFAULT_POLL_INTERVAL_TICKS,
            strings: TooltipStrings::default(),
        }
    }
}

impl OverlayConfig {
    pub fn from_ron_str(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let mut config: OverlayConfig = ron::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        // 0 would mean "never poll"; treat it as every tick.
        config.poll_interval_ticks = config.poll_interval_ticks.max(1);
        Ok(config)
    }

    /// `Ok(None)` when the file does not exist.
    pub fn load(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&text, path).map(Some)
    }

    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(Some(config)) => {
                info!("[Config] Loaded overlay config from {}", path.display());
                config
            }
            Ok(None) => {
                info!("[Config] No overlay config at {}, using defaults", path.display());
                Self::default()
            }
            Err(err) => {
                warn!("[Config] {}; using defaults", err);
                Self::default()
            }
        }
    }
}

pub struct ConfigPlugin {
    pub path: PathBuf,
}

impl Default for ConfigPlugin {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }
}

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(OverlayConfig::load_or_default(&self.path));
    }
}
