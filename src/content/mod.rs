//! Content-pack boundary: crops defined outside the base item registry.
//!
//! The host installs a [`CustomCropSource`] into [`CustomCropProvider`] when an
//! extension is loaded. Every call into it can fail or panic; callers go through
//! [`guarded`] so a broken pack never takes the frame down with it.

use bevy::prelude::*;
use std::panic::{self, AssertUnwindSafe};
use thiserror::Error;

use crate::shared::*;

#[derive(Debug, Error)]
pub enum CropPluginError {
    #[error("crop is not registered with the content pack: {0}")]
    UnknownCrop(String),
    #[error("content pack lookup failed: {0}")]
    Lookup(String),
    #[error("content pack panicked: {0}")]
    Panicked(String),
}

/// Harvest item as reported by the content pack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomHarvest {
    pub item_id: String,
    pub display_name: String,
}

pub trait CustomCropSource: Send + Sync + 'static {
    /// Whether this crop belongs to the pack at all.
    fn is_custom_crop(&self, crop: &Crop) -> bool;

    /// Fully qualified crop id, e.g. `"pack.author/blue_rose"`.
    fn full_id(&self, crop: &Crop) -> Result<String, CropPluginError>;

    fn harvest_item(&self, crop: &Crop) -> Result<Option<CustomHarvest>, CropPluginError>;
}

/// The installed content pack, if any.
#[derive(Resource, Default)]
pub struct CustomCropProvider {
    pub source: Option<Box<dyn CustomCropSource>>,
}

impl CustomCropProvider {
    pub fn new(source: impl CustomCropSource) -> Self {
        Self {
            source: Some(Box::new(source)),
        }
    }

    pub fn get(&self) -> Option<&dyn CustomCropSource> {
        self.source.as_deref()
    }
}

/// Runs one content-pack call, folding a panic into [`CropPluginError::Panicked`].
pub fn guarded<T>(
    call: impl FnOnce() -> Result<T, CropPluginError>,
) -> Result<T, CropPluginError> {
    match panic::catch_unwind(AssertUnwindSafe(call)) {
        Ok(result) => result,
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "non-string panic payload".to_string());
            Err(CropPluginError::Panicked(message))
        }
    }
}
