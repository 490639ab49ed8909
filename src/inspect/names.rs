//! Display-name resolution with two independent caches.
//!
//! The direct store memoizes registry lookups, misses included. The
//! custom-crop store memoizes content-pack answers, keyed by the pack's full
//! crop id, and only ever holds successes so a flaky pack is retried.

use bevy::prelude::*;
use std::collections::{HashMap, HashSet};

use crate::content::{guarded, CropPluginError, CustomCropSource};
use crate::shared::*;

use super::maturity::{Estimate, Label};

/// Key used when the pack cannot even tell us which crop it is.
const UNKNOWN_CROP_KEY: &str = "unknownCrop";

/// Remembers which error messages a session has already emitted.
#[derive(Debug, Default)]
pub struct LogOnce {
    emitted: HashSet<String>,
}

impl LogOnce {
    /// `true` the first time `message` is seen.
    pub fn first_time(&mut self, message: &str) -> bool {
        if self.emitted.contains(message) {
            return false;
        }
        self.emitted.insert(message.to_string());
        true
    }

    pub fn error(&mut self, message: &str) {
        if self.first_time(message) {
            error!("{}", message);
        }
    }
}

/// Names gathered for one estimate, looked up by the composer. A registry
/// item the registry has no usable name for is stored as an empty string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedNames {
    names: HashMap<Label, String>,
}

impl ResolvedNames {
    pub fn get(&self, label: &Label) -> Option<&str> {
        self.names.get(label).map(String::as_str)
    }

    pub fn insert(&mut self, label: Label, name: String) {
        self.names.insert(label, name);
    }
}

#[derive(Debug, Default)]
pub struct NameResolutionCache {
    direct: HashMap<ItemId, Option<String>>,
    custom_crops: HashMap<String, String>,
}

impl NameResolutionCache {
    /// Registry name for `id`. The first call per id hits the registry; the
    /// answer is stored even when the registry does not know the id.
    pub fn resolve_direct<S: ItemNameSource + ?Sized>(
        &mut self,
        id: &str,
        registry: &S,
    ) -> Option<&str> {
        self.direct
            .entry(id.to_string())
            .or_insert_with(|| registry.lookup_name(id))
            .as_deref()
    }

    /// Harvest name of a content-pack crop, or `None` when the pack does not
    /// know it, has nothing to say, or fails.
    pub fn resolve_via_plugin(
        &mut self,
        crop: &Crop,
        source: Option<&dyn CustomCropSource>,
        log: &mut LogOnce,
    ) -> Option<String> {
        let source = source?;

        let claimed = match guarded(|| Ok(source.is_custom_crop(crop))) {
            Ok(claimed) => claimed,
            Err(err) => {
                report_plugin_failure(UNKNOWN_CROP_KEY, &err, log);
                return None;
            }
        };
        if !claimed {
            return None;
        }

        let full_id = match guarded(|| source.full_id(crop)) {
            Ok(id) => id,
            Err(err) => {
                report_plugin_failure(UNKNOWN_CROP_KEY, &err, log);
                return None;
            }
        };

        if let Some(name) = self.custom_crops.get(&full_id) {
            return Some(name.clone());
        }

        match guarded(|| source.harvest_item(crop)) {
            Ok(Some(harvest)) => {
                self.custom_crops.insert(full_id, harvest.display_name.clone());
                Some(harvest.display_name)
            }
            Ok(None) => {
                debug!("[Inspect] Custom crop {} has no harvest item", full_id);
                None
            }
            Err(err) => {
                report_plugin_failure(&full_id, &err, log);
                None
            }
        }
    }

    /// Resolves every label `estimate` refers to.
    pub fn resolve_labels<S: ItemNameSource + ?Sized>(
        &mut self,
        estimate: &Estimate,
        registry: &S,
        plugin: Option<&dyn CustomCropSource>,
        log: &mut LogOnce,
    ) -> ResolvedNames {
        let mut resolved = ResolvedNames::default();
        for label in estimate.labels() {
            let name = match &label {
                Label::Item(id) => Some(
                    self.resolve_direct(id, registry)
                        .unwrap_or_default()
                        .to_string(),
                ),
                Label::CustomCropHarvest(crop) => self.resolve_via_plugin(crop, plugin, log),
            };
            if let Some(name) = name {
                resolved.insert(label, name);
            }
        }
        resolved
    }

    pub fn clear(&mut self) {
        self.direct.clear();
        self.custom_crops.clear();
    }

    pub fn direct_len(&self) -> usize {
        self.direct.len()
    }

    pub fn custom_len(&self) -> usize {
        self.custom_crops.len()
    }
}

fn report_plugin_failure(crop_key: &str, err: &CropPluginError, log: &mut LogOnce) {
    log.error(&format!(
        "[Inspect] Failed to resolve harvest name for custom crop {}",
        crop_key
    ));
    debug!("[Inspect] Custom crop {} lookup error: {}", crop_key, err);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::CustomHarvest;
    use crate::inspect::maturity::{EstimateLine, MaturityResult};
    use std::cell::Cell;
    use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

    struct CountingRegistry {
        lookups: Cell<u32>,
    }

    impl ItemNameSource for CountingRegistry {
        fn lookup_name(&self, id: &str) -> Option<String> {
            self.lookups.set(self.lookups.get() + 1);
            match id {
                "parsnip" => Some("Parsnip".into()),
                "blank" => Some(String::new()),
                _ => None,
            }
        }
    }

    /// Content pack that fails until `healthy` is set.
    struct FlakyPack {
        healthy: AtomicBool,
        harvest_calls: AtomicU32,
    }

    impl FlakyPack {
        fn new(healthy: bool) -> Self {
            Self {
                healthy: AtomicBool::new(healthy),
                harvest_calls: AtomicU32::new(0),
            }
        }
    }

    impl CustomCropSource for FlakyPack {
        fn is_custom_crop(&self, crop: &Crop) -> bool {
            crop.seed_id.starts_with("pack.")
        }

        fn full_id(&self, crop: &Crop) -> Result<String, CropPluginError> {
            Ok(crop.seed_id.clone())
        }

        fn harvest_item(&self, _crop: &Crop) -> Result<Option<CustomHarvest>, CropPluginError> {
            self.harvest_calls.fetch_add(1, Ordering::SeqCst);
            if self.healthy.load(Ordering::SeqCst) {
                Ok(Some(CustomHarvest {
                    item_id: "pack.blue_rose".into(),
                    display_name: "Blue Rose".into(),
                }))
            } else {
                Err(CropPluginError::Lookup("registry not ready".into()))
            }
        }
    }

    struct PanickingPack;

    impl CustomCropSource for PanickingPack {
        fn is_custom_crop(&self, _crop: &Crop) -> bool {
            true
        }

        fn full_id(&self, _crop: &Crop) -> Result<String, CropPluginError> {
            panic!("id table corrupted")
        }

        fn harvest_item(&self, _crop: &Crop) -> Result<Option<CustomHarvest>, CropPluginError> {
            Ok(None)
        }
    }

    struct EmptyHarvestPack;

    impl CustomCropSource for EmptyHarvestPack {
        fn is_custom_crop(&self, _crop: &Crop) -> bool {
            true
        }

        fn full_id(&self, crop: &Crop) -> Result<String, CropPluginError> {
            Ok(crop.seed_id.clone())
        }

        fn harvest_item(&self, _crop: &Crop) -> Result<Option<CustomHarvest>, CropPluginError> {
            Ok(None)
        }
    }

    fn pack_crop() -> Crop {
        Crop {
            seed_id: "pack.blue_rose_seeds".into(),
            phase_days: vec![2, 2],
            current_phase: 0,
            day_of_current_phase: 0,
            fully_grown: false,
            dead: false,
            harvest: CropHarvest::External,
        }
    }

    #[test]
    fn test_direct_lookup_hits_registry_once() {
        let registry = CountingRegistry { lookups: Cell::new(0) };
        let mut cache = NameResolutionCache::default();
        assert_eq!(cache.resolve_direct("parsnip", &registry), Some("Parsnip"));
        assert_eq!(cache.resolve_direct("parsnip", &registry), Some("Parsnip"));
        assert_eq!(registry.lookups.get(), 1);
    }

    #[test]
    fn test_unknown_direct_ids_are_cached_as_misses() {
        let registry = CountingRegistry { lookups: Cell::new(0) };
        let mut cache = NameResolutionCache::default();
        assert_eq!(cache.resolve_direct("mod.mystery_fert", &registry), None);
        assert_eq!(cache.resolve_direct("mod.mystery_fert", &registry), None);
        assert_eq!(registry.lookups.get(), 1);
        assert_eq!(cache.direct_len(), 1);
    }

    #[test]
    fn test_unknown_item_label_resolves_to_empty_name() {
        let registry = CountingRegistry { lookups: Cell::new(0) };
        let mut cache = NameResolutionCache::default();
        let mut log = LogOnce::default();
        let estimate = Estimate {
            lines: vec![EstimateLine::Fertilizer {
                ids: vec!["mod.mystery_fert".into()],
                beside_crop: false,
            }],
        };
        let names = cache.resolve_labels(&estimate, &registry, None, &mut log);
        assert_eq!(names.get(&Label::Item("mod.mystery_fert".into())), Some(""));
    }

    #[test]
    fn test_empty_direct_names_are_cached_too() {
        let registry = CountingRegistry { lookups: Cell::new(0) };
        let mut cache = NameResolutionCache::default();
        assert_eq!(cache.resolve_direct("blank", &registry), Some(""));
        assert_eq!(cache.resolve_direct("blank", &registry), Some(""));
        assert_eq!(registry.lookups.get(), 1);
    }

    #[test]
    fn test_plugin_failure_is_not_cached_and_retries() {
        let pack = FlakyPack::new(false);
        let mut cache = NameResolutionCache::default();
        let mut log = LogOnce::default();
        let crop = pack_crop();

        assert_eq!(cache.resolve_via_plugin(&crop, Some(&pack), &mut log), None);
        assert_eq!(cache.resolve_via_plugin(&crop, Some(&pack), &mut log), None);
        assert_eq!(pack.harvest_calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.custom_len(), 0);

        pack.healthy.store(true, Ordering::SeqCst);
        assert_eq!(
            cache.resolve_via_plugin(&crop, Some(&pack), &mut log).as_deref(),
            Some("Blue Rose")
        );
        assert_eq!(
            cache.resolve_via_plugin(&crop, Some(&pack), &mut log).as_deref(),
            Some("Blue Rose")
        );
        assert_eq!(pack.harvest_calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_plugin_failure_leaves_direct_store_alone() {
        let registry = CountingRegistry { lookups: Cell::new(0) };
        let pack = FlakyPack::new(false);
        let mut cache = NameResolutionCache::default();
        let mut log = LogOnce::default();

        cache.resolve_direct("parsnip", &registry);
        assert_eq!(cache.resolve_via_plugin(&pack_crop(), Some(&pack), &mut log), None);
        assert_eq!(cache.resolve_direct("parsnip", &registry), Some("Parsnip"));
        assert_eq!(registry.lookups.get(), 1);
        assert_eq!(cache.direct_len(), 1);
        assert_eq!(cache.custom_len(), 0);
    }

    #[test]
    fn test_successful_plugin_names_stay_out_of_direct_store() {
        let pack = FlakyPack::new(true);
        let mut cache = NameResolutionCache::default();
        let mut log = LogOnce::default();
        cache.resolve_via_plugin(&pack_crop(), Some(&pack), &mut log);
        assert_eq!(cache.custom_len(), 1);
        assert_eq!(cache.direct_len(), 0);
    }

    #[test]
    fn test_plugin_panic_is_contained() {
        let mut cache = NameResolutionCache::default();
        let mut log = LogOnce::default();
        assert_eq!(cache.resolve_via_plugin(&pack_crop(), Some(&PanickingPack), &mut log), None);
        // Logged once under the unknown-crop key.
        assert!(!log.first_time("[Inspect] Failed to resolve harvest name for custom crop unknownCrop"));
    }

    #[test]
    fn test_missing_harvest_returns_none_uncached() {
        let mut cache = NameResolutionCache::default();
        let mut log = LogOnce::default();
        assert_eq!(cache.resolve_via_plugin(&pack_crop(), Some(&EmptyHarvestPack), &mut log), None);
        assert_eq!(cache.custom_len(), 0);
    }

    #[test]
    fn test_unclaimed_crop_and_missing_pack() {
        let pack = FlakyPack::new(true);
        let mut cache = NameResolutionCache::default();
        let mut log = LogOnce::default();
        let mut base = pack_crop();
        base.seed_id = "parsnip_seeds".into();
        assert_eq!(cache.resolve_via_plugin(&base, Some(&pack), &mut log), None);
        assert_eq!(pack.harvest_calls.load(Ordering::SeqCst), 0);
        assert_eq!(cache.resolve_via_plugin(&pack_crop(), None, &mut log), None);
    }

    #[test]
    fn test_log_once_reports_each_message_once() {
        let mut log = LogOnce::default();
        assert!(log.first_time("a"));
        assert!(!log.first_time("a"));
        assert!(log.first_time("b"));
    }

    #[test]
    fn test_resolve_labels_collects_both_stores() {
        let registry = CountingRegistry { lookups: Cell::new(0) };
        let pack = FlakyPack::new(true);
        let mut cache = NameResolutionCache::default();
        let mut log = LogOnce::default();
        let crop = pack_crop();
        let estimate = Estimate {
            lines: vec![
                EstimateLine::Harvest {
                    label: Label::CustomCropHarvest(crop.clone()),
                    maturity: MaturityResult::CountdownDays(4),
                },
                EstimateLine::Fertilizer {
                    ids: vec!["parsnip".into()],
                    beside_crop: true,
                },
            ],
        };

        let names = cache.resolve_labels(&estimate, &registry, Some(&pack), &mut log);
        assert_eq!(names.get(&Label::CustomCropHarvest(crop)), Some("Blue Rose"));
        assert_eq!(names.get(&Label::Item("parsnip".into())), Some("Parsnip"));
    }

    #[test]
    fn test_clear_empties_both_stores() {
        let registry = CountingRegistry { lookups: Cell::new(0) };
        let pack = FlakyPack::new(true);
        let mut cache = NameResolutionCache::default();
        let mut log = LogOnce::default();
        cache.resolve_direct("parsnip", &registry);
        cache.resolve_via_plugin(&pack_crop(), Some(&pack), &mut log);
        cache.clear();
        assert_eq!(cache.direct_len() + cache.custom_len(), 0);
    }
}
