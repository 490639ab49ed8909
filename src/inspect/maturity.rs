//! Maturity estimation: how long until a crop, tree or machine is done.
//!
//! Pure functions over a [`ClassifiedTarget`]. Names are never resolved here;
//! every line carries [`Label`]s that the name cache fills in afterwards.

use crate::shared::*;
use super::target::ClassifiedTarget;

/// Time-remaining or progress state of one entity. Carries no names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaturityResult {
    Ready,
    CountdownDays(u32),
    CountdownDaysHours { days: u32, hours: u32 },
    CountdownHoursMinutes { hours: u32, minutes: u32 },
    ProgressStage { current: u8, max: u8 },
    None,
}

/// A display name still to be looked up.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Label {
    /// Primary registry item.
    Item(ItemId),
    /// Harvest of a content-pack crop; the crop is what the pack is asked about.
    CustomCropHarvest(Crop),
}

/// Raw materials a mill accepts, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MillMaterial {
    Wheat,
    Beet,
    UnmilledRice,
}

impl MillMaterial {
    pub const ALL: [MillMaterial; 3] =
        [MillMaterial::Wheat, MillMaterial::Beet, MillMaterial::UnmilledRice];

    /// Exact item name matched against input stacks.
    pub fn item_name(&self) -> &'static str {
        match self {
            MillMaterial::Wheat => "Wheat",
            MillMaterial::Beet => "Beet",
            MillMaterial::UnmilledRice => "Unmilled Rice",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EstimateLine {
    /// `count` of a raw material waiting in a building's input.
    Tally { material: MillMaterial, count: u32 },
    /// Name and maturity on one line ("Parsnip: 3 days").
    Harvest { label: Label, maturity: MaturityResult },
    /// Name on one line, maturity below it. `MaturityResult::None` shows the name alone.
    Processing { label: Label, maturity: MaturityResult },
    Fertilizer { ids: Vec<ItemId>, beside_crop: bool },
    Tree {
        species: TreeSpecies,
        progress: MaturityResult,
        stump: bool,
        fertilized: bool,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Estimate {
    pub lines: Vec<EstimateLine>,
}

impl Estimate {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Every name the composer will need, first occurrence order, no duplicates.
    pub fn labels(&self) -> Vec<Label> {
        let mut labels: Vec<Label> = Vec::new();
        let mut push = |label: Label| {
            if !labels.contains(&label) {
                labels.push(label);
            }
        };
        for line in &self.lines {
            match line {
                EstimateLine::Harvest { label, .. } | EstimateLine::Processing { label, .. } => {
                    push(label.clone())
                }
                EstimateLine::Fertilizer { ids, .. } => {
                    for id in ids {
                        push(Label::Item(id.clone()));
                    }
                }
                EstimateLine::Tally { .. } | EstimateLine::Tree { .. } => {}
            }
        }
        labels
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Time math
// ─────────────────────────────────────────────────────────────────────────────

/// Converts a machine's minutes-remaining counter into days/hours or hours/minutes.
///
/// A processing day is 1600 minutes: 20 daytime hours at 60 minutes each,
/// then the night at 100 minutes per hour. Real day boundaries depend on when
/// the farmer sleeps, so this is a fixed approximation, never a simulation.
pub fn minutes_to_duration(time_left: u32) -> MaturityResult {
    if time_left >= MINUTES_PER_DAY {
        let days = time_left / MINUTES_PER_DAY;
        let rest = time_left % MINUTES_PER_DAY;
        let hours = if rest <= DAYTIME_MINUTES {
            rest / 60
        } else {
            DAYTIME_HOURS + (rest - DAYTIME_MINUTES) / NIGHT_MINUTES_PER_HOUR
        };
        MaturityResult::CountdownDaysHours { days, hours }
    } else {
        MaturityResult::CountdownHoursMinutes {
            hours: time_left / 60,
            minutes: time_left % 60,
        }
    }
}

/// Days until the crop can be harvested.
///
/// `phase_days` lists growth phases only; a mature crop sits at
/// `current_phase == phase_days.len()`.
pub fn crop_days_remaining(crop: &Crop) -> u32 {
    // Regrowing crops count down inside their final phase.
    if crop.fully_grown && crop.day_of_current_phase > 0 {
        return crop.day_of_current_phase;
    }

    let mut remaining: i64 = 0;
    for (i, &days) in crop.phase_days.iter().enumerate() {
        if i == crop.current_phase {
            remaining -= crop.day_of_current_phase as i64;
        }
        if i >= crop.current_phase {
            remaining += days as i64;
        }
    }
    remaining.max(0) as u32
}

pub fn split_fertilizers(raw: &str) -> Vec<ItemId> {
    raw.split('|')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Per-kind estimation
// ─────────────────────────────────────────────────────────────────────────────

pub fn estimate(target: &ClassifiedTarget<'_>) -> Estimate {
    match target {
        ClassifiedTarget::None => Estimate::default(),
        ClassifiedTarget::Building(building) => estimate_building(building),
        ClassifiedTarget::PlacedObject(object) => estimate_object(object),
        ClassifiedTarget::TerrainFeature(feature) => estimate_terrain(feature),
    }
}

fn estimate_building(building: &Building) -> Estimate {
    let mut lines = Vec::new();
    for material in MillMaterial::ALL {
        let count: u32 = building
            .input_stacks()
            .filter(|stack| stack.name == material.item_name())
            .map(|stack| stack.stack)
            .sum();
        if count > 0 {
            lines.push(EstimateLine::Tally { material, count });
        }
    }
    Estimate { lines }
}

fn estimate_object(object: &PlacedObject) -> Estimate {
    if !object.big_craftable || object.minutes_until_ready <= 0 || object.name == HEATER_NAME {
        return Estimate::default();
    }
    let Some(held) = &object.held_object else {
        return Estimate::default();
    };

    let maturity = match object.kind {
        ObjectKind::Cask { days_to_mature, aging_rate } if aging_rate > 0.0 => {
            MaturityResult::CountdownDays((days_to_mature / aging_rate) as u32)
        }
        _ => minutes_to_duration(object.minutes_until_ready as u32),
    };

    Estimate {
        lines: vec![EstimateLine::Processing {
            label: Label::Item(held.item_id.clone()),
            maturity,
        }],
    }
}

fn estimate_terrain(feature: &TerrainFeature) -> Estimate {
    let mut lines = Vec::new();

    match feature {
        TerrainFeature::FarmedSoil { crop, fertilizer, .. } => {
            let live_crop = crop.as_ref().filter(|c| !c.dead);
            if let Some(crop) = live_crop {
                let remaining = crop_days_remaining(crop);
                let maturity = if remaining == 0 {
                    MaturityResult::Ready
                } else {
                    MaturityResult::CountdownDays(remaining)
                };
                let label = match &crop.harvest {
                    CropHarvest::Item(id) | CropHarvest::Forage(id) => Label::Item(id.clone()),
                    CropHarvest::External => Label::CustomCropHarvest(crop.clone()),
                };
                lines.push(EstimateLine::Harvest { label, maturity });
            }

            let ids = fertilizer.as_deref().map(split_fertilizers).unwrap_or_default();
            if !ids.is_empty() {
                lines.push(EstimateLine::Fertilizer {
                    ids,
                    beside_crop: live_crop.is_some(),
                });
            }
        }
        TerrainFeature::Tree { species, growth_stage, fertilized, stump, .. } => {
            let progress = if *growth_stage < TREE_MAX_STAGE {
                MaturityResult::ProgressStage {
                    current: *growth_stage,
                    max: TREE_MAX_STAGE,
                }
            } else {
                MaturityResult::None
            };
            lines.push(EstimateLine::Tree {
                species: *species,
                progress,
                stump: *stump,
                fertilized: *fertilized,
            });
        }
        TerrainFeature::FruitTree { fruit_item, days_until_mature, .. } => {
            let maturity = if *days_until_mature > 0 {
                MaturityResult::CountdownDays(*days_until_mature as u32)
            } else {
                MaturityResult::None
            };
            lines.push(EstimateLine::Processing {
                label: Label::Item(fruit_item.clone()),
                maturity,
            });
        }
        TerrainFeature::Bush { kind, age, .. } => {
            if *kind == BushKind::Tea && *age < TEA_BUSH_MATURE_AGE {
                lines.push(EstimateLine::Processing {
                    label: Label::Item(TEA_SAPLING_ID.to_string()),
                    maturity: MaturityResult::CountdownDays(TEA_BUSH_MATURE_AGE - age),
                });
            }
        }
    }

    Estimate { lines }
}
