//! Turns an estimate plus resolved names into tooltip text lines.

use bevy::prelude::*;

use crate::config::TooltipStrings;

use super::maturity::{Estimate, EstimateLine, Label, MaturityResult, MillMaterial};
use super::names::ResolvedNames;

pub fn compose(estimate: &Estimate, names: &ResolvedNames, strings: &TooltipStrings) -> Vec<String> {
    let mut out = Vec::new();

    for line in &estimate.lines {
        match line {
            EstimateLine::Tally { material, count } => {
                out.push(format!("{} {}", count, material_label(*material, strings)));
            }
            EstimateLine::Harvest { label, maturity } => {
                // A crop without a usable name gets no line at all.
                let Some(name) = name_for(label, names).filter(|name| !name.is_empty()) else {
                    continue;
                };
                let when = match maturity {
                    MaturityResult::Ready => strings.ready_to_harvest.clone(),
                    MaturityResult::CountdownDays(days) => format!("{} {}", days, strings.days),
                    other => match duration_text(other, strings) {
                        Some(text) => text,
                        None => {
                            out.push(name.to_string());
                            continue;
                        }
                    },
                };
                out.push(format!("{}: {}", name, when));
            }
            EstimateLine::Processing { label, maturity } => {
                let Some(name) = name_for(label, names) else {
                    continue;
                };
                if !name.is_empty() {
                    out.push(name.to_string());
                }
                let below = match maturity {
                    MaturityResult::CountdownDays(days) => {
                        Some(format!("{} {}", days, strings.days_to_mature))
                    }
                    MaturityResult::Ready => Some(strings.ready_to_harvest.clone()),
                    other => duration_text(other, strings),
                };
                if let Some(text) = below {
                    out.push(text);
                }
            }
            EstimateLine::Fertilizer { ids, beside_crop } => {
                let fertilizers: Option<Vec<&str>> = ids
                    .iter()
                    .map(|id| {
                        name_for(&Label::Item(id.clone()), names).map(|name| {
                            if name.is_empty() {
                                strings.unknown_fertilizer.as_str()
                            } else {
                                name
                            }
                        })
                    })
                    .collect();
                let Some(fertilizers) = fertilizers else {
                    continue;
                };
                let joined = fertilizers.join("/");
                if *beside_crop {
                    out.push(format!("{}: {}", strings.with, joined));
                } else {
                    out.push(joined);
                }
            }
            EstimateLine::Tree { species, progress, stump, fertilized } => {
                let mut text = species.display_name().to_string();
                if let MaturityResult::ProgressStage { current, max } = progress {
                    text.push_str(&format!(" ({}/{})", current, max));
                }
                if *stump {
                    text.push_str(&format!(" ({})", strings.stump));
                }
                if *fertilized {
                    text.push_str(&format!(" ({})", strings.fertilized));
                }
                out.push(text);
            }
        }
    }

    out
}

/// Registry names must always have been resolved; custom-crop names may
/// legitimately be missing after a content-pack failure.
fn name_for<'a>(label: &Label, names: &'a ResolvedNames) -> Option<&'a str> {
    let name = names.get(label);
    if name.is_none() {
        if let Label::Item(id) = label {
            error!("[Inspect] Item {} reached the tooltip without a resolved name", id);
        }
    }
    name
}

fn material_label(material: MillMaterial, strings: &TooltipStrings) -> &str {
    match material {
        MillMaterial::Wheat => &strings.wheat,
        MillMaterial::Beet => &strings.beets,
        MillMaterial::UnmilledRice => &strings.unmilled_rice,
    }
}

fn duration_text(maturity: &MaturityResult, strings: &TooltipStrings) -> Option<String> {
    match *maturity {
        MaturityResult::CountdownDaysHours { days, hours } => Some(format!(
            "{} {}, {} {}",
            days, strings.day_unit, hours, strings.hour_unit
        )),
        MaturityResult::CountdownHoursMinutes { hours: 0, minutes } => {
            Some(format!("{} {}", minutes, strings.minute_unit))
        }
        MaturityResult::CountdownHoursMinutes { hours, minutes } => Some(format!(
            "{} {}, {} {}",
            hours, strings.hour_unit, minutes, strings.minute_unit
        )),
        MaturityResult::ProgressStage { current, max } => Some(format!("({}/{})", current, max)),
        MaturityResult::Ready | MaturityResult::CountdownDays(_) | MaturityResult::None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::*;

    fn names(pairs: &[(&str, &str)]) -> ResolvedNames {
        let mut names = ResolvedNames::default();
        for (id, name) in pairs {
            names.insert(Label::Item(id.to_string()), name.to_string());
        }
        names
    }

    fn item(id: &str) -> Label {
        Label::Item(id.into())
    }

    #[test]
    fn test_empty_estimate_composes_nothing() {
        let lines = compose(&Estimate::default(), &ResolvedNames::default(), &TooltipStrings::default());
        assert!(lines.is_empty());
    }

    #[test]
    fn test_crop_with_fertilizers() {
        let estimate = Estimate {
            lines: vec![
                EstimateLine::Harvest { label: item("parsnip"), maturity: MaturityResult::CountdownDays(3) },
                EstimateLine::Fertilizer {
                    ids: vec!["basic_fertilizer".into(), "speed_gro".into()],
                    beside_crop: true,
                },
            ],
        };
        let names = names(&[
            ("parsnip", "Parsnip"),
            ("basic_fertilizer", "Basic Fertilizer"),
            ("speed_gro", "Speed-Gro"),
        ]);
        assert_eq!(
            compose(&estimate, &names, &TooltipStrings::default()),
            vec!["Parsnip: 3 days", "with: Basic Fertilizer/Speed-Gro"]
        );
    }

    #[test]
    fn test_ready_crop_and_lone_fertilizer() {
        let ready = Estimate {
            lines: vec![EstimateLine::Harvest { label: item("parsnip"), maturity: MaturityResult::Ready }],
        };
        let lone = Estimate {
            lines: vec![EstimateLine::Fertilizer { ids: vec!["mystery".into()], beside_crop: false }],
        };
        let names = names(&[("parsnip", "Parsnip"), ("mystery", "")]);
        let strings = TooltipStrings::default();
        assert_eq!(compose(&ready, &names, &strings), vec!["Parsnip: Ready to harvest"]);
        assert_eq!(compose(&lone, &names, &strings), vec!["Unknown Fertilizer"]);
    }

    #[test]
    fn test_unresolved_custom_crop_keeps_fertilizer_line() {
        let crop = Crop {
            seed_id: "pack.rose".into(),
            phase_days: vec![1],
            current_phase: 0,
            day_of_current_phase: 0,
            fully_grown: false,
            dead: false,
            harvest: CropHarvest::External,
        };
        let estimate = Estimate {
            lines: vec![
                EstimateLine::Harvest {
                    label: Label::CustomCropHarvest(crop),
                    maturity: MaturityResult::CountdownDays(1),
                },
                EstimateLine::Fertilizer { ids: vec!["speed_gro".into()], beside_crop: true },
            ],
        };
        let names = names(&[("speed_gro", "Speed-Gro")]);
        assert_eq!(
            compose(&estimate, &names, &TooltipStrings::default()),
            vec!["with: Speed-Gro"]
        );
    }

    #[test]
    fn test_missing_item_name_skips_line() {
        let estimate = Estimate {
            lines: vec![
                EstimateLine::Processing { label: item("wine"), maturity: MaturityResult::CountdownDays(2) },
                EstimateLine::Tally { material: MillMaterial::Wheat, count: 4 },
            ],
        };
        assert_eq!(
            compose(&estimate, &ResolvedNames::default(), &TooltipStrings::default()),
            vec!["4 wheat"]
        );
    }

    #[test]
    fn test_machine_durations() {
        let strings = TooltipStrings::default();
        let names = names(&[("wine", "Wine"), ("beer", "Beer"), ("jelly", "Jelly")]);
        let estimate = Estimate {
            lines: vec![
                EstimateLine::Processing {
                    label: item("wine"),
                    maturity: MaturityResult::CountdownDaysHours { days: 1, hours: 20 },
                },
                EstimateLine::Processing {
                    label: item("beer"),
                    maturity: MaturityResult::CountdownHoursMinutes { hours: 0, minutes: 45 },
                },
                EstimateLine::Processing {
                    label: item("jelly"),
                    maturity: MaturityResult::CountdownHoursMinutes { hours: 2, minutes: 5 },
                },
            ],
        };
        assert_eq!(
            compose(&estimate, &names, &strings),
            vec!["Wine", "1 d, 20 h", "Beer", "45 m", "Jelly", "2 h, 5 m"]
        );
    }

    #[test]
    fn test_fruit_tree_lines() {
        let names = names(&[("peach", "Peach")]);
        let young = Estimate {
            lines: vec![EstimateLine::Processing { label: item("peach"), maturity: MaturityResult::CountdownDays(9) }],
        };
        let grown = Estimate {
            lines: vec![EstimateLine::Processing { label: item("peach"), maturity: MaturityResult::None }],
        };
        let strings = TooltipStrings::default();
        assert_eq!(compose(&young, &names, &strings), vec!["Peach", "9 days to mature"]);
        assert_eq!(compose(&grown, &names, &strings), vec!["Peach"]);
    }

    #[test]
    fn test_tree_markers() {
        let estimate = Estimate {
            lines: vec![EstimateLine::Tree {
                species: TreeSpecies::Oak,
                progress: MaturityResult::ProgressStage { current: 3, max: 5 },
                stump: true,
                fertilized: true,
            }],
        };
        assert_eq!(
            compose(&estimate, &ResolvedNames::default(), &TooltipStrings::default()),
            vec!["Oak Tree (3/5) (stump) (fertilized)"]
        );
    }

    #[test]
    fn test_mill_tally_uses_configured_labels() {
        let mut strings = TooltipStrings::default();
        strings.beets = "Rüben".into();
        let estimate = Estimate {
            lines: vec![
                EstimateLine::Tally { material: MillMaterial::Wheat, count: 15 },
                EstimateLine::Tally { material: MillMaterial::Beet, count: 2 },
            ],
        };
        assert_eq!(
            compose(&estimate, &ResolvedNames::default(), &strings),
            vec!["15 wheat", "2 Rüben"]
        );
    }

    fn compose_with_registry(estimate: &Estimate) -> Vec<String> {
        use crate::inspect::names::{LogOnce, NameResolutionCache};
        let mut registry = ItemRegistry::default();
        crate::data::populate_items(&mut registry);
        let names = NameResolutionCache::default().resolve_labels(
            estimate,
            &registry,
            None,
            &mut LogOnce::default(),
        );
        compose(estimate, &names, &TooltipStrings::default())
    }

    #[test]
    fn test_unregistered_fertilizer_shows_placeholder() {
        let estimate = Estimate {
            lines: vec![EstimateLine::Fertilizer {
                ids: vec!["mod.mystery_fert".into(), "speed_gro".into()],
                beside_crop: false,
            }],
        };
        assert_eq!(compose_with_registry(&estimate), vec!["Unknown Fertilizer/Speed-Gro"]);
    }

    #[test]
    fn test_unregistered_harvest_drops_crop_line() {
        let estimate = Estimate {
            lines: vec![
                EstimateLine::Harvest {
                    label: item("mod.mystery_crop"),
                    maturity: MaturityResult::CountdownDays(5),
                },
                EstimateLine::Fertilizer { ids: vec!["speed_gro".into()], beside_crop: true },
            ],
        };
        assert_eq!(compose_with_registry(&estimate), vec!["with: Speed-Gro"]);
    }

    #[test]
    fn test_empty_harvest_name_drops_crop_line() {
        let estimate = Estimate {
            lines: vec![EstimateLine::Harvest {
                label: item("blank"),
                maturity: MaturityResult::CountdownDays(5),
            }],
        };
        let names = names(&[("blank", "")]);
        assert!(compose(&estimate, &names, &TooltipStrings::default()).is_empty());
    }
}
