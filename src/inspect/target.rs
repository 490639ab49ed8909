//! Aim-cell selection and target classification.

use crate::shared::*;

/// The cell the player is pointing at this polling cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AimPosition {
    pub tile: TilePos,
    pub mode: InputMode,
}

/// What occupies the aimed cell. Exactly one kind per cycle.
#[derive(Debug, Clone, Copy)]
pub enum ClassifiedTarget<'a> {
    None,
    Building(&'a Building),
    PlacedObject(&'a PlacedObject),
    TerrainFeature(&'a TerrainFeature),
}

impl<'a> ClassifiedTarget<'a> {
    pub fn is_none(&self) -> bool {
        matches!(self, ClassifiedTarget::None)
    }

    /// Cell the renderer anchors the tooltip on.
    pub fn anchor(&self) -> Option<TilePos> {
        match self {
            ClassifiedTarget::None => None,
            ClassifiedTarget::Building(b) => Some(b.origin()),
            ClassifiedTarget::PlacedObject(o) => Some(o.tile),
            ClassifiedTarget::TerrainFeature(t) => Some(t.tile()),
        }
    }
}

/// Gamepad players aim with the tool (or grab tile) once the mouse has faded;
/// everyone else aims with the pointer.
pub fn aim_position(inputs: &AimInputs, gamepad_controls: bool) -> AimPosition {
    if gamepad_controls && inputs.mouse_faded {
        AimPosition {
            tile: inputs.tool_tile.unwrap_or(inputs.grab_tile),
            mode: InputMode::Gamepad,
        }
    } else {
        AimPosition {
            tile: inputs.pointer_tile,
            mode: InputMode::Pointer,
        }
    }
}

pub fn resolve(snapshot: Option<&WorldSnapshot>, aim: TilePos) -> ClassifiedTarget<'_> {
    let Some(snapshot) = snapshot else {
        return ClassifiedTarget::None;
    };

    // Buildings win over anything else on the same cell.
    if let Some(building) = snapshot.building_at(aim) {
        return ClassifiedTarget::Building(building);
    }

    let terrain = snapshot.terrain_at(aim);

    if let Some(object) = snapshot.object_at(aim) {
        if let ObjectKind::GardenPot { soil, bush } = &object.kind {
            // Tea saplings in pots live in the terrain map, not in the pot.
            if let Some(feature) = terrain {
                return ClassifiedTarget::TerrainFeature(feature);
            }
            // Soil overwrites bush when a pot somehow has both.
            if let Some(feature) = soil.as_ref().or(bush.as_ref()) {
                return ClassifiedTarget::TerrainFeature(feature);
            }
        }
        return ClassifiedTarget::PlacedObject(object);
    }

    match terrain {
        Some(feature) => ClassifiedTarget::TerrainFeature(feature),
        None => ClassifiedTarget::None,
    }
}
