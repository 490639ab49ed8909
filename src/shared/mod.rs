//! Shared components, resources, events, and states for Fieldglance.
//!
//! This is the type contract. Every domain plugin imports from here.
//! The host game fills [`SessionFeeds`], [`ItemRegistry`] and
//! [`crate::content::CustomCropProvider`]; the inspection domain only reads them.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

// ═══════════════════════════════════════════════════════════════════════
// GAME STATE: top-level state machine
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum GameState {
    #[default]
    Loading,
    MainMenu,
    Playing,
}

// ═══════════════════════════════════════════════════════════════════════
// GRID
// ═══════════════════════════════════════════════════════════════════════

/// Integer grid cell. Key type of every world map.
pub type TilePos = (i32, i32);

// ═══════════════════════════════════════════════════════════════════════
// ITEMS & ITEM REGISTRY: the primary name source
// ═══════════════════════════════════════════════════════════════════════

/// Unique identifier for every item type in the game.
pub type ItemId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemCategory {
    Seed,
    Crop,
    Fruit,
    Fertilizer,
    ArtisanGood,
    Forage,
    Machine,
    Special,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDef {
    pub id: ItemId,
    pub name: String,
    pub display_name: String,
    pub category: ItemCategory,
}

/// Name shown for ids the registry has never heard of.
pub const ERROR_ITEM_NAME: &str = "Error Item";

#[derive(Resource, Debug, Clone, Default)]
pub struct ItemRegistry {
    pub items: HashMap<ItemId, ItemDef>,
}

impl ItemRegistry {
    pub fn get(&self, id: &str) -> Option<&ItemDef> {
        self.items.get(id)
    }

    /// Never fails: unknown ids fall back to [`ERROR_ITEM_NAME`].
    pub fn display_name(&self, id: &str) -> String {
        self.items
            .get(id)
            .map(|def| def.display_name.clone())
            .unwrap_or_else(|| ERROR_ITEM_NAME.to_string())
    }
}

/// Anything that can turn an item id into a display name.
pub trait ItemNameSource {
    /// `None` when the id is unknown to the source.
    fn lookup_name(&self, id: &str) -> Option<String>;
}

impl ItemNameSource for ItemRegistry {
    fn lookup_name(&self, id: &str) -> Option<String> {
        self.get(id).map(|def| def.display_name.clone())
    }
}

/// A stack sitting in some input slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemStack {
    pub item_id: ItemId,
    pub name: String,
    pub stack: u32,
}

// ═══════════════════════════════════════════════════════════════════════
// BUILDINGS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildingKind {
    Mill,
    Coop,
    Barn,
    Silo,
    Shed,
    Other(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Building {
    pub kind: BuildingKind,
    pub tile_x: i32,
    pub tile_y: i32,
    pub tiles_wide: i32,
    pub tiles_high: i32,
    /// Primary input storage. `None` for buildings that take no input.
    #[serde(default)]
    pub input: Option<Vec<Option<ItemStack>>>,
}

impl Building {
    /// Footprint test. The footprint is derived from origin and size at lookup time.
    pub fn occupies(&self, pos: TilePos) -> bool {
        pos.0 >= self.tile_x
            && pos.0 < self.tile_x + self.tiles_wide
            && pos.1 >= self.tile_y
            && pos.1 < self.tile_y + self.tiles_high
    }

    pub fn origin(&self) -> TilePos {
        (self.tile_x, self.tile_y)
    }

    /// Occupied input slots, or nothing when the building has no input storage.
    pub fn input_stacks(&self) -> impl Iterator<Item = &ItemStack> {
        self.input.iter().flatten().flatten()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// PLACED OBJECTS
// ═══════════════════════════════════════════════════════════════════════

/// The item a machine is currently producing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HeldItem {
    pub item_id: ItemId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ObjectKind {
    Plain,
    /// Ages its contents in whole days rather than minutes.
    Cask { days_to_mature: f32, aging_rate: f32 },
    /// A planter that can host its own soil or a bush.
    GardenPot {
        soil: Option<TerrainFeature>,
        bush: Option<TerrainFeature>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacedObject {
    pub item_id: ItemId,
    pub name: String,
    pub tile: TilePos,
    pub big_craftable: bool,
    #[serde(default)]
    pub minutes_until_ready: i32,
    #[serde(default)]
    pub held_object: Option<HeldItem>,
    pub kind: ObjectKind,
}

// ═══════════════════════════════════════════════════════════════════════
// TERRAIN FEATURES & CROPS
// ═══════════════════════════════════════════════════════════════════════

/// Where a crop's harvest name comes from. Exactly one source applies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CropHarvest {
    Item(ItemId),
    /// Wild seeds: the harvest is whichever forage item the seed rolled.
    Forage(ItemId),
    /// Defined by an external content pack; resolve through the plugin.
    External,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Crop {
    pub seed_id: ItemId,
    /// Days per growth phase, in order.
    pub phase_days: Vec<u32>,
    pub current_phase: usize,
    pub day_of_current_phase: u32,
    #[serde(default)]
    pub fully_grown: bool,
    #[serde(default)]
    pub dead: bool,
    pub harvest: CropHarvest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TreeSpecies {
    Oak,
    Maple,
    Pine,
    Mahogany,
    Palm,
    Mushroom,
}

impl TreeSpecies {
    pub fn display_name(&self) -> &'static str {
        match self {
            TreeSpecies::Oak => "Oak Tree",
            TreeSpecies::Maple => "Maple Tree",
            TreeSpecies::Pine => "Pine Tree",
            TreeSpecies::Mahogany => "Mahogany Tree",
            TreeSpecies::Palm => "Palm Tree",
            TreeSpecies::Mushroom => "Mushroom Tree",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BushKind {
    Small,
    Medium,
    Large,
    Tea,
    Walnut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TerrainFeature {
    FarmedSoil {
        tile: TilePos,
        crop: Option<Crop>,
        /// Pipe-delimited fertilizer item ids.
        #[serde(default)]
        fertilizer: Option<String>,
    },
    Tree {
        tile: TilePos,
        species: TreeSpecies,
        growth_stage: u8,
        #[serde(default)]
        fertilized: bool,
        #[serde(default)]
        stump: bool,
    },
    FruitTree {
        tile: TilePos,
        fruit_item: ItemId,
        days_until_mature: i32,
    },
    Bush {
        tile: TilePos,
        kind: BushKind,
        age: u32,
    },
}

impl TerrainFeature {
    pub fn tile(&self) -> TilePos {
        match self {
            TerrainFeature::FarmedSoil { tile, .. }
            | TerrainFeature::Tree { tile, .. }
            | TerrainFeature::FruitTree { tile, .. }
            | TerrainFeature::Bush { tile, .. } => *tile,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// WORLD SNAPSHOT: read-only view of one location
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub location: String,
    #[serde(default)]
    pub objects: HashMap<TilePos, PlacedObject>,
    #[serde(default)]
    pub terrain_features: HashMap<TilePos, TerrainFeature>,
    #[serde(default)]
    pub buildings: Vec<Building>,
    #[serde(default)]
    pub gamepad_controls: bool,
}

impl WorldSnapshot {
    pub fn building_at(&self, pos: TilePos) -> Option<&Building> {
        self.buildings.iter().find(|b| b.occupies(pos))
    }

    pub fn object_at(&self, pos: TilePos) -> Option<&PlacedObject> {
        self.objects.get(&pos)
    }

    pub fn terrain_at(&self, pos: TilePos) -> Option<&TerrainFeature> {
        self.terrain_features.get(&pos)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SESSIONS: one per independent UI context (split-screen player)
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum InputMode {
    #[default]
    Pointer,
    Gamepad,
}

/// Raw cursor/gamepad positions the input collaborator publishes each frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AimInputs {
    pub pointer_tile: TilePos,
    pub grab_tile: TilePos,
    /// Set while the player holds a tool.
    pub tool_tile: Option<TilePos>,
    /// The mouse cursor has faded out after gamepad use.
    pub mouse_faded: bool,
}

/// What the host publishes for one session.
#[derive(Debug, Clone, Default)]
pub struct SessionFeed {
    pub snapshot: Option<Arc<WorldSnapshot>>,
    pub inputs: AimInputs,
    /// A modal menu is open; nothing is drawn over it. Read every frame.
    pub menu_open: bool,
}

/// Per-session feeds written by the host game. Read-only for this crate.
#[derive(Resource, Debug, Clone, Default)]
pub struct SessionFeeds {
    pub feeds: HashMap<SessionId, SessionFeed>,
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS: cross-domain communication
// ═══════════════════════════════════════════════════════════════════════

/// Turns the crop and machine time overlay on or off.
#[derive(Event, Debug, Clone)]
pub struct ToggleCropTimesEvent {
    pub enabled: bool,
}

/// A session (split-screen player) has left; drop everything it owned.
#[derive(Event, Debug, Clone)]
pub struct SessionEndedEvent {
    pub session: SessionId,
}

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

/// In-game minutes in one processing "day" (06:00 to 02:00).
pub const MINUTES_PER_DAY: u32 = 1600;
/// Minutes of the day that run at 60 minutes per hour. The rest run at 100.
pub const DAYTIME_MINUTES: u32 = 1200;
pub const DAYTIME_HOURS: u32 = 20;
pub const NIGHT_MINUTES_PER_HOUR: u32 = 100;

pub const TREE_MAX_STAGE: u8 = 5;
pub const TEA_BUSH_MATURE_AGE: u32 = 20;

pub const HEATER_NAME: &str = "Heater";
pub const TEA_SAPLING_ID: &str = "tea_sapling";

pub const DEFAULT_POLL_INTERVAL_TICKS: u32 = 4;
