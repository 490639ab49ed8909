//! Data layer: populates the item registry at game startup.
//!
//! This plugin runs in OnEnter(GameState::Loading), fills the ItemRegistry
//! from the hard-coded base-game data in `items`, then transitions the game
//! into GameState::MainMenu. Content-pack crops are not registered here; they
//! are resolved through `crate::content` at inspection time.

mod items;

use bevy::prelude::*;
use crate::shared::*;

pub use items::populate_items;

pub struct DataPlugin;

impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ItemRegistry>()
            .add_systems(OnEnter(GameState::Loading), load_all_data);
    }
}

fn load_all_data(
    mut item_registry: ResMut<ItemRegistry>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    info!("[Data] Populating item registry…");

    populate_items(&mut item_registry);
    info!("[Data]   Items loaded: {}", item_registry.items.len());

    next_state.set(GameState::MainMenu);
}
