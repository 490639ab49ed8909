//! Headless demo: loads a farm snapshot, sweeps the pointer across every
//! occupied cell and prints each tooltip the overlay produces as one JSON line.

use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

use fieldglance::config::{ConfigPlugin, OverlayConfig};
use fieldglance::data::DataPlugin;
use fieldglance::inspect::{poll_aim_target, HoverTooltip, InspectPlugin, InspectorSessions};
use fieldglance::shared::*;

const DEMO_SNAPSHOT_PATH: &str = "demos/farm.ron";
const DEMO_SESSION: SessionId = SessionId(0);

#[derive(Debug, Error)]
enum SnapshotError {
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

fn load_snapshot(path: &Path) -> Result<WorldSnapshot, SnapshotError> {
    let text = fs::read_to_string(path).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    ron::from_str(&text).map_err(|source| SnapshotError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Pointer path through the snapshot.
#[derive(Resource, Debug, Default)]
struct DemoSweep {
    tiles: Vec<TilePos>,
    index: usize,
    frames_on_tile: u32,
    last_printed: Option<HoverTooltip>,
}

#[derive(Serialize)]
struct TooltipLine<'a> {
    session: u32,
    aim: TilePos,
    tooltip: &'a HoverTooltip,
}

fn main() -> AppExit {
    App::new()
        .add_plugins(MinimalPlugins)
        .add_plugins(StatesPlugin)
        .add_plugins(LogPlugin::default())
        // Game state
        .init_state::<GameState>()
        .init_resource::<DemoSweep>()
        // Domain plugins
        .add_plugins(ConfigPlugin::default())
        .add_plugins(DataPlugin)
        .add_plugins(InspectPlugin)
        // Demo driver
        .add_systems(OnEnter(GameState::MainMenu), start_demo)
        .add_systems(
            Update,
            advance_sweep
                .run_if(in_state(GameState::Playing))
                .before(poll_aim_target),
        )
        .add_systems(Last, print_tooltips.run_if(in_state(GameState::Playing)))
        .run()
}

fn start_demo(
    mut feeds: ResMut<SessionFeeds>,
    mut sweep: ResMut<DemoSweep>,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit: EventWriter<AppExit>,
) {
    let snapshot = match load_snapshot(Path::new(DEMO_SNAPSHOT_PATH)) {
        Ok(snapshot) => snapshot,
        Err(err) => {
            error!("[Demo] {}", err);
            exit.send(AppExit::error());
            return;
        }
    };

    let mut tiles: Vec<TilePos> = snapshot
        .objects
        .keys()
        .chain(snapshot.terrain_features.keys())
        .copied()
        .chain(snapshot.buildings.iter().map(|b| b.origin()))
        .collect();
    tiles.sort();
    tiles.dedup();
    info!(
        "[Demo] Loaded {} with {} inspectable cells",
        snapshot.location,
        tiles.len()
    );

    let first = tiles.first().copied().unwrap_or_default();
    feeds.feeds.insert(
        DEMO_SESSION,
        SessionFeed {
            snapshot: Some(Arc::new(snapshot)),
            inputs: AimInputs {
                pointer_tile: first,
                grab_tile: first,
                ..default()
            },
            menu_open: false,
        },
    );
    sweep.tiles = tiles;
    next_state.set(GameState::Playing);
}

/// Holds the pointer on each cell for one full poll interval, then moves on.
fn advance_sweep(
    config: Res<OverlayConfig>,
    mut sweep: ResMut<DemoSweep>,
    mut feeds: ResMut<SessionFeeds>,
    mut exit: EventWriter<AppExit>,
) {
    if sweep.frames_on_tile >= config.poll_interval_ticks {
        sweep.frames_on_tile = 0;
        sweep.index += 1;
    }
    let Some(&tile) = sweep.tiles.get(sweep.index) else {
        info!("[Demo] Sweep finished");
        exit.send(AppExit::Success);
        return;
    };
    sweep.frames_on_tile += 1;

    if let Some(feed) = feeds.feeds.get_mut(&DEMO_SESSION) {
        feed.inputs.pointer_tile = tile;
        feed.inputs.grab_tile = tile;
    }
}

fn print_tooltips(sessions: Res<InspectorSessions>, mut sweep: ResMut<DemoSweep>) {
    let tooltip = sessions.tooltip(DEMO_SESSION);
    if tooltip == sweep.last_printed.as_ref() {
        return;
    }
    if let Some(tooltip) = tooltip {
        let aim = sweep.tiles.get(sweep.index).copied().unwrap_or_default();
        let line = TooltipLine {
            session: DEMO_SESSION.0,
            aim,
            tooltip,
        };
        match serde_json::to_string(&line) {
            Ok(json) => println!("{}", json),
            Err(err) => warn!("[Demo] Could not encode tooltip: {}", err),
        }
    }
    sweep.last_printed = tooltip.cloned();
}
