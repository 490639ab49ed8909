//! Inspect domain: hover tooltips for crops, trees and machines.
//!
//! Two hooks drive everything while the overlay is enabled:
//! - `poll_aim_target` (Update, every Nth tick) copies each session's aim and
//!   snapshot handle from the host's [`SessionFeeds`].
//! - `compose_hover_tooltips` (PostUpdate) classifies the aimed cell,
//!   estimates maturity, resolves names and stores the finished
//!   [`HoverTooltip`] for the renderer.
//!
//! Sessions are created on first sight of a feed and dropped on
//! [`SessionEndedEvent`] or when leaving `GameState::Playing`.

pub mod maturity;
pub mod names;
pub mod target;
pub mod tooltip;

use bevy::prelude::*;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

use crate::config::{OverlayConfig, TooltipStrings};
use crate::content::{CustomCropProvider, CustomCropSource};
use crate::shared::*;

pub use names::{LogOnce, NameResolutionCache};
pub use target::{AimPosition, ClassifiedTarget};

pub struct InspectPlugin;

impl Plugin for InspectPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InspectorSessions>()
            .init_resource::<OverlayHooks>()
            .init_resource::<PollTicker>()
            .init_resource::<OverlayConfig>()
            .init_resource::<ItemRegistry>()
            .init_resource::<SessionFeeds>()
            .init_resource::<CustomCropProvider>()
            .add_event::<ToggleCropTimesEvent>()
            .add_event::<SessionEndedEvent>()
            .add_systems(Startup, apply_configured_toggle)
            .add_systems(
                Update,
                (
                    handle_overlay_toggle,
                    handle_session_end,
                    poll_aim_target
                        .run_if(in_state(GameState::Playing))
                        .run_if(tick_hook_subscribed),
                )
                    .chain(),
            )
            .add_systems(
                PostUpdate,
                compose_hover_tooltips
                    .run_if(in_state(GameState::Playing))
                    .run_if(render_hook_subscribed),
            )
            .add_systems(OnExit(GameState::Playing), teardown_sessions);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Resources
// ─────────────────────────────────────────────────────────────────────────────

/// Finished tooltip for one session, ready to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoverTooltip {
    /// Cell the renderer converts to pixels.
    pub anchor: TilePos,
    pub input_mode: InputMode,
    pub lines: Vec<String>,
}

#[derive(Debug, Default)]
pub struct InspectorSession {
    pub aim: Option<AimPosition>,
    pub snapshot: Option<Arc<WorldSnapshot>>,
    pub names: NameResolutionCache,
    /// Error de-duplication, scoped to this session's lifetime.
    pub log: LogOnce,
    pub tooltip: Option<HoverTooltip>,
}

impl InspectorSession {
    fn build_tooltip<S: ItemNameSource + ?Sized>(
        &mut self,
        registry: &S,
        plugin: Option<&dyn CustomCropSource>,
        strings: &TooltipStrings,
        menu_open: bool,
    ) -> Option<HoverTooltip> {
        if menu_open {
            return None;
        }
        let aim = self.aim?;
        let snapshot = self.snapshot.as_deref()?;

        let target = target::resolve(Some(snapshot), aim.tile);
        let anchor = target.anchor()?;
        let estimate = maturity::estimate(&target);
        if estimate.is_empty() {
            return None;
        }

        let names = self.names.resolve_labels(&estimate, registry, plugin, &mut self.log);
        let lines = tooltip::compose(&estimate, &names, strings);
        if lines.is_empty() {
            return None;
        }

        Some(HoverTooltip {
            anchor,
            input_mode: aim.mode,
            lines,
        })
    }
}

/// Per-session inspector state, keyed by split-screen session.
#[derive(Resource, Debug, Default)]
pub struct InspectorSessions {
    sessions: HashMap<SessionId, InspectorSession>,
}

impl InspectorSessions {
    pub fn get_or_create(&mut self, id: SessionId) -> &mut InspectorSession {
        self.sessions.entry(id).or_insert_with(|| {
            debug!("[Inspect] Session {:?} created", id);
            InspectorSession::default()
        })
    }

    pub fn get(&self, id: SessionId) -> Option<&InspectorSession> {
        self.sessions.get(&id)
    }

    pub fn tooltip(&self, id: SessionId) -> Option<&HoverTooltip> {
        self.sessions.get(&id).and_then(|s| s.tooltip.as_ref())
    }

    pub fn remove(&mut self, id: SessionId) -> bool {
        self.sessions.remove(&id).is_some()
    }

    pub fn clear(&mut self) {
        self.sessions.clear();
    }

    pub fn clear_tooltips(&mut self) {
        for session in self.sessions.values_mut() {
            session.tooltip = None;
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// Subscription state of the two overlay hooks.
#[derive(Resource, Debug, Default)]
pub struct OverlayHooks {
    tick_subscribed: bool,
    render_subscribed: bool,
}

impl OverlayHooks {
    /// Always unsubscribes first, so enabling twice never double-subscribes.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.tick_subscribed = false;
        self.render_subscribed = false;
        if enabled {
            self.tick_subscribed = true;
            self.render_subscribed = true;
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.tick_subscribed && self.render_subscribed
    }
}

#[derive(Resource, Debug, Default)]
pub struct PollTicker {
    pub ticks: u64,
}

// ─────────────────────────────────────────────────────────────────────────────
// Run conditions
// ─────────────────────────────────────────────────────────────────────────────

pub fn tick_hook_subscribed(hooks: Res<OverlayHooks>) -> bool {
    hooks.tick_subscribed
}

pub fn render_hook_subscribed(hooks: Res<OverlayHooks>) -> bool {
    hooks.render_subscribed
}

// ─────────────────────────────────────────────────────────────────────────────
// Systems
// ─────────────────────────────────────────────────────────────────────────────

fn apply_configured_toggle(config: Res<OverlayConfig>, mut hooks: ResMut<OverlayHooks>) {
    hooks.set_enabled(config.enabled);
    info!(
        "[Inspect] Crop times overlay starts {} (poll every {} ticks)",
        if config.enabled { "enabled" } else { "disabled" },
        config.poll_interval_ticks
    );
}

pub fn handle_overlay_toggle(
    mut events: EventReader<ToggleCropTimesEvent>,
    mut hooks: ResMut<OverlayHooks>,
    mut sessions: ResMut<InspectorSessions>,
) {
    for event in events.read() {
        hooks.set_enabled(event.enabled);
        if !event.enabled {
            sessions.clear_tooltips();
        }
        info!(
            "[Inspect] Crop times overlay {}",
            if event.enabled { "enabled" } else { "disabled" }
        );
    }
}

pub fn handle_session_end(
    mut events: EventReader<SessionEndedEvent>,
    mut sessions: ResMut<InspectorSessions>,
) {
    for event in events.read() {
        if sessions.remove(event.session) {
            info!("[Inspect] Session {:?} ended, inspector state dropped", event.session);
        }
    }
}

/// Refreshes aim and snapshot for every published session on every Nth tick.
pub fn poll_aim_target(
    config: Res<OverlayConfig>,
    feeds: Res<SessionFeeds>,
    mut ticker: ResMut<PollTicker>,
    mut sessions: ResMut<InspectorSessions>,
) {
    let tick = ticker.ticks;
    ticker.ticks = ticker.ticks.wrapping_add(1);
    if tick % u64::from(config.poll_interval_ticks.max(1)) != 0 {
        return;
    }

    for (&id, feed) in &feeds.feeds {
        let gamepad_controls = feed
            .snapshot
            .as_ref()
            .is_some_and(|snapshot| snapshot.gamepad_controls);
        let session = sessions.get_or_create(id);
        session.aim = Some(target::aim_position(&feed.inputs, gamepad_controls));
        session.snapshot = feed.snapshot.clone();
    }
}

/// Runs every frame. The menu flag is read straight from the feed, not from
/// the last poll.
pub fn compose_hover_tooltips(
    config: Res<OverlayConfig>,
    registry: Res<ItemRegistry>,
    provider: Res<CustomCropProvider>,
    feeds: Res<SessionFeeds>,
    mut sessions: ResMut<InspectorSessions>,
) {
    for (id, session) in sessions.sessions.iter_mut() {
        let menu_open = feeds.feeds.get(id).is_some_and(|feed| feed.menu_open);
        session.tooltip =
            session.build_tooltip(&*registry, provider.get(), &config.strings, menu_open);
    }
}

fn teardown_sessions(mut sessions: ResMut<InspectorSessions>, mut ticker: ResMut<PollTicker>) {
    if !sessions.is_empty() {
        info!("[Inspect] Leaving play, dropping {} inspector sessions", sessions.len());
    }
    sessions.clear();
    ticker.ticks = 0;
}
