//! Button system (edge detection and side effects)
//!
//! Runs before `FingerInputSystem` every tick. It reads the state the finger
//! input system finalized on the previous tick, fires press/release side
//! effects on transitions, then rolls `curr_state` into `prev_state` and
//! resets `curr_state` to `Resting` for the finger input system to overwrite.

use crate::audio::{ButtonCues, CueLoader};
use crate::ecs::components::{ButtonConfig, ButtonEdge, ButtonRuntimeState, Pressable, SpatialRef};
use crate::ecs::{EcsError, Entity, Query, QueryId, System, TickContext, World};

/// Phase A of the button state machine
#[derive(Default)]
pub struct ButtonSystem {
    query: Option<QueryId>,
    cue_loader: Option<CueLoader>,
    cues: Option<ButtonCues>,
}

impl ButtonSystem {
    /// Create a button system without sounds
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: attach cues from `loader` once it finishes
    #[must_use]
    pub fn with_cue_loader(mut self, loader: CueLoader) -> Self {
        self.cue_loader = Some(loader);
        self
    }

    /// Whether cues have arrived
    pub fn has_cues(&self) -> bool {
        self.cues.is_some()
    }

    fn poll_cues(&mut self) {
        let Some(loader) = self.cue_loader.as_mut() else {
            return;
        };
        match loader.poll() {
            Some(Ok(cues)) => {
                log::info!("Button cues loaded");
                self.cues = Some(cues);
            }
            Some(Err(err)) => log::warn!("Buttons will stay silent: {err}"),
            None => {}
        }
        if !loader.is_pending() {
            self.cue_loader = None;
        }
    }

    fn finalize_button(&self, world: &mut World, entity: Entity) -> Result<(), EcsError> {
        let spatial = *world.get_component::<SpatialRef>(entity)?;
        let current_y = spatial.position(world.scene()).map(|position| position.y);

        let state = world.get_component_mut::<ButtonRuntimeState>(entity)?;
        if state.resting_y().is_none() {
            if let Some(y) = current_y {
                state.capture_resting_y(y);
                log::debug!("{entity} resting height captured at {y:.4}");
            }
        }
        if let Some(cues) = &self.cues {
            if state.attach_cues(cues.clone()) {
                log::debug!("{entity} cues attached");
            }
        }

        let edge = state.finalize();
        let cues = state.cues().cloned().unwrap_or_default();
        match edge {
            Some(ButtonEdge::Press) => {
                log::debug!("{entity} fully pressed");
                cues.play_press();
                world.get_component_mut::<ButtonConfig>(entity)?.invoke_action();
            }
            Some(ButtonEdge::Release) => {
                log::debug!("{entity} released");
                cues.play_release();
            }
            None => {}
        }
        Ok(())
    }
}

impl System for ButtonSystem {
    fn name(&self) -> &'static str {
        "button"
    }

    fn init(&mut self, world: &mut World) {
        self.query = Some(
            world.register_query(
                Query::new()
                    .with::<Pressable>()
                    .with::<ButtonConfig>()
                    .with::<ButtonRuntimeState>()
                    .with::<SpatialRef>(),
            ),
        );
    }

    fn execute(&mut self, world: &mut World, _ctx: &TickContext<'_>) {
        self.poll_cues();

        let Some(query) = self.query else {
            return;
        };
        for entity in world.query_snapshot(query) {
            if !world.query_contains(query, entity) {
                continue;
            }
            if let Err(err) = self.finalize_button(world, entity) {
                log::warn!("Button system skipped {entity}: {err}");
            }
        }
    }
}
