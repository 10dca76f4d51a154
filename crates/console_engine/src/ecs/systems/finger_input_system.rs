//! Finger input system (press computation)
//!
//! Runs after `ButtonSystem` every tick and decides this tick's state for
//! every pressable button from the hands touching it.

use crate::ecs::components::{ButtonConfig, ButtonRuntimeState, ButtonState, Pressable, SpatialRef};
use crate::ecs::{EcsError, Entity, Query, QueryId, System, TickContext, World};

/// Inputs to one button's press step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressInput {
    /// Current parent-relative height of the button node
    pub y: f32,
    /// Height the button rests at
    pub resting_y: f32,
    /// Maximum travel below `resting_y`
    pub full_press_distance: f32,
    /// Spring-back speed in units per second
    pub recovery_speed: f32,
    /// Deepest press across all touching hands, `None` if no hand touches
    pub depth: Option<f32>,
    /// Seconds since the previous tick
    pub delta: f32,
}

/// Result of one button's press step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressStep {
    /// New parent-relative height
    pub y: f32,
    /// State for this tick
    pub state: ButtonState,
}

/// Advance one button by one tick
///
/// Untouched buttons below their resting height climb back at the recovery
/// speed without overshooting; touched buttons are pushed down by the
/// deepest positive press and clamp at the full press distance.
pub fn press_step(input: PressInput) -> PressStep {
    let PressInput {
        y,
        resting_y,
        full_press_distance,
        recovery_speed,
        depth,
        delta,
    } = input;

    let Some(depth) = depth else {
        return if y < resting_y {
            PressStep {
                y: (y + recovery_speed * delta).min(resting_y),
                state: ButtonState::Recovering,
            }
        } else {
            PressStep {
                y: resting_y,
                state: ButtonState::Resting,
            }
        };
    };

    let pushed = if depth > 0.0 { y - depth } else { y };
    let floor = resting_y - full_press_distance;
    if pushed <= floor {
        PressStep {
            y: floor,
            state: ButtonState::FullyPressed,
        }
    } else {
        PressStep {
            y: pushed,
            state: ButtonState::Pressed,
        }
    }
}

/// Phase B of the button state machine
#[derive(Debug, Default)]
pub struct FingerInputSystem {
    query: Option<QueryId>,
}

impl FingerInputSystem {
    /// Create the system
    pub fn new() -> Self {
        Self::default()
    }

    fn press_button(world: &mut World, entity: Entity, ctx: &TickContext<'_>) -> Result<(), EcsError> {
        let spatial = *world.get_component::<SpatialRef>(entity)?;
        let (surface_y, full_press_distance, recovery_speed) = {
            let config = world.get_component::<ButtonConfig>(entity)?;
            (
                config.surface_y(),
                config.full_press_distance(),
                config.recovery_speed(),
            )
        };
        let Some(position) = spatial.position(world.scene()) else {
            log::warn!("{entity} refers to a missing scene node");
            return Ok(());
        };
        let resting_y = world
            .get_component_mut::<ButtonRuntimeState>(entity)?
            .capture_resting_y(position.y);

        let depth = world
            .scene()
            .oriented_box(spatial.node())
            .and_then(|target| ctx.hands.deepest_press(&target, surface_y));

        let step = press_step(PressInput {
            y: position.y,
            resting_y,
            full_press_distance,
            recovery_speed,
            depth,
            delta: ctx.delta,
        });

        let mut moved = position;
        moved.y = step.y;
        spatial.set_position(world.scene_mut(), moved);
        world.get_component_mut::<ButtonRuntimeState>(entity)?.curr_state = step.state;
        Ok(())
    }
}

impl System for FingerInputSystem {
    fn name(&self) -> &'static str {
        "finger_input"
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

    fn execute(&mut self, world: &mut World, ctx: &TickContext<'_>) {
        let Some(query) = self.query else {
            return;
        };
        for entity in world.query_snapshot(query) {
            if !world.query_contains(query, entity) {
                continue;
            }
            if let Err(err) = Self::press_button(world, entity, ctx) {
                log::warn!("Finger input skipped {entity}: {err}");
            }
        }
    }
}
