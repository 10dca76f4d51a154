//! Continuous spin for `Rotating` nodes

use crate::ecs::components::{Rotating, SpatialRef};
use crate::ecs::{Query, QueryId, System, TickContext, World};
use crate::foundation::math::Vec3;

/// Radians per second added to the X and Y rotation
pub const DEFAULT_ROTATION_RATE: f32 = 0.4;

/// Spins every `Rotating` node about its X and Y axes
#[derive(Debug)]
pub struct RotatingSystem {
    rate: f32,
    query: Option<QueryId>,
}

impl Default for RotatingSystem {
    fn default() -> Self {
        Self::new(DEFAULT_ROTATION_RATE)
    }
}

impl RotatingSystem {
    /// Spin at `rate` radians per second
    pub fn new(rate: f32) -> Self {
        Self { rate, query: None }
    }

    /// Current spin rate
    pub fn rate(&self) -> f32 {
        self.rate
    }
}

impl System for RotatingSystem {
    fn name(&self) -> &'static str {
        "rotating"
    }

    fn init(&mut self, world: &mut World) {
        self.query = Some(world.register_query(Query::new().with::<Rotating>().with::<SpatialRef>()));
    }

    fn execute(&mut self, world: &mut World, ctx: &TickContext<'_>) {
        let Some(query) = self.query else {
            return;
        };
        let step = self.rate * ctx.delta;
        for entity in world.query_snapshot(query) {
            let Ok(spatial) = world.get_component::<SpatialRef>(entity) else {
                continue;
            };
            let node = spatial.node();
            if let Some(rotation) = world.scene().rotation(node) {
                world
                    .scene_mut()
                    .set_rotation(node, rotation + Vec3::new(step, step, 0.0));
            }
        }
    }
}
