//! Hint text visibility

use crate::ecs::components::{InstructionText, SpatialRef};
use crate::ecs::{Query, QueryId, System, TickContext, World};

/// Shows `InstructionText` nodes while any tracked controller is visible
#[derive(Debug, Default)]
pub struct InstructionSystem {
    query: Option<QueryId>,
}

impl InstructionSystem {
    /// Create the system
    pub fn new() -> Self {
        Self::default()
    }
}

impl System for InstructionSystem {
    fn name(&self) -> &'static str {
        "instruction"
    }

    fn init(&mut self, world: &mut World) {
        self.query = Some(world.register_query(Query::new().with::<InstructionText>().with::<SpatialRef>()));
    }

    fn execute(&mut self, world: &mut World, ctx: &TickContext<'_>) {
        let Some(query) = self.query else {
            return;
        };
        let visible = ctx.controllers.iter().any(|controller| controller.is_visible());
        for entity in world.query_snapshot(query) {
            if let Ok(spatial) = world.get_component::<SpatialRef>(entity) {
                let node = spatial.node();
                world.scene_mut().set_visible(node, visible);
            }
        }
    }
}
