//! One-shot placement of nodes relative to the viewer

use crate::ecs::components::{NeedCalibration, OffsetFromCamera, SpatialRef};
use crate::ecs::{EcsError, Entity, Query, QueryId, System, TickContext, World};

/// Places each `NeedCalibration` node at anchor + offset, then untags it
///
/// Waits silently while the anchor is unavailable.
#[derive(Debug, Default)]
pub struct CalibrationSystem {
    query: Option<QueryId>,
}

impl CalibrationSystem {
    /// Create the system
    pub fn new() -> Self {
        Self::default()
    }

    fn calibrate(world: &mut World, entity: Entity, ctx: &TickContext<'_>) -> Result<(), EcsError> {
        let spatial = *world.get_component::<SpatialRef>(entity)?;
        let offset = world.get_component::<OffsetFromCamera>(entity)?.offset();
        let target = ctx.anchor.position() + offset;
        if !spatial.set_world_position(world.scene_mut(), &target) {
            log::warn!("{entity} refers to a missing scene node");
            return Ok(());
        }
        world.remove_component::<NeedCalibration>(entity)?;
        log::info!(
            "Calibrated {entity} at ({:.3}, {:.3}, {:.3})",
            target.x,
            target.y,
            target.z
        );
        Ok(())
    }
}

impl System for CalibrationSystem {
    fn name(&self) -> &'static str {
        "calibration"
    }

    fn init(&mut self, world: &mut World) {
        self.query = Some(
            world.register_query(
                Query::new()
                    .with::<NeedCalibration>()
                    .with::<OffsetFromCamera>()
                    .with::<SpatialRef>(),
            ),
        );
    }

    fn execute(&mut self, world: &mut World, ctx: &TickContext<'_>) {
        let Some(query) = self.query else {
            return;
        };
        if !ctx.anchor.is_available() {
            return;
        }
        for entity in world.query_snapshot(query) {
            if !world.query_contains(query, entity) {
                continue;
            }
            if let Err(err) = Self::calibrate(world, entity, ctx) {
                log::warn!("Calibration skipped {entity}: {err}");
            }
        }
    }
}
