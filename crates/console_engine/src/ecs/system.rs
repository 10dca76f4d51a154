//! System trait and per-tick context

use super::World;
use crate::input::{HandSet, TrackedObject};
use crate::session::AnchorPose;

/// Read-only view of the outside world handed to every system for one tick
///
/// Systems never reach for global renderer or session state; whatever they
/// need to observe arrives here.
pub struct TickContext<'a> {
    /// Seconds since the previous tick
    pub delta: f32,
    /// Seconds since the first tick
    pub elapsed_time: f32,
    /// Hand intersection source
    pub hands: &'a HandSet,
    /// Calibration anchor
    pub anchor: &'a dyn AnchorPose,
    /// Objects whose visibility drives hint text
    pub controllers: &'a [Box<dyn TrackedObject>],
}

impl<'a> TickContext<'a> {
    /// Assemble a context for one tick
    pub fn new(
        delta: f32,
        elapsed_time: f32,
        hands: &'a HandSet,
        anchor: &'a dyn AnchorPose,
        controllers: &'a [Box<dyn TrackedObject>],
    ) -> Self {
        Self {
            delta,
            elapsed_time,
            hands,
            anchor,
            controllers,
        }
    }
}

/// System trait for processing entities and components
///
/// `init` runs once at registration and is where a system registers its
/// queries. `execute` runs once per tick and must not fail: recoverable
/// problems degrade to a no-op for the affected entity.
pub trait System {
    /// Name used in logs
    fn name(&self) -> &'static str;

    /// Register queries and other one-time setup
    fn init(&mut self, world: &mut World);

    /// Run the system for one tick
    fn execute(&mut self, world: &mut World, ctx: &TickContext<'_>);
}
