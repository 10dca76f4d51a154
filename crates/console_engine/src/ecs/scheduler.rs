//! System scheduling
//!
//! Deterministic, single-threaded execution: every registered system runs
//! exactly once per tick, in registration order, on the calling thread.

use super::{System, TickContext, World};

/// Position of a system in the execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SystemId(pub usize);

/// Ordered list of systems driven once per frame
#[derive(Default)]
pub struct Scheduler {
    systems: Vec<Box<dyn System>>,
    ticks: u64,
}

impl Scheduler {
    /// Create an empty scheduler
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a system after all previously registered ones
    pub fn register(&mut self, world: &mut World, mut system: Box<dyn System>) -> SystemId {
        system.init(world);
        let id = SystemId(self.systems.len());
        log::debug!("Registered system '{}' at position {}", system.name(), id.0);
        self.systems.push(system);
        id
    }

    /// Convenience wrapper around `register` for concrete systems
    pub fn add_system<S: System + 'static>(&mut self, world: &mut World, system: S) -> SystemId {
        self.register(world, Box::new(system))
    }

    /// Run every system once, in registration order
    pub fn tick(&mut self, world: &mut World, ctx: &TickContext<'_>) {
        log::trace!(
            "Tick {} (delta {:.4}s, elapsed {:.3}s)",
            self.ticks,
            ctx.delta,
            ctx.elapsed_time
        );
        for system in &mut self.systems {
            system.execute(world, ctx);
        }
        self.ticks += 1;
    }

    /// Number of completed ticks
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Registered system names in execution order
    pub fn system_names(&self) -> Vec<&'static str> {
        self.systems.iter().map(|system| system.name()).collect()
    }

    /// Number of registered systems
    pub fn len(&self) -> usize {
        self.systems.len()
    }

    /// Whether no systems are registered
    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }
}
