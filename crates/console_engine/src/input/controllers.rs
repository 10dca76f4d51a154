//! Tracked objects whose visibility drives hint text

/// Anything the runtime can report as currently visible
pub trait TrackedObject {
    /// Whether the object is currently visible
    fn is_visible(&self) -> bool;
}

/// Motion controller grip
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controller {
    /// Whether the runtime is currently showing this controller
    pub visible: bool,
}

impl Controller {
    /// Create a controller with the given visibility
    pub fn new(visible: bool) -> Self {
        Self { visible }
    }
}

impl TrackedObject for Controller {
    fn is_visible(&self) -> bool {
        self.visible
    }
}
