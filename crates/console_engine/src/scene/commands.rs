//! Queued scene edits
//!
//! Button actions and deferred actions run without access to the world.
//! They push edits here and the owner applies them between ticks.

use super::{NodeId, SceneGraph};
use std::cell::RefCell;
use std::rc::Rc;

/// A single edit to a scene node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneCommand {
    /// Replace the node's tint colour (0xRRGGBB)
    SetTint(NodeId, u32),
    /// Show or hide the node
    SetVisible(NodeId, bool),
}

/// Cloneable handle to a shared queue of scene edits
#[derive(Debug, Clone, Default)]
pub struct SceneCommands {
    queue: Rc<RefCell<Vec<SceneCommand>>>,
}

impl SceneCommands {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an edit
    pub fn push(&self, command: SceneCommand) {
        self.queue.borrow_mut().push(command);
    }

    /// Number of queued edits
    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Whether nothing is queued
    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }

    /// Apply queued edits in order and clear the queue
    ///
    /// Edits to nodes that no longer exist are dropped. Returns how many applied.
    pub fn apply(&self, scene: &mut SceneGraph) -> usize {
        let commands = std::mem::take(&mut *self.queue.borrow_mut());
        commands
            .into_iter()
            .filter(|command| {
                let applied = match *command {
                    SceneCommand::SetTint(node, tint) => scene.set_tint(node, tint),
                    SceneCommand::SetVisible(node, visible) => scene.set_visible(node, visible),
                };
                if !applied {
                    log::debug!("Dropped {command:?} for a missing node");
                }
                applied
            })
            .count()
    }
}
