//! Spatial reference component

use crate::ecs::Component;
use crate::foundation::math::{Point3, Vec3};
use crate::scene::{NodeId, SceneGraph};

/// Handle from an entity to its scene node
///
/// Exactly one entity owns a given node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpatialRef {
    node: NodeId,
}

impl SpatialRef {
    /// Wrap a node handle
    pub fn new(node: NodeId) -> Self {
        Self { node }
    }

    /// Underlying node
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Parent-relative position
    pub fn position(&self, scene: &SceneGraph) -> Option<Vec3> {
        scene.position(self.node)
    }

    /// Set the parent-relative position
    pub fn set_position(&self, scene: &mut SceneGraph, position: Vec3) -> bool {
        scene.set_position(self.node, position)
    }

    /// World-space position
    pub fn world_position(&self, scene: &SceneGraph) -> Option<Point3> {
        scene.world_position(self.node)
    }

    /// Move the node to a world-space position
    pub fn set_world_position(&self, scene: &mut SceneGraph, position: &Point3) -> bool {
        scene.set_world_position(self.node, position)
    }

    /// Convert a world point into the node's local frame
    pub fn world_to_local(&self, scene: &SceneGraph, point: &Point3) -> Option<Point3> {
        scene.world_to_local(self.node, point)
    }
}

impl Component for SpatialRef {}
