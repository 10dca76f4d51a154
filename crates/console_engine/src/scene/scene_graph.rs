//! Scene graph arena
//!
//! Nodes live in a `SlotMap` and refer to each other by `NodeId`. Local
//! transforms are parent-relative; world matrices are composed on demand
//! by walking up the parent chain.

use super::OrientedBox;
use crate::foundation::math::{inverse_transform_point, Mat4, Point3, Transform, Vec3};
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to a node in a `SceneGraph`
    pub struct NodeId;
}

/// A positionable node
#[derive(Debug, Clone, Default)]
pub struct SceneNode {
    /// Optional debug name
    pub name: Option<String>,
    /// Parent-relative transform
    pub transform: Transform,
    /// Parent node, if attached
    pub parent: Option<NodeId>,
    /// Attached children
    pub children: Vec<NodeId>,
    /// Whether the node is drawn
    pub visible: bool,
    /// Half size of the node's box shape, if it has one
    pub half_extents: Option<Vec3>,
    /// Material tint as 0xRRGGBB
    pub tint: Option<u32>,
}

/// Arena of scene nodes
#[derive(Debug, Default)]
pub struct SceneGraph {
    nodes: SlotMap<NodeId, SceneNode>,
}

impl SceneGraph {
    /// Create an empty scene graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a visible root node at the given parent-relative position
    pub fn create_node(&mut self, position: Vec3) -> NodeId {
        self.nodes.insert(SceneNode {
            transform: Transform::from_position(position),
            visible: true,
            ..Default::default()
        })
    }

    /// Create a visible box-shaped node with the given full size
    pub fn create_box(&mut self, name: &str, size: Vec3, position: Vec3) -> NodeId {
        let id = self.create_node(position);
        let node = &mut self.nodes[id];
        node.name = Some(name.to_owned());
        node.half_extents = Some(size * 0.5);
        id
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether the node exists
    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(node)
    }

    /// Borrow a node
    pub fn node(&self, node: NodeId) -> Option<&SceneNode> {
        self.nodes.get(node)
    }

    /// Mutably borrow a node
    pub fn node_mut(&mut self, node: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(node)
    }

    /// Attach `child` under `parent`, keeping its local transform
    ///
    /// Returns false if either node is missing or the attachment would create a cycle.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) -> bool {
        if parent == child || !self.contains(parent) || !self.contains(child) {
            return false;
        }
        if self.ancestors(parent).any(|ancestor| ancestor == child) {
            return false;
        }
        if let Some(old_parent) = self.nodes[child].parent {
            self.nodes[old_parent].children.retain(|&c| c != child);
        }
        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
        true
    }

    fn ancestors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.nodes.get(node).and_then(|n| n.parent), move |&current| {
            self.nodes.get(current).and_then(|n| n.parent)
        })
    }

    /// Parent-relative position
    pub fn position(&self, node: NodeId) -> Option<Vec3> {
        self.nodes.get(node).map(|n| n.transform.position)
    }

    /// Set the parent-relative position
    pub fn set_position(&mut self, node: NodeId, position: Vec3) -> bool {
        self.nodes
            .get_mut(node)
            .map(|n| n.transform.position = position)
            .is_some()
    }

    /// Euler rotation in radians
    pub fn rotation(&self, node: NodeId) -> Option<Vec3> {
        self.nodes.get(node).map(|n| n.transform.rotation)
    }

    /// Set the Euler rotation in radians
    pub fn set_rotation(&mut self, node: NodeId, rotation: Vec3) -> bool {
        self.nodes
            .get_mut(node)
            .map(|n| n.transform.rotation = rotation)
            .is_some()
    }

    /// Whether the node is visible
    pub fn is_visible(&self, node: NodeId) -> Option<bool> {
        self.nodes.get(node).map(|n| n.visible)
    }

    /// Show or hide the node
    pub fn set_visible(&mut self, node: NodeId, visible: bool) -> bool {
        self.nodes.get_mut(node).map(|n| n.visible = visible).is_some()
    }

    /// Material tint
    pub fn tint(&self, node: NodeId) -> Option<u32> {
        self.nodes.get(node).and_then(|n| n.tint)
    }

    /// Set the material tint
    pub fn set_tint(&mut self, node: NodeId, tint: u32) -> bool {
        self.nodes.get_mut(node).map(|n| n.tint = Some(tint)).is_some()
    }

    /// Local-to-world matrix
    pub fn world_matrix(&self, node: NodeId) -> Option<Mat4> {
        let mut matrix = self.nodes.get(node)?.transform.to_matrix();
        for ancestor in self.ancestors(node) {
            matrix = self.nodes[ancestor].transform.to_matrix() * matrix;
        }
        Some(matrix)
    }

    fn parent_matrix(&self, node: NodeId) -> Option<Mat4> {
        match self.nodes.get(node)?.parent {
            Some(parent) => self.world_matrix(parent),
            None => Some(Mat4::identity()),
        }
    }

    /// World-space position of the node's origin
    pub fn world_position(&self, node: NodeId) -> Option<Point3> {
        self.world_matrix(node)
            .map(|matrix| matrix.transform_point(&Point3::origin()))
    }

    /// Move the node so its origin lands on a world-space point
    pub fn set_world_position(&mut self, node: NodeId, position: &Point3) -> bool {
        let Some(local) = self
            .parent_matrix(node)
            .and_then(|parent| inverse_transform_point(&parent, position))
        else {
            return false;
        };
        self.set_position(node, local.coords)
    }

    /// Convert a world-space point into the node's local frame
    pub fn world_to_local(&self, node: NodeId, point: &Point3) -> Option<Point3> {
        self.world_matrix(node)
            .and_then(|matrix| inverse_transform_point(&matrix, point))
    }

    /// World-space box of a box-shaped node
    pub fn oriented_box(&self, node: NodeId) -> Option<OrientedBox> {
        let half_extents = self.nodes.get(node)?.half_extents?;
        self.world_matrix(node)
            .map(|matrix| OrientedBox::new(matrix, half_extents))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_child_world_position_composes_parent() {
        let mut scene = SceneGraph::new();
        let console = scene.create_node(Vec3::new(0.0, 1.0, -0.3));
        let button = scene.create_box("button", Vec3::new(0.08, 0.1, 0.08), Vec3::new(-0.15, 0.04, 0.0));
        assert!(scene.attach(console, button));

        let world = scene.world_position(button).unwrap();
        assert_relative_eq!(world, Point3::new(-0.15, 1.04, -0.3), epsilon = 1e-6);
    }

    #[test]
    fn test_world_to_local_inverts_world_matrix() {
        let mut scene = SceneGraph::new();
        let console = scene.create_node(Vec3::new(0.0, 1.0, -0.3));
        let button = scene.create_node(Vec3::new(0.05, 0.04, 0.0));
        scene.attach(console, button);

        let local = scene
            .world_to_local(button, &Point3::new(0.05, 1.09, -0.3))
            .unwrap();
        assert_relative_eq!(local, Point3::new(0.0, 0.05, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_set_world_position_under_parent() {
        let mut scene = SceneGraph::new();
        let parent = scene.create_node(Vec3::new(1.0, 0.0, 0.0));
        let child = scene.create_node(Vec3::zeros());
        scene.attach(parent, child);

        assert!(scene.set_world_position(child, &Point3::new(1.0, 2.0, 3.0)));
        assert_relative_eq!(scene.position(child).unwrap(), Vec3::new(0.0, 2.0, 3.0), epsilon = 1e-6);
    }

    #[test]
    fn test_attach_rejects_cycles() {
        let mut scene = SceneGraph::new();
        let a = scene.create_node(Vec3::zeros());
        let b = scene.create_node(Vec3::zeros());
        assert!(scene.attach(a, b));
        assert!(!scene.attach(b, a));
        assert!(!scene.attach(a, a));
    }

    #[test]
    fn test_reattach_moves_child() {
        let mut scene = SceneGraph::new();
        let a = scene.create_node(Vec3::zeros());
        let b = scene.create_node(Vec3::zeros());
        let child = scene.create_node(Vec3::zeros());
        scene.attach(a, child);
        scene.attach(b, child);

        assert!(scene.node(a).unwrap().children.is_empty());
        assert_eq!(scene.node(b).unwrap().children, vec![child]);
    }

    #[test]
    fn test_oriented_box_requires_shape() {
        let mut scene = SceneGraph::new();
        let plain = scene.create_node(Vec3::zeros());
        let shaped = scene.create_box("box", Vec3::new(1.0, 1.0, 1.0), Vec3::zeros());
        assert!(scene.oriented_box(plain).is_none());
        assert!(scene.oriented_box(shaped).is_some());
    }
}
