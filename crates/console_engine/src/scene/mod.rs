//! Scene graph of positionable nodes
//!
//! Entities reference nodes through the `SpatialRef` component; systems move
//! nodes and convert points between world and node-local frames.

pub mod commands;
pub mod oriented_box;
pub mod scene_graph;

pub use commands::{SceneCommand, SceneCommands};
pub use oriented_box::OrientedBox;
pub use scene_graph::{NodeId, SceneGraph, SceneNode};
