//! Entity-Component-System implementation
//!
//! Sparse-set component storage, eagerly maintained queries and an ordered
//! single-threaded scheduler.

pub mod world;
pub mod entity;
pub mod component;
pub mod storage;
pub mod system;
pub mod query;
pub mod scheduler;
pub mod error;
pub mod components;
pub mod systems;

#[cfg(test)]
mod tests;

pub use world::World;
pub use entity::Entity;
pub use component::{Component, ComponentKey};
pub use system::{System, TickContext};
pub use query::{Query, QueryId};
pub use scheduler::{Scheduler, SystemId};
pub use error::EcsError;
