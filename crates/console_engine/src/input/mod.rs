//! Tracked input sources
//!
//! Hands press buttons; controllers only matter for whether they are visible.

pub mod controllers;
pub mod hands;

pub use controllers::{Controller, TrackedObject};
pub use hands::{HandSet, HandTracker, PointerHand, DEFAULT_POINTER_RADIUS};
