//! Tag components
//!
//! Zero-data markers that only decide query membership.

use crate::ecs::Component;

/// Button that hands can press
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pressable;

impl Component for Pressable {}

/// Node that spins continuously
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rotating;

impl Component for Rotating {}

/// Node still waiting to be anchored relative to the viewer
///
/// Removed by the calibration system once it has been placed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NeedCalibration;

impl Component for NeedCalibration {}

/// Hint text shown while tracked controllers are visible
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstructionText;

impl Component for InstructionText {}
