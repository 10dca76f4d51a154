//! Offset from the viewer used by calibration

use crate::ecs::Component;
use crate::foundation::math::Vec3;

/// Fixed offset from the anchor pose at which a node is placed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetFromCamera {
    offset: Vec3,
}

impl OffsetFromCamera {
    /// Create an offset
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            offset: Vec3::new(x, y, z),
        }
    }

    /// Offset as a vector
    pub fn offset(&self) -> Vec3 {
        self.offset
    }
}

impl From<Vec3> for OffsetFromCamera {
    fn from(offset: Vec3) -> Self {
        Self { offset }
    }
}

impl Component for OffsetFromCamera {}
