//! Oriented bounding box used for hand intersection tests

use crate::foundation::math::{Mat4, Point3, Vec3};

/// Box centred on a node's origin, oriented by the node's world transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedBox {
    /// Box-local to world transform
    pub world_from_local: Mat4,
    /// Half size along each local axis
    pub half_extents: Vec3,
}

impl OrientedBox {
    /// Create a box from its world transform and half extents
    pub fn new(world_from_local: Mat4, half_extents: Vec3) -> Self {
        Self {
            world_from_local,
            half_extents: half_extents.abs(),
        }
    }

    /// Convert a world point into the box's local frame
    pub fn to_local(&self, point: &Point3) -> Option<Point3> {
        crate::foundation::math::inverse_transform_point(&self.world_from_local, point)
    }

    /// Check if this box contains a world point
    pub fn contains_point(&self, point: &Point3) -> bool {
        self.to_local(point).is_some_and(|local| {
            local.x.abs() <= self.half_extents.x
                && local.y.abs() <= self.half_extents.y
                && local.z.abs() <= self.half_extents.z
        })
    }

    /// Check if a world-space sphere overlaps the box
    ///
    /// Finds the closest point of the box in local space, then measures the
    /// distance in world space so non-uniform node scale is respected.
    pub fn intersects_sphere(&self, center: &Point3, radius: f32) -> bool {
        let Some(local) = self.to_local(center) else {
            return false;
        };
        let closest_local = Point3::new(
            local.x.clamp(-self.half_extents.x, self.half_extents.x),
            local.y.clamp(-self.half_extents.y, self.half_extents.y),
            local.z.clamp(-self.half_extents.z, self.half_extents.z),
        );
        let closest_world = self.world_from_local.transform_point(&closest_local);
        nalgebra::distance(&closest_world, center) <= radius
    }
}
