//! Hand intersection source
//!
//! An ordered set of optional hand trackers. Any slot may be empty on any
//! frame (hand not tracked), and any number of hands may touch the same
//! target at once.

use crate::foundation::math::Point3;
use crate::scene::OrientedBox;

/// Radius of the index finger tip sphere, in metres
pub const DEFAULT_POINTER_RADIUS: f32 = 0.008;

/// A tracked hand with a pointing joint
pub trait HandTracker {
    /// Whether the hand's pointer touches the box
    fn is_box_intersecting(&self, target: &OrientedBox) -> bool;

    /// World position of the pointing joint, if currently known
    fn pointer_world_position(&self) -> Option<Point3>;
}

/// Hand whose pointer is a sphere around the index finger tip
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerHand {
    pointer: Option<Point3>,
    radius: f32,
}

impl PointerHand {
    /// Hand with its finger tip at `pointer`
    pub fn at(pointer: Point3) -> Self {
        Self {
            pointer: Some(pointer),
            radius: DEFAULT_POINTER_RADIUS,
        }
    }

    /// Hand that is tracked but has no usable finger tip this frame
    pub fn without_pointer() -> Self {
        Self {
            pointer: None,
            radius: DEFAULT_POINTER_RADIUS,
        }
    }

    /// Builder pattern: set the finger tip radius
    #[must_use]
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius.max(0.0);
        self
    }

    /// Move the finger tip
    pub fn move_to(&mut self, pointer: Point3) {
        self.pointer = Some(pointer);
    }
}

impl HandTracker for PointerHand {
    fn is_box_intersecting(&self, target: &OrientedBox) -> bool {
        self.pointer
            .is_some_and(|pointer| target.intersects_sphere(&pointer, self.radius))
    }

    fn pointer_world_position(&self) -> Option<Point3> {
        self.pointer
    }
}

/// Ordered slots of optional hand trackers
#[derive(Default)]
pub struct HandSet {
    slots: Vec<Option<Box<dyn HandTracker>>>,
}

impl HandSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a set with `count` empty slots
    pub fn with_slots(count: usize) -> Self {
        let mut slots = Vec::with_capacity(count);
        slots.resize_with(count, || None);
        Self { slots }
    }

    /// Put a tracker in a slot (or empty it with `None`), growing the set if needed
    pub fn set_slot(&mut self, slot: usize, hand: Option<Box<dyn HandTracker>>) {
        if slot >= self.slots.len() {
            self.slots.resize_with(slot + 1, || None);
        }
        self.slots[slot] = hand;
    }

    /// Mark a slot as untracked
    pub fn clear_slot(&mut self, slot: usize) {
        if let Some(entry) = self.slots.get_mut(slot) {
            *entry = None;
        }
    }

    /// Number of slots
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether there are no slots
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of occupied slots
    pub fn tracked_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    fn hand(&self, slot: usize) -> Option<&dyn HandTracker> {
        self.slots.get(slot)?.as_deref()
    }

    /// Whether the hand in `slot` touches the target
    pub fn intersects(&self, slot: usize, target: &OrientedBox) -> bool {
        self.hand(slot)
            .is_some_and(|hand| hand.is_box_intersecting(target))
    }

    /// Pointer of the hand in `slot`, in the target's local frame
    ///
    /// `None` unless the hand intersects the target and reports a pointer.
    pub fn pointer_local_position(&self, slot: usize, target: &OrientedBox) -> Option<Point3> {
        let hand = self.hand(slot)?;
        if !hand.is_box_intersecting(target) {
            return None;
        }
        target.to_local(&hand.pointer_world_position()?)
    }

    /// Local pointer positions of every hand touching the target
    ///
    /// A hand that intersects without a known pointer is treated as not touching.
    pub fn local_pointers(&self, target: &OrientedBox) -> Vec<Point3> {
        (0..self.slots.len())
            .filter_map(|slot| self.pointer_local_position(slot, target))
            .collect()
    }

    /// Deepest press below `surface_y` across all touching hands
    ///
    /// `None` when no hand touches; otherwise the maximum of
    /// `surface_y - local_y`, which may be zero or negative.
    pub fn deepest_press(&self, target: &OrientedBox, surface_y: f32) -> Option<f32> {
        self.local_pointers(target)
            .iter()
            .map(|local| surface_y - local.y)
            .reduce(f32::max)
    }
}
