//! Anchor pose and session handles

use crate::foundation::math::Point3;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Reference pose that calibrated nodes are placed relative to
pub trait AnchorPose {
    /// Whether the pose is currently known
    fn is_available(&self) -> bool;

    /// Current anchor position; only meaningful while available
    fn position(&self) -> Point3;
}

/// Anchor that is never available
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAnchor;

impl AnchorPose for NoAnchor {
    fn is_available(&self) -> bool {
        false
    }

    fn position(&self) -> Point3 {
        Point3::origin()
    }
}

/// Anchor at a fixed, optionally absent, position
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FixedAnchor {
    position: Option<Point3>,
}

impl FixedAnchor {
    /// Anchor available at `position`
    pub fn at(position: Point3) -> Self {
        Self {
            position: Some(position),
        }
    }

    /// Anchor that is not yet available
    pub fn unavailable() -> Self {
        Self { position: None }
    }
}

impl AnchorPose for FixedAnchor {
    fn is_available(&self) -> bool {
        self.position.is_some()
    }

    fn position(&self) -> Point3 {
        self.position.unwrap_or_else(Point3::origin)
    }
}

/// An immersive session providing the viewer pose
pub trait Session {
    /// Whether the session is running
    fn is_active(&self) -> bool;

    /// Current viewer position
    fn viewer_position(&self) -> Point3;

    /// End the session
    fn end(&mut self);
}

/// Session shared between the console and actions that may end it
pub type SharedSession = Rc<RefCell<dyn Session>>;

/// Anchor backed by a session's viewer pose
///
/// Holds the session weakly: once the session is dropped the anchor is
/// simply unavailable.
pub struct SessionAnchor {
    session: Weak<RefCell<dyn Session>>,
}

impl SessionAnchor {
    /// Track the viewer pose of `session`
    pub fn new(session: &SharedSession) -> Self {
        Self {
            session: Rc::downgrade(session),
        }
    }
}

impl AnchorPose for SessionAnchor {
    fn is_available(&self) -> bool {
        let Some(session) = self.session.upgrade() else {
            return false;
        };
        let active = session.borrow().is_active();
        active
    }

    fn position(&self) -> Point3 {
        let Some(session) = self.session.upgrade() else {
            return Point3::origin();
        };
        let position = session.borrow().viewer_position();
        position
    }
}
