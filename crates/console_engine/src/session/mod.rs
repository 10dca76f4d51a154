//! Immersive session collaborators
//!
//! The session owns the viewer pose used as the calibration anchor, and can
//! be ended by a button. Deferred actions let button callbacks schedule work
//! that runs after a tick instead of inside one.

pub mod anchor;
pub mod deferred;

pub use anchor::{AnchorPose, FixedAnchor, NoAnchor, Session, SessionAnchor, SharedSession};
pub use deferred::{DeferredActions, DeferredHandle};
