//! # Console Engine
//!
//! Hand-pressable 3D buttons on a floating console, driven by a small
//! Entity-Component-System with an ordered, single-threaded scheduler.
//!
//! ## Features
//!
//! - **ECS Architecture**: Sparse-set storage with eagerly maintained queries
//! - **Two-Phase Buttons**: Edge-triggered actions that fire once per press
//! - **Multi-Hand Input**: Any number of tracked hands, deepest press wins
//! - **Calibration**: One-shot placement relative to the viewer
//! - **Background Audio Loading**: Cues are polled, never awaited
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use console_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut console = ConsoleButtons::new(ConsoleConfig::default())?;
//!     console.set_action("orange", || println!("orange pressed"))?;
//!     console
//!         .hands_mut()
//!         .set_slot(0, Some(Box::new(PointerHand::at(Point3::new(-0.15, 1.03, -0.3)))));
//!
//!     let mut timer = Timer::new();
//!     for _ in 0..3 {
//!         timer.advance(1.0 / 72.0);
//!         console.tick(timer.delta_time(), timer.total_time());
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod ecs;
pub mod scene;
pub mod input;
pub mod audio;
pub mod session;
pub mod config;

mod console;

pub use console::{ConsoleButtons, ConsoleError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        ConsoleButtons, ConsoleError,
        audio::{AudioCue, ButtonCues, CueLoader, LogCue},
        config::{ButtonKind, ButtonSpec, Config, ConsoleConfig},
        ecs::{
            components::{ButtonAction, ButtonConfig, ButtonState},
            Component, Entity, System, TickContext, World,
        },
        foundation::{
            math::{Point3, Transform, Vec3},
            time::Timer,
        },
        input::{Controller, HandSet, HandTracker, PointerHand, TrackedObject},
        scene::{NodeId, SceneGraph},
        session::{AnchorPose, FixedAnchor, Session, SharedSession},
    };
}
