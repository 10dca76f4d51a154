//! Button components
//!
//! `ButtonConfig` is fixed at creation (only the action can be swapped);
//! `ButtonRuntimeState` is written by the two button systems each tick.

use crate::audio::ButtonCues;
use crate::ecs::Component;
use std::fmt;
use thiserror::Error;

/// Default speed at which a released button springs back, in units per second
pub const DEFAULT_RECOVERY_SPEED: f32 = 0.4;

/// Physical state of a button
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ButtonState {
    /// At rest, nothing touching it
    #[default]
    Resting,
    /// A hand is inside the button volume
    Pressed,
    /// Pushed down by the full press distance
    FullyPressed,
    /// Released and travelling back up
    Recovering,
}

impl fmt::Display for ButtonState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Resting => "resting",
            Self::Pressed => "pressed",
            Self::FullyPressed => "fully_pressed",
            Self::Recovering => "recovering",
        };
        f.write_str(label)
    }
}

/// Edge observed between two consecutive finalized states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEdge {
    /// Entered `FullyPressed`
    Press,
    /// Entered `Recovering`
    Release,
}

/// Button geometry that cannot work
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ButtonConfigError {
    /// Full press distance is zero, negative or NaN
    #[error("full press distance must be positive, got {0}")]
    FullPressDistance(f32),

    /// Recovery speed is zero, negative or NaN
    #[error("recovery speed must be positive, got {0}")]
    RecoverySpeed(f32),

    /// Surface height is infinite or NaN
    #[error("surface height must be finite, got {0}")]
    SurfaceY(f32),
}

/// Side effect run when a button is fully pressed
pub trait ButtonAction {
    /// Run the action
    fn invoke(&mut self);
}

impl<F: FnMut()> ButtonAction for F {
    fn invoke(&mut self) {
        self();
    }
}

/// Action that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAction;

impl ButtonAction for NoopAction {
    fn invoke(&mut self) {}
}

/// Immutable press geometry plus the replaceable action
pub struct ButtonConfig {
    surface_y: f32,
    full_press_distance: f32,
    recovery_speed: f32,
    action: Box<dyn ButtonAction>,
}

impl ButtonConfig {
    /// Create a config with the default recovery speed and no action
    pub fn new(surface_y: f32, full_press_distance: f32) -> Self {
        Self {
            surface_y,
            full_press_distance,
            recovery_speed: DEFAULT_RECOVERY_SPEED,
            action: Box::new(NoopAction),
        }
    }

    /// Builder pattern: set recovery speed
    #[must_use]
    pub fn with_recovery_speed(mut self, recovery_speed: f32) -> Self {
        self.recovery_speed = recovery_speed;
        self
    }

    /// Builder pattern: set the action
    #[must_use]
    pub fn with_action(mut self, action: impl ButtonAction + 'static) -> Self {
        self.action = Box::new(action);
        self
    }

    /// Check the geometry is usable
    pub fn validate(&self) -> Result<(), ButtonConfigError> {
        if !(self.full_press_distance > 0.0) {
            return Err(ButtonConfigError::FullPressDistance(self.full_press_distance));
        }
        if !(self.recovery_speed > 0.0) {
            return Err(ButtonConfigError::RecoverySpeed(self.recovery_speed));
        }
        if !self.surface_y.is_finite() {
            return Err(ButtonConfigError::SurfaceY(self.surface_y));
        }
        Ok(())
    }

    /// Local-frame height of the press surface
    pub fn surface_y(&self) -> f32 {
        self.surface_y
    }

    /// Maximum travel below the resting height
    pub fn full_press_distance(&self) -> f32 {
        self.full_press_distance
    }

    /// Spring-back speed in units per second
    pub fn recovery_speed(&self) -> f32 {
        self.recovery_speed
    }

    /// Replace the action; the only mutation allowed after creation
    pub fn set_action(&mut self, action: Box<dyn ButtonAction>) {
        self.action = action;
    }

    /// Run the action
    pub fn invoke_action(&mut self) {
        self.action.invoke();
    }
}

impl fmt::Debug for ButtonConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ButtonConfig")
            .field("surface_y", &self.surface_y)
            .field("full_press_distance", &self.full_press_distance)
            .field("recovery_speed", &self.recovery_speed)
            .finish_non_exhaustive()
    }
}

impl Component for ButtonConfig {}

/// Per-tick button state
#[derive(Debug, Clone, Default)]
pub struct ButtonRuntimeState {
    /// State computed by the finger input system this tick
    pub curr_state: ButtonState,
    /// State finalized on the previous tick
    pub prev_state: ButtonState,
    resting_y: Option<f32>,
    cues: Option<ButtonCues>,
}

impl ButtonRuntimeState {
    /// Fresh state, resting with nothing captured yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Resting height, once captured
    pub fn resting_y(&self) -> Option<f32> {
        self.resting_y
    }

    /// Capture the resting height on first observation; later calls keep the first value
    pub fn capture_resting_y(&mut self, y: f32) -> f32 {
        *self.resting_y.get_or_insert(y)
    }

    /// Attached cues
    pub fn cues(&self) -> Option<&ButtonCues> {
        self.cues.as_ref()
    }

    /// Attach cues; returns false if cues were already attached
    pub fn attach_cues(&mut self, cues: ButtonCues) -> bool {
        if self.cues.is_some() {
            return false;
        }
        self.cues = Some(cues);
        true
    }

    /// Compare the finalized state against the previous one, then roll over
    ///
    /// After this call `prev_state` holds the finalized state and `curr_state`
    /// is back to `Resting` until the finger input system recomputes it.
    pub fn finalize(&mut self) -> Option<ButtonEdge> {
        let edge = match (self.prev_state, self.curr_state) {
            (prev, ButtonState::FullyPressed) if prev != ButtonState::FullyPressed => {
                Some(ButtonEdge::Press)
            }
            (prev, ButtonState::Recovering) if prev != ButtonState::Recovering => {
                Some(ButtonEdge::Release)
            }
            _ => None,
        };
        self.prev_state = self.curr_state;
        self.curr_state = ButtonState::Resting;
        edge
    }
}

impl Component for ButtonRuntimeState {}
