//! Console layout and button tuning

use super::{Config, ConfigError};
use crate::ecs::components::DEFAULT_RECOVERY_SPEED;
use crate::ecs::systems::DEFAULT_ROTATION_RATE;
use crate::foundation::math::Vec3;
use crate::input::DEFAULT_POINTER_RADIUS;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tint restored by reset buttons
pub const DEFAULT_SHOWCASE_TINT: u32 = 0xffffff;

/// What pressing a button does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonKind {
    /// Tint the showcase object (0xRRGGBB)
    Tint(u32),
    /// Restore the showcase object's default tint
    Reset,
    /// Show the exit notice and end the session after a delay
    Exit,
}

/// One pressable button on the console
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButtonSpec {
    /// Lookup name for `set_action`
    pub name: String,
    /// Position relative to the console
    pub position: [f32; 3],
    /// Full box size
    #[serde(default = "default_button_size")]
    pub size: [f32; 3],
    /// Press surface height in the button's local frame
    #[serde(default = "default_surface_y")]
    pub surface_y: f32,
    /// Maximum travel below the resting height
    #[serde(default = "default_full_press_distance")]
    pub full_press_distance: f32,
    /// Spring-back speed in units per second
    #[serde(default = "default_recovery_speed")]
    pub recovery_speed: f32,
    /// Behaviour on full press
    pub kind: ButtonKind,
}

impl ButtonSpec {
    /// Button with the standard size and tuning
    pub fn new(name: impl Into<String>, position: [f32; 3], kind: ButtonKind) -> Self {
        Self {
            name: name.into(),
            position,
            size: default_button_size(),
            surface_y: default_surface_y(),
            full_press_distance: default_full_press_distance(),
            recovery_speed: default_recovery_speed(),
            kind,
        }
    }

    /// Position as a vector
    pub fn position(&self) -> Vec3 {
        Vec3::from(self.position)
    }

    /// Size as a vector
    pub fn size(&self) -> Vec3 {
        Vec3::from(self.size)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |what: &str| ConfigError::Invalid(format!("button '{}': {what}", self.name));
        if self.name.is_empty() {
            return Err(ConfigError::Invalid("button with empty name".to_owned()));
        }
        if self.full_press_distance <= 0.0 {
            return Err(invalid("full_press_distance must be positive"));
        }
        if self.recovery_speed <= 0.0 {
            return Err(invalid("recovery_speed must be positive"));
        }
        if self.size.iter().any(|&extent| extent <= 0.0) {
            return Err(invalid("size must be positive"));
        }
        Ok(())
    }
}

/// The box the buttons sit on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsoleSpec {
    /// Full box size
    pub size: [f32; 3],
    /// World position before calibration
    pub position: [f32; 3],
    /// Placement relative to the viewer once calibrated
    pub offset_from_camera: [f32; 3],
}

impl Default for ConsoleSpec {
    fn default() -> Self {
        Self {
            size: [0.5, 0.12, 0.15],
            position: [0.0, 1.0, -0.3],
            offset_from_camera: [0.0, -0.4, -0.3],
        }
    }
}

/// Everything needed to build the console scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Console box
    pub console: ConsoleSpec,
    /// Buttons, children of the console
    pub buttons: Vec<ButtonSpec>,
    /// Showcase spin in radians per second
    pub rotation_rate: f32,
    /// Showcase object position
    pub showcase_position: [f32; 3],
    /// Hint text position
    pub instruction_position: [f32; 3],
    /// Exit notice position
    pub exit_text_position: [f32; 3],
    /// Seconds between the exit press and the session ending
    pub exit_delay_secs: f32,
    /// Finger tip sphere radius
    pub pointer_radius: f32,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        let mut exit = ButtonSpec::new("exit", [0.15, 0.04, 0.0], ButtonKind::Exit);
        exit.full_press_distance = 0.03;
        exit.recovery_speed = 0.2;

        Self {
            console: ConsoleSpec::default(),
            buttons: vec![
                ButtonSpec::new("orange", [-0.15, 0.04, 0.0], ButtonKind::Tint(0xffd3b5)),
                ButtonSpec::new("pink", [-0.05, 0.04, 0.0], ButtonKind::Tint(0xe84a5f)),
                ButtonSpec::new("reset", [0.05, 0.04, 0.0], ButtonKind::Reset),
                exit,
            ],
            rotation_rate: DEFAULT_ROTATION_RATE,
            showcase_position: [0.0, 1.0, -5.0],
            instruction_position: [0.0, 1.6, -0.6],
            exit_text_position: [0.0, 1.5, -0.6],
            exit_delay_secs: 2.0,
            pointer_radius: DEFAULT_POINTER_RADIUS,
        }
    }
}

impl Config for ConsoleConfig {}

impl ConsoleConfig {
    /// Load from `.toml` or `.ron` and validate
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = Self::load_from_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the console cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.console.size.iter().any(|&extent| extent <= 0.0) {
            return Err(ConfigError::Invalid("console size must be positive".to_owned()));
        }
        if self.exit_delay_secs < 0.0 {
            return Err(ConfigError::Invalid("exit_delay_secs must not be negative".to_owned()));
        }
        if self.pointer_radius <= 0.0 {
            return Err(ConfigError::Invalid("pointer_radius must be positive".to_owned()));
        }
        for (index, button) in self.buttons.iter().enumerate() {
            button.validate()?;
            if self.buttons[..index].iter().any(|other| other.name == button.name) {
                return Err(ConfigError::Invalid(format!("duplicate button '{}'", button.name)));
            }
        }
        Ok(())
    }
}

fn default_button_size() -> [f32; 3] {
    [0.08, 0.1, 0.08]
}

fn default_surface_y() -> f32 {
    0.05
}

fn default_full_press_distance() -> f32 {
    0.02
}

fn default_recovery_speed() -> f32 {
    DEFAULT_RECOVERY_SPEED
}
