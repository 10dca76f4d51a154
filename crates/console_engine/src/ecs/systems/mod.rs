//! Systems driving the button console
//!
//! Register them in this order: rotation, instruction text, calibration,
//! then `ButtonSystem` immediately before `FingerInputSystem`.

pub mod button_system;
pub mod calibration_system;
pub mod finger_input_system;
pub mod instruction_system;
pub mod rotating_system;

pub use button_system::ButtonSystem;
pub use calibration_system::CalibrationSystem;
pub use finger_input_system::{press_step, FingerInputSystem, PressInput, PressStep};
pub use instruction_system::InstructionSystem;
pub use rotating_system::{RotatingSystem, DEFAULT_ROTATION_RATE};
