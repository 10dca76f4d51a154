//! ECS Components module
//!
//! Pure data components; behaviour lives in `ecs::systems`.

pub mod button;
pub mod markers;
pub mod name;
pub mod offset;
pub mod spatial;

pub use button::{
    ButtonAction, ButtonConfig, ButtonConfigError, ButtonEdge, ButtonRuntimeState, ButtonState, NoopAction,
    DEFAULT_RECOVERY_SPEED,
};
pub use markers::{InstructionText, NeedCalibration, Pressable, Rotating};
pub use name::Name;
pub use offset::OffsetFromCamera;
pub use spatial::SpatialRef;
