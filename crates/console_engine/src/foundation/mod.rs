//! Foundation module
//!
//! Shared building blocks: nalgebra-backed math types and transforms, the
//! frame timer that feeds `(delta, elapsed)` to every tick, and logger setup.

pub mod math;
pub mod time;
pub mod logging;
