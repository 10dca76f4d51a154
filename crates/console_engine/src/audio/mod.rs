//! Audio cues for button feedback
//!
//! Cues are loaded off the frame loop by a `CueLoader` and polled by the
//! button system; until they arrive, buttons are simply silent.

pub mod cue;
pub mod loader;

pub use cue::{AudioCue, ButtonCues, LogCue, SharedCue};
pub use loader::CueLoader;

use thiserror::Error;

/// Audio errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AudioError {
    /// A cue could not be loaded
    #[error("Failed to load audio cue: {0}")]
    Load(String),

    /// The loader thread went away without delivering a result
    #[error("Audio loader disconnected before delivering cues")]
    LoaderDisconnected,
}
