//! Audio cue abstraction

use std::fmt;
use std::sync::Arc;

/// A short sound that can be triggered
pub trait AudioCue: Send + Sync {
    /// Start playback
    fn play(&self);
}

/// Shared handle to a cue; every button plays the same buffers
pub type SharedCue = Arc<dyn AudioCue>;

/// Press and release sounds attached to a button
#[derive(Clone, Default)]
pub struct ButtonCues {
    /// Played when the button bottoms out
    pub press: Option<SharedCue>,
    /// Played when the button starts springing back
    pub release: Option<SharedCue>,
}

impl ButtonCues {
    /// Create a cue pair
    pub fn new(press: SharedCue, release: SharedCue) -> Self {
        Self {
            press: Some(press),
            release: Some(release),
        }
    }

    /// Play the press cue, if attached
    pub fn play_press(&self) {
        if let Some(cue) = &self.press {
            cue.play();
        }
    }

    /// Play the release cue, if attached
    pub fn play_release(&self) {
        if let Some(cue) = &self.release {
            cue.play();
        }
    }
}

impl fmt::Debug for ButtonCues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ButtonCues")
            .field("press", &self.press.is_some())
            .field("release", &self.release.is_some())
            .finish()
    }
}

/// Cue that writes to the log instead of producing sound
#[derive(Debug, Clone)]
pub struct LogCue {
    label: String,
}

impl LogCue {
    /// Create a logging cue
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    /// Cue label
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl AudioCue for LogCue {
    fn play(&self) {
        log::info!("Playing cue '{}'", self.label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingCue(AtomicUsize);

    impl AudioCue for CountingCue {
        fn play(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_missing_cues_are_silent() {
        let cues = ButtonCues::default();
        cues.play_press();
        cues.play_release();
    }

    #[test]
    fn test_play_routes_to_matching_cue() {
        let press = Arc::new(CountingCue(AtomicUsize::new(0)));
        let release = Arc::new(CountingCue(AtomicUsize::new(0)));
        let cues = ButtonCues::new(press.clone(), release.clone());

        cues.play_press();
        cues.play_press();
        cues.play_release();

        assert_eq!(press.0.load(Ordering::SeqCst), 2);
        assert_eq!(release.0.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_log_cue_plays_through_button_cues() {
        crate::foundation::logging::init_for_tests();
        let press = Arc::new(LogCue::new("click-down"));
        let cues = ButtonCues::new(press.clone(), Arc::new(LogCue::new("click-up")));
        assert_eq!(press.label(), "click-down");
        cues.play_press();
        cues.play_release();
    }
}
