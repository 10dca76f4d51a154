//! Background cue loading
//!
//! The load job runs on its own thread and sends its result over a
//! channel. `poll` never blocks, so a slow decode cannot stall a frame.

use super::{AudioError, ButtonCues};
use crossbeam_channel::{bounded, Receiver, TryRecvError};
use std::thread;

/// Handle to an in-flight cue load
pub struct CueLoader {
    receiver: Option<Receiver<Result<ButtonCues, AudioError>>>,
}

impl CueLoader {
    /// Run `load` on a background thread
    pub fn spawn<F>(load: F) -> Self
    where
        F: FnOnce() -> Result<ButtonCues, AudioError> + Send + 'static,
    {
        let (sender, receiver) = bounded(1);
        thread::spawn(move || {
            // The receiver may already be gone if the console was dropped
            let _ = sender.send(load());
        });
        Self {
            receiver: Some(receiver),
        }
    }

    /// Loader whose cues are available on the first poll
    pub fn ready(cues: ButtonCues) -> Self {
        let (sender, receiver) = bounded(1);
        let _ = sender.send(Ok(cues));
        Self {
            receiver: Some(receiver),
        }
    }

    /// Whether a result is still outstanding
    pub fn is_pending(&self) -> bool {
        self.receiver.is_some()
    }

    /// Check for finished cues without blocking
    ///
    /// Yields `Some(Ok(..))` or `Some(Err(..))` exactly once, then `None` forever.
    pub fn poll(&mut self) -> Option<Result<ButtonCues, AudioError>> {
        let outcome = match self.receiver.as_ref()?.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(AudioError::LoaderDisconnected),
        };
        self.receiver = None;
        Some(outcome)
    }
}
