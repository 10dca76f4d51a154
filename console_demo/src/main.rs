//! Console demo application
//!
//! Builds the four-button console with simulated collaborators and drives it
//! headlessly: a jittery finger presses each button in turn, ending with the
//! exit button, which ends the fake session after its delay.
//!
//! Usage: `console_demo [config.toml|config.ron]`

use console_engine::foundation::logging;
use console_engine::prelude::*;
use rand::Rng;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Fixed frame step (72 Hz headset refresh)
const FRAME_STEP: f32 = 1.0 / 72.0;
/// Safety cap so a broken config cannot loop forever
const MAX_FRAMES: u64 = 72 * 30;
/// Finger tip jitter in metres
const FINGER_JITTER: f32 = 0.002;

#[derive(Error, Debug)]
enum DemoError {
    #[error(transparent)]
    Console(#[from] ConsoleError),

    #[error("button '{0}' has no scene node")]
    MissingButton(String),
}

/// Session that is active until ended, with the viewer standing still
struct DemoSession {
    active: bool,
}

impl Session for DemoSession {
    fn is_active(&self) -> bool {
        self.active
    }

    fn viewer_position(&self) -> Point3 {
        Point3::new(0.0, 1.6, 0.0)
    }

    fn end(&mut self) {
        log::info!("Demo session ending");
        self.active = false;
    }
}

/// What the simulated finger is doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gesture {
    Hover,
    Press,
    Away,
}

/// One step of the finger script
struct Step {
    button: String,
    gesture: Gesture,
    seconds: f32,
}

fn script(config: &ConsoleConfig) -> Vec<Step> {
    config
        .buttons
        .iter()
        .flat_map(|button| {
            [(Gesture::Hover, 0.3), (Gesture::Press, 0.3), (Gesture::Away, 0.4)]
                .into_iter()
                .map(|(gesture, seconds)| Step {
                    button: button.name.clone(),
                    gesture,
                    seconds,
                })
        })
        .collect()
}

/// Place the finger for `step`, relative to its button's current world position
fn place_finger(console: &mut ConsoleButtons, step: &Step, rng: &mut impl Rng) -> Result<(), DemoError> {
    let node = console
        .button_node(&step.button)
        .ok_or_else(|| DemoError::MissingButton(step.button.clone()))?;
    let Some(centre) = console.world().scene().world_position(node) else {
        return Err(DemoError::MissingButton(step.button.clone()));
    };

    let local_y = match step.gesture {
        Gesture::Hover => 0.09,
        Gesture::Press => -0.01,
        Gesture::Away => {
            console.hands_mut().clear_slot(0);
            return Ok(());
        }
    };
    let jitter = Vec3::new(
        rng.gen_range(-FINGER_JITTER..FINGER_JITTER),
        rng.gen_range(-FINGER_JITTER..FINGER_JITTER),
        rng.gen_range(-FINGER_JITTER..FINGER_JITTER),
    );
    let finger = Point3::new(centre.x, centre.y + local_y, centre.z) + jitter;
    let radius = console.config().pointer_radius;
    console
        .hands_mut()
        .set_slot(0, Some(Box::new(PointerHand::at(finger).with_radius(radius))));
    Ok(())
}

fn load_config() -> Result<ConsoleConfig, ConsoleError> {
    match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading console config from {path}");
            Ok(ConsoleConfig::load(&path)?)
        }
        None => Ok(ConsoleConfig::default()),
    }
}

fn run() -> Result<(), DemoError> {
    let config = load_config()?;

    let loader = CueLoader::spawn(|| {
        // Stand-in for decoding sound files
        std::thread::sleep(Duration::from_millis(150));
        Ok(ButtonCues::new(
            Arc::new(LogCue::new("click-press")),
            Arc::new(LogCue::new("click-release")),
        ))
    });
    let mut console = ConsoleButtons::with_cue_loader(config.clone(), loader)?;

    let session: SharedSession = Rc::new(RefCell::new(DemoSession { active: true }));
    console.attach_session(&session);
    console.controllers_mut().push(Box::new(Controller::new(true)));
    console.controllers_mut().push(Box::new(Controller::new(false)));

    let mut rng = rand::thread_rng();
    let steps = script(&config);
    let mut step_index = 0;
    let mut step_started = 0.0;
    let mut timer = Timer::new();
    let mut last_states: Vec<Option<ButtonState>> = vec![None; config.buttons.len()];

    while session.borrow().is_active() && timer.frame_count() < MAX_FRAMES {
        if let Some(step) = steps.get(step_index) {
            place_finger(&mut console, step, &mut rng)?;
            if timer.total_time() - step_started >= step.seconds {
                step_index += 1;
                step_started = timer.total_time();
            }
        }

        timer.advance(FRAME_STEP);
        console.tick(timer.delta_time(), timer.total_time());

        for (button, last) in config.buttons.iter().zip(last_states.iter_mut()) {
            let state = console.button_state(&button.name);
            if state != *last {
                if let Some(state) = state {
                    log::info!("[{:6.3}s] {} -> {state}", timer.total_time(), button.name);
                }
                *last = state;
            }
        }
    }

    let showcase = console.showcase_node();
    log::info!(
        "Demo finished after {} frames ({:.2}s); showcase tint #{:06x}",
        timer.frame_count(),
        timer.total_time(),
        console.world().scene().tint(showcase).unwrap_or_default()
    );
    Ok(())
}

fn main() {
    logging::init();
    if let Err(err) = run() {
        log::error!("Console demo failed: {err}");
        std::process::exit(1);
    }
}
