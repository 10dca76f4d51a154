//! Four-button console
//!
//! `ConsoleButtons` owns the world, the ordered systems and every external
//! collaborator, builds the console scene from a `ConsoleConfig`, and drives
//! it one frame at a time.

use crate::audio::CueLoader;
use crate::config::console::DEFAULT_SHOWCASE_TINT;
use crate::config::{ButtonKind, ButtonSpec, ConfigError, ConsoleConfig};
use crate::ecs::components::{
    ButtonAction, ButtonConfig, ButtonConfigError, ButtonRuntimeState, ButtonState, InstructionText, Name,
    NeedCalibration, OffsetFromCamera, Pressable, Rotating, SpatialRef,
};
use crate::ecs::systems::{
    ButtonSystem, CalibrationSystem, FingerInputSystem, InstructionSystem, RotatingSystem,
};
use crate::ecs::{EcsError, Entity, Scheduler, TickContext, World};
use crate::foundation::math::Vec3;
use crate::input::{HandSet, TrackedObject};
use crate::scene::{NodeId, SceneCommand, SceneCommands};
use crate::session::{AnchorPose, DeferredActions, NoAnchor, Session, SessionAnchor, SharedSession};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use thiserror::Error;

/// Size of the rotating showcase object
const SHOWCASE_SIZE: [f32; 3] = [0.6, 0.6, 0.2];

/// Console errors
#[derive(Error, Debug)]
pub enum ConsoleError {
    /// Entity or component problem
    #[error(transparent)]
    Ecs(#[from] EcsError),

    /// Configuration problem
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Button tuning that cannot work
    #[error("Invalid button '{name}': {source}")]
    InvalidButton {
        /// Button name
        name: String,
        /// What is wrong with its geometry
        #[source]
        source: ButtonConfigError,
    },

    /// Button registered against a node the scene does not hold
    #[error("Button '{0}' refers to a missing scene node")]
    UnknownNode(String),
}

/// Session the exit button ends, filled in once one is attached
type SessionSlot = Rc<RefCell<Option<Weak<RefCell<dyn Session>>>>>;

/// Hand-pressable console with its scene, systems and collaborators
pub struct ConsoleButtons {
    world: World,
    scheduler: Scheduler,
    hands: HandSet,
    anchor: Box<dyn AnchorPose>,
    controllers: Vec<Box<dyn TrackedObject>>,
    deferred: DeferredActions,
    commands: SceneCommands,
    session: SessionSlot,
    config: ConsoleConfig,
    console: NodeId,
    showcase: NodeId,
    instruction_text: NodeId,
    exit_text: NodeId,
}

impl ConsoleButtons {
    /// Build a silent console
    pub fn new(config: ConsoleConfig) -> Result<Self, ConsoleError> {
        Self::build(config, None)
    }

    /// Build a console whose buttons play the cues `loader` delivers
    pub fn with_cue_loader(config: ConsoleConfig, loader: CueLoader) -> Result<Self, ConsoleError> {
        Self::build(config, Some(loader))
    }

    fn build(config: ConsoleConfig, loader: Option<CueLoader>) -> Result<Self, ConsoleError> {
        config.validate()?;

        let mut world = World::new();
        let scene = world.scene_mut();
        let console = scene.create_box(
            "console",
            Vec3::from(config.console.size),
            Vec3::from(config.console.position),
        );
        let showcase = scene.create_box("showcase", Vec3::from(SHOWCASE_SIZE), Vec3::from(config.showcase_position));
        scene.set_tint(showcase, DEFAULT_SHOWCASE_TINT);
        let instruction_text = scene.create_node(Vec3::from(config.instruction_position));
        scene.set_visible(instruction_text, false);
        let exit_text = scene.create_node(Vec3::from(config.exit_text_position));
        scene.set_visible(exit_text, false);

        let mut scheduler = Scheduler::new();
        scheduler.add_system(&mut world, RotatingSystem::new(config.rotation_rate));
        scheduler.add_system(&mut world, InstructionSystem::new());
        scheduler.add_system(&mut world, CalibrationSystem::new());
        let buttons = match loader {
            Some(loader) => ButtonSystem::new().with_cue_loader(loader),
            None => ButtonSystem::new(),
        };
        scheduler.add_system(&mut world, buttons);
        scheduler.add_system(&mut world, FingerInputSystem::new());

        let mut console_buttons = Self {
            world,
            scheduler,
            hands: HandSet::with_slots(2),
            anchor: Box::new(NoAnchor),
            controllers: Vec::new(),
            deferred: DeferredActions::new(),
            commands: SceneCommands::new(),
            session: Rc::new(RefCell::new(None)),
            config,
            console,
            showcase,
            instruction_text,
            exit_text,
        };
        console_buttons.populate()?;
        log::info!(
            "Console ready with {} buttons and systems {:?}",
            console_buttons.config.buttons.len(),
            console_buttons.scheduler.system_names()
        );
        Ok(console_buttons)
    }

    fn populate(&mut self) -> Result<(), ConsoleError> {
        let world = &mut self.world;

        let console = world.create_entity();
        world.add_component(console, Name::new("console"))?;
        world.add_component(console, SpatialRef::new(self.console))?;
        world.add_component(console, OffsetFromCamera::from(Vec3::from(self.config.console.offset_from_camera)))?;
        world.add_component(console, NeedCalibration)?;

        let showcase = world.create_entity();
        world.add_component(showcase, Name::new("showcase"))?;
        world.add_component(showcase, SpatialRef::new(self.showcase))?;
        world.add_component(showcase, Rotating)?;

        let instruction = world.create_entity();
        world.add_component(instruction, Name::new("instruction_text"))?;
        world.add_component(instruction, SpatialRef::new(self.instruction_text))?;
        world.add_component(instruction, InstructionText)?;

        let exit_text = world.create_entity();
        world.add_component(exit_text, Name::new("exit_text"))?;
        world.add_component(exit_text, SpatialRef::new(self.exit_text))?;

        for spec in self.config.buttons.clone() {
            self.add_button(&spec)?;
        }
        Ok(())
    }

    fn add_button(&mut self, spec: &ButtonSpec) -> Result<Entity, ConsoleError> {
        let scene = self.world.scene_mut();
        let node = scene.create_box(&spec.name, spec.size(), spec.position());
        scene.attach(self.console, node);

        let mut config = ButtonConfig::new(spec.surface_y, spec.full_press_distance)
            .with_recovery_speed(spec.recovery_speed);
        config.set_action(self.action_for(spec.kind));
        self.register_button_entity(&spec.name, node, config)
    }

    fn action_for(&self, kind: ButtonKind) -> Box<dyn ButtonAction> {
        let commands = self.commands.clone();
        let showcase = self.showcase;
        match kind {
            ButtonKind::Tint(tint) => Box::new(move || {
                log::info!("Tinting showcase #{tint:06x}");
                commands.push(SceneCommand::SetTint(showcase, tint));
            }),
            ButtonKind::Reset => Box::new(move || {
                log::info!("Resetting showcase tint");
                commands.push(SceneCommand::SetTint(showcase, DEFAULT_SHOWCASE_TINT));
            }),
            ButtonKind::Exit => {
                let exit_text = self.exit_text;
                let delay = self.config.exit_delay_secs;
                let deferred = self.deferred.handle();
                let session = Rc::clone(&self.session);
                Box::new(move || {
                    log::info!("Exiting session in {delay:.1}s");
                    commands.push(SceneCommand::SetVisible(exit_text, true));
                    let commands = commands.clone();
                    let session = Rc::clone(&session);
                    deferred.schedule(delay, move || {
                        commands.push(SceneCommand::SetVisible(exit_text, false));
                        end_session(&session);
                    });
                })
            }
        }
    }

    /// Make an existing node a pressable button
    ///
    /// The resting height is captured from the node on the first tick.
    pub fn register_button_entity(
        &mut self,
        name: &str,
        node: NodeId,
        config: ButtonConfig,
    ) -> Result<Entity, ConsoleError> {
        config.validate().map_err(|source| ConsoleError::InvalidButton {
            name: name.to_owned(),
            source,
        })?;
        if !self.world.scene().contains(node) {
            return Err(ConsoleError::UnknownNode(name.to_owned()));
        }

        let entity = self.world.create_entity();
        self.world.add_component(entity, Name::new(name))?;
        self.world.add_component(entity, SpatialRef::new(node))?;
        self.world.add_component(entity, Pressable)?;
        self.world.add_component(entity, config)?;
        self.world.add_component(entity, ButtonRuntimeState::new())?;
        log::debug!("Registered button '{name}' as {entity}");
        Ok(entity)
    }

    /// Replace the action of the named button
    pub fn set_action(&mut self, name: &str, action: impl ButtonAction + 'static) -> Result<(), ConsoleError> {
        let entity = self.find_button(name)?;
        self.world
            .get_component_mut::<ButtonConfig>(entity)?
            .set_action(Box::new(action));
        Ok(())
    }

    /// Run one frame
    ///
    /// Systems run first; deferred actions and queued scene edits are applied
    /// afterwards, outside any system.
    pub fn tick(&mut self, delta: f32, elapsed_time: f32) {
        let ctx = TickContext::new(
            delta,
            elapsed_time,
            &self.hands,
            self.anchor.as_ref(),
            &self.controllers,
        );
        self.deferred.advance_clock(elapsed_time);
        self.scheduler.tick(&mut self.world, &ctx);
        self.deferred.run_due(elapsed_time);
        self.commands.apply(self.world.scene_mut());
    }

    /// Resolve a name among buttons only
    fn find_button(&self, name: &str) -> Result<Entity, EcsError> {
        self.world
            .find_by_name_with::<ButtonConfig>(name)
            .ok_or_else(|| EcsError::EntityNotFound(name.to_owned()))
    }

    /// State computed for the named button on the latest tick
    pub fn button_state(&self, name: &str) -> Option<ButtonState> {
        let entity = self.find_button(name).ok()?;
        self.world
            .get_component::<ButtonRuntimeState>(entity)
            .ok()
            .map(|state| state.curr_state)
    }

    /// Scene node of the named button
    pub fn button_node(&self, name: &str) -> Option<NodeId> {
        let entity = self.find_button(name).ok()?;
        self.world
            .get_component::<SpatialRef>(entity)
            .ok()
            .map(SpatialRef::node)
    }

    /// Use a session's viewer as the anchor and let the exit button end it
    pub fn attach_session(&mut self, session: &SharedSession) {
        self.anchor = Box::new(SessionAnchor::new(session));
        *self.session.borrow_mut() = Some(Rc::downgrade(session));
    }

    /// Replace the calibration anchor
    pub fn set_anchor(&mut self, anchor: Box<dyn AnchorPose>) {
        self.anchor = anchor;
    }

    /// Hand slots
    pub fn hands(&self) -> &HandSet {
        &self.hands
    }

    /// Hand slots, for the input layer to update each frame
    pub fn hands_mut(&mut self) -> &mut HandSet {
        &mut self.hands
    }

    /// Tracked controllers driving the hint text
    pub fn controllers_mut(&mut self) -> &mut Vec<Box<dyn TrackedObject>> {
        &mut self.controllers
    }

    /// The ECS world
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The ECS world, mutably
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Configuration the console was built from
    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    /// Registered system names in execution order
    pub fn system_names(&self) -> Vec<&'static str> {
        self.scheduler.system_names()
    }

    /// Console box node
    pub fn console_node(&self) -> NodeId {
        self.console
    }

    /// Rotating showcase node
    pub fn showcase_node(&self) -> NodeId {
        self.showcase
    }

    /// Hint text node
    pub fn instruction_text_node(&self) -> NodeId {
        self.instruction_text
    }

    /// Exit notice node
    pub fn exit_text_node(&self) -> NodeId {
        self.exit_text
    }

    /// Deferred actions still waiting
    pub fn pending_actions(&self) -> usize {
        self.deferred.pending()
    }
}

fn end_session(slot: &SessionSlot) {
    let Some(session) = slot.borrow().as_ref().and_then(Weak::upgrade) else {
        log::debug!("Session already gone, nothing to end");
        return;
    };
    let active = session.borrow().is_active();
    if active {
        session.borrow_mut().end();
        log::info!("Session ended");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Point3;
    use crate::input::{Controller, PointerHand};
    use crate::session::FixedAnchor;
    use std::cell::Cell;

    const DELTA: f32 = 0.01;

    struct FakeSession {
        active: bool,
        ended: Rc<Cell<u32>>,
    }

    impl Session for FakeSession {
        fn is_active(&self) -> bool {
            self.active
        }

        fn viewer_position(&self) -> Point3 {
            Point3::new(0.0, 1.6, 0.0)
        }

        fn end(&mut self) {
            self.active = false;
            self.ended.set(self.ended.get() + 1);
        }
    }

    struct Driver {
        console: ConsoleButtons,
        elapsed: f32,
    }

    impl Driver {
        fn new() -> Self {
            Self::with_config(ConsoleConfig::default())
        }

        fn with_config(config: ConsoleConfig) -> Self {
            crate::foundation::logging::init_for_tests();
            Self {
                console: ConsoleButtons::new(config).unwrap(),
                elapsed: 0.0,
            }
        }

        fn tick(&mut self) {
            self.elapsed += DELTA;
            self.console.tick(DELTA, self.elapsed);
        }

        fn wait(&mut self, seconds: f32) {
            let start = self.elapsed;
            while self.elapsed - start < seconds {
                self.tick();
            }
        }

        /// Put a finger 0.01 below the named button's surface
        fn press(&mut self, name: &str) {
            let node = self.console.button_node(name).unwrap();
            let centre = self.console.world().scene().world_position(node).unwrap();
            let finger = Point3::new(centre.x, centre.y - 0.01, centre.z);
            self.console.hands_mut().set_slot(0, Some(Box::new(PointerHand::at(finger))));
        }

        fn release(&mut self) {
            self.console.hands_mut().clear_slot(0);
        }

        fn showcase_tint(&self) -> Option<u32> {
            self.console.world().scene().tint(self.console.showcase_node())
        }
    }

    #[test]
    fn test_systems_run_in_console_order() {
        let driver = Driver::new();
        assert_eq!(
            driver.console.system_names(),
            ["rotating", "instruction", "calibration", "button", "finger_input"]
        );
        for name in ["orange", "pink", "reset", "exit"] {
            assert_eq!(driver.console.button_state(name), Some(ButtonState::Resting));
        }
    }

    #[test]
    fn test_tint_and_reset_buttons() {
        let mut driver = Driver::new();
        assert_eq!(driver.showcase_tint(), Some(DEFAULT_SHOWCASE_TINT));

        driver.press("orange");
        driver.tick();
        assert_eq!(driver.console.button_state("orange"), Some(ButtonState::FullyPressed));
        driver.tick();
        assert_eq!(driver.showcase_tint(), Some(0xffd3b5));

        driver.release();
        driver.wait(0.2);
        driver.press("pink");
        driver.wait(0.05);
        assert_eq!(driver.showcase_tint(), Some(0xe84a5f));

        driver.release();
        driver.wait(0.2);
        driver.press("reset");
        driver.wait(0.05);
        assert_eq!(driver.showcase_tint(), Some(DEFAULT_SHOWCASE_TINT));
    }

    #[test]
    fn test_exit_button_ends_session_after_delay() {
        let mut driver = Driver::new();
        let ended = Rc::new(Cell::new(0));
        let session: SharedSession = Rc::new(RefCell::new(FakeSession {
            active: true,
            ended: Rc::clone(&ended),
        }));
        driver.console.attach_session(&session);
        driver.tick();

        let exit_text = driver.console.exit_text_node();
        driver.press("exit");
        driver.tick();
        driver.tick();
        assert_eq!(driver.console.world().scene().is_visible(exit_text), Some(true));
        assert_eq!(driver.console.pending_actions(), 1);

        driver.release();
        driver.wait(1.0);
        assert_eq!(ended.get(), 0);
        driver.wait(1.1);
        assert_eq!(ended.get(), 1);
        assert!(!session.borrow().is_active());
        assert_eq!(driver.console.world().scene().is_visible(exit_text), Some(false));
    }

    #[test]
    fn test_exit_after_session_dropped_is_harmless() {
        let mut driver = Driver::new();
        let ended = Rc::new(Cell::new(0));
        let session: SharedSession = Rc::new(RefCell::new(FakeSession {
            active: true,
            ended: Rc::clone(&ended),
        }));
        driver.console.attach_session(&session);
        driver.tick();

        driver.press("exit");
        driver.tick();
        driver.tick();
        drop(session);
        driver.release();
        driver.wait(2.5);

        assert_eq!(ended.get(), 0);
        assert_eq!(driver.console.pending_actions(), 0);
    }

    #[test]
    fn test_console_calibrates_to_session_viewer() {
        let mut driver = Driver::new();
        driver.console.set_anchor(Box::new(FixedAnchor::at(Point3::new(0.0, 1.6, 0.0))));
        driver.tick();

        let console = driver.console.console_node();
        let position = driver.console.world().scene().world_position(console).unwrap();
        approx::assert_relative_eq!(position, Point3::new(0.0, 1.2, -0.3), epsilon = 1e-5);
    }

    #[test]
    fn test_set_action_replaces_and_reports_unknown_names() {
        let mut driver = Driver::new();
        let fired = Rc::new(Cell::new(0));
        let counter = Rc::clone(&fired);
        driver
            .console
            .set_action("pink", move || counter.set(counter.get() + 1))
            .unwrap();

        driver.press("pink");
        driver.wait(0.1);
        assert_eq!(fired.get(), 1);
        assert_eq!(driver.showcase_tint(), Some(DEFAULT_SHOWCASE_TINT));

        let err = driver.console.set_action("missing", || {}).unwrap_err();
        assert!(matches!(err, ConsoleError::Ecs(EcsError::EntityNotFound(name)) if name == "missing"));
    }

    #[test]
    fn test_button_names_do_not_resolve_to_scene_entities() {
        let mut driver = Driver::new();
        for name in ["console", "showcase", "instruction_text", "exit_text"] {
            let err = driver.console.set_action(name, || {}).unwrap_err();
            assert!(matches!(err, ConsoleError::Ecs(EcsError::EntityNotFound(_))));
            assert_eq!(driver.console.button_state(name), None);
        }
    }

    #[test]
    fn test_button_may_share_a_scene_entity_name() {
        let mut config = ConsoleConfig::default();
        config.buttons[0].name = "showcase".to_owned();
        let mut driver = Driver::with_config(config);
        let fired = Rc::new(Cell::new(0));
        let counter = Rc::clone(&fired);
        driver
            .console
            .set_action("showcase", move || counter.set(counter.get() + 1))
            .unwrap();
        assert_eq!(driver.console.button_state("showcase"), Some(ButtonState::Resting));

        driver.press("showcase");
        driver.wait(0.1);
        assert_eq!(fired.get(), 1);
        assert_eq!(driver.showcase_tint(), Some(DEFAULT_SHOWCASE_TINT));
    }

    #[test]
    fn test_register_rejects_bad_tuning() {
        let mut driver = Driver::new();
        let node = driver.console.world_mut().scene_mut().create_box(
            "extra",
            Vec3::new(0.08, 0.1, 0.08),
            Vec3::zeros(),
        );
        let err = driver
            .console
            .register_button_entity("extra", node, ButtonConfig::new(0.05, 0.0))
            .unwrap_err();
        assert!(matches!(
            err,
            ConsoleError::InvalidButton {
                source: ButtonConfigError::FullPressDistance(_),
                ..
            }
        ));

        let entity = driver
            .console
            .register_button_entity("extra", node, ButtonConfig::new(0.05, 0.02))
            .unwrap();
        assert!(driver.console.world().has_component::<Pressable>(entity));
    }

    #[test]
    fn test_hint_text_follows_controllers() {
        let mut driver = Driver::new();
        let hint = driver.console.instruction_text_node();
        driver.tick();
        assert_eq!(driver.console.world().scene().is_visible(hint), Some(false));

        driver.console.controllers_mut().push(Box::new(Controller::new(true)));
        driver.tick();
        assert_eq!(driver.console.world().scene().is_visible(hint), Some(true));
    }
}
