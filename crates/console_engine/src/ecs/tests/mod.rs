//! End-to-end tests of the button pipeline
//!
//! These run the real systems through a scheduler against a small scene,
//! the same way the console drives them every frame.

use super::components::{
    ButtonConfig, ButtonRuntimeState, ButtonState, NeedCalibration, OffsetFromCamera, Pressable,
    SpatialRef,
};
use super::systems::{ButtonSystem, CalibrationSystem, FingerInputSystem};
use super::{Entity, Scheduler, TickContext, World};
use crate::foundation::math::{Point3, Vec3};
use crate::input::{HandSet, PointerHand};
use crate::scene::NodeId;
use crate::session::{AnchorPose, FixedAnchor, NoAnchor};
use approx::assert_relative_eq;
use std::cell::Cell;
use std::rc::Rc;

const DELTA: f32 = 0.01;

struct Rig {
    world: World,
    scheduler: Scheduler,
    hands: HandSet,
    console: NodeId,
    button: NodeId,
    entity: Entity,
    presses: Rc<Cell<u32>>,
    elapsed: f32,
}

impl Rig {
    /// One button resting at world height 1.0 under a console at the origin
    fn new() -> Self {
        crate::foundation::logging::init_for_tests();
        let mut world = World::new();
        let console = world.scene_mut().create_node(Vec3::zeros());
        let button = world
            .scene_mut()
            .create_box("button", Vec3::new(0.08, 0.1, 0.08), Vec3::new(0.0, 1.0, 0.0));
        assert!(world.scene_mut().attach(console, button));

        let presses = Rc::new(Cell::new(0));
        let counter = Rc::clone(&presses);
        let entity = world.create_entity();
        world.add_component(entity, SpatialRef::new(button)).unwrap();
        world.add_component(entity, Pressable).unwrap();
        world
            .add_component(
                entity,
                ButtonConfig::new(0.05, 0.02)
                    .with_recovery_speed(0.4)
                    .with_action(move || counter.set(counter.get() + 1)),
            )
            .unwrap();
        world.add_component(entity, ButtonRuntimeState::new()).unwrap();

        let mut scheduler = Scheduler::new();
        scheduler.add_system(&mut world, CalibrationSystem::new());
        scheduler.add_system(&mut world, ButtonSystem::new());
        scheduler.add_system(&mut world, FingerInputSystem::new());

        Self {
            world,
            scheduler,
            hands: HandSet::with_slots(2),
            console,
            button,
            entity,
            presses,
            elapsed: 0.0,
        }
    }

    fn tick_with(&mut self, anchor: &dyn AnchorPose) {
        let ctx = TickContext::new(DELTA, self.elapsed, &self.hands, anchor, &[]);
        self.scheduler.tick(&mut self.world, &ctx);
        self.elapsed += DELTA;
    }

    fn tick(&mut self) {
        self.tick_with(&NoAnchor);
    }

    fn touch(&mut self, slot: usize, pointer: Point3) {
        self.hands.set_slot(slot, Some(Box::new(PointerHand::at(pointer))));
    }

    fn y(&self) -> f32 {
        self.world.scene().position(self.button).unwrap().y
    }

    fn state(&self) -> &ButtonRuntimeState {
        self.world.get_component::<ButtonRuntimeState>(self.entity).unwrap()
    }
}

#[test]
fn test_deep_press_clamps_and_fires_once() {
    let mut rig = Rig::new();
    rig.touch(0, Point3::new(0.0, 0.99, 0.0));

    rig.tick();
    assert_relative_eq!(rig.y(), 0.98, epsilon = 1e-6);
    assert_eq!(rig.state().curr_state, ButtonState::FullyPressed);
    assert_eq!(rig.presses.get(), 0);

    for _ in 0..20 {
        rig.tick();
        assert_relative_eq!(rig.y(), 0.98, epsilon = 1e-6);
    }
    assert_eq!(rig.presses.get(), 1);
}

#[test]
fn test_deepest_of_two_hands_wins() {
    let mut rig = Rig::new();
    rig.touch(0, Point3::new(0.0, 1.045, 0.0));
    rig.touch(1, Point3::new(0.01, 1.04, 0.0));

    rig.tick();
    assert_relative_eq!(rig.y(), 0.99, epsilon = 1e-6);
    assert_eq!(rig.state().curr_state, ButtonState::Pressed);
}

#[test]
fn test_release_recovers_monotonically_without_overshoot() {
    let mut rig = Rig::new();
    rig.touch(0, Point3::new(0.0, 0.99, 0.0));
    rig.tick();
    rig.hands.clear_slot(0);

    let mut previous = rig.y();
    let mut recovering_ticks = 0;
    for _ in 0..20 {
        rig.tick();
        let y = rig.y();
        assert!(y >= previous);
        assert!(y <= 1.0);
        previous = y;
        match rig.state().curr_state {
            ButtonState::Recovering => recovering_ticks += 1,
            ButtonState::Resting => break,
            other => panic!("unexpected state {other}"),
        }
    }

    assert_relative_eq!(rig.y(), 1.0);
    assert_eq!(rig.state().curr_state, ButtonState::Resting);
    assert!(recovering_ticks >= 5);
    assert_eq!(rig.presses.get(), 1);
}

#[test]
fn test_lost_hand_counts_as_release() {
    let mut rig = Rig::new();
    rig.touch(0, Point3::new(0.0, 1.04, 0.0));
    rig.tick();
    assert_eq!(rig.state().curr_state, ButtonState::Pressed);

    rig.hands.set_slot(0, Some(Box::new(PointerHand::without_pointer())));
    rig.tick();
    assert_eq!(rig.state().curr_state, ButtonState::Recovering);
    assert_eq!(rig.state().prev_state, ButtonState::Pressed);
}

#[test]
fn test_hand_beside_button_does_nothing() {
    let mut rig = Rig::new();
    rig.touch(0, Point3::new(0.5, 1.0, 0.0));
    for _ in 0..3 {
        rig.tick();
    }
    assert_relative_eq!(rig.y(), 1.0);
    assert_eq!(rig.state().curr_state, ButtonState::Resting);
}

#[test]
fn test_calibrated_console_carries_its_buttons() {
    let mut rig = Rig::new();
    let tagged = rig.world.create_entity();
    rig.world.add_component(tagged, SpatialRef::new(rig.console)).unwrap();
    rig.world.add_component(tagged, OffsetFromCamera::new(0.0, -0.4, -0.3)).unwrap();
    rig.world.add_component(tagged, NeedCalibration).unwrap();

    rig.tick_with(&FixedAnchor::unavailable());
    assert!(rig.world.has_component::<NeedCalibration>(tagged));

    rig.tick_with(&FixedAnchor::at(Point3::new(0.0, 1.6, 0.0)));
    assert!(!rig.world.has_component::<NeedCalibration>(tagged));
    let console = rig.world.scene().world_position(rig.console).unwrap();
    assert_relative_eq!(console, Point3::new(0.0, 1.2, -0.3), epsilon = 1e-5);
    let button = rig.world.scene().world_position(rig.button).unwrap();
    assert_relative_eq!(button, Point3::new(0.0, 2.2, -0.3), epsilon = 1e-5);

    rig.tick_with(&FixedAnchor::at(Point3::new(3.0, 0.0, 3.0)));
    let console_after = rig.world.scene().world_position(rig.console).unwrap();
    assert_relative_eq!(console_after, console);
}
