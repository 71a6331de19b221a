use bevy_hero_controller::math::Float;
use bevy_hero_controller::prelude::*;
use bevy_hero_controller::{HeroInputConfig, HeroJumpState};

const DT: Float = 1.0 / 64.0;

fn tuning(jump_count: usize) -> HeroTuning {
    let jump = HeroJumpTuning {
        jump_speed: 10.0,
        jump_min_duration: 0.0625,
        jump_max_duration: 0.125,
    };
    HeroTuning {
        jumps: vec![jump; jump_count],
        ..Default::default()
    }
}

/// A hero whose fixed tick runs once per frame, right before the input is handled.
struct Hero {
    core: HeroMovementCore,
    mediator: HeroInputMediator,
}

impl Hero {
    fn new(jump_count: usize) -> Self {
        Self::with_config(
            jump_count,
            HeroInputConfig {
                coyote_duration: 0.25,
                ..Default::default()
            },
        )
    }

    fn with_config(jump_count: usize, config: HeroInputConfig) -> Self {
        Self {
            core: HeroMovementCore::new(tuning(jump_count)).unwrap(),
            mediator: HeroInputMediator::new(config),
        }
    }

    fn frame(&mut self, input: HeroInputFrame, ground: bool) {
        self.core.tick(DT, ground);
        self.mediator.update(&input, DT, &mut self.core);
    }

    fn idle(&mut self, ground: bool) {
        self.frame(HeroInputFrame::default(), ground);
    }

    fn press_jump(&mut self, ground: bool) {
        self.frame(
            HeroInputFrame {
                jump_pressed: true,
                jump_held: true,
                ..Default::default()
            },
            ground,
        );
    }

    fn charges_used(&self) -> usize {
        self.mediator.state().multi_jump_charges_used
    }
}

const JUMP_PRESS: HeroInputFrame = HeroInputFrame {
    left_held: false,
    right_held: false,
    jump_pressed: true,
    jump_held: true,
    dash_pressed: false,
};

const JUMP_HELD: HeroInputFrame = HeroInputFrame {
    left_held: false,
    right_held: false,
    jump_pressed: false,
    jump_held: true,
    dash_pressed: false,
};

#[test]
fn move_axis_cancels_when_both_held() {
    let both = HeroInputFrame {
        left_held: true,
        right_held: true,
        ..Default::default()
    };
    assert_eq!(both.move_axis(), 0.0);

    let mut hero = Hero::new(1);
    hero.frame(both, true);
    assert_eq!(hero.core.state().move_dir_x, 0.0);

    hero.frame(
        HeroInputFrame {
            left_held: true,
            ..Default::default()
        },
        true,
    );
    assert_eq!(hero.core.state().move_dir_x, -1.0);
}

#[test]
fn grounded_jump() {
    let mut hero = Hero::new(1);
    hero.idle(true);
    hero.press_jump(true);
    assert!(hero.core.is_jump_impulsing());
    assert_eq!(hero.charges_used(), 0);
}

#[test]
fn coyote_time_honors_a_late_jump() {
    let mut hero = Hero::new(1);
    hero.idle(true);
    // Walk off the ledge at t=0.
    hero.idle(false);
    assert!(hero.mediator.is_coyote_time_active());

    // coyote_duration = 0.25s = 16 frames
    for _ in 0..14 {
        hero.idle(false);
    }
    hero.press_jump(false);
    assert!(hero.core.is_jump_impulsing());
    assert_eq!(hero.charges_used(), 0);
}

#[test]
fn coyote_time_expires() {
    let mut hero = Hero::new(1);
    hero.idle(true);
    hero.idle(false);
    for _ in 0..16 {
        hero.idle(false);
    }
    assert!(!hero.mediator.is_coyote_time_active());
    hero.press_jump(false);
    // A single jump is configured, so there is no air jump to fall back to.
    assert!(!hero.core.is_jumping());
}

#[test]
fn expired_coyote_time_falls_back_to_air_jump() {
    let mut hero = Hero::new(2);
    hero.idle(true);
    hero.idle(false);
    for _ in 0..16 {
        hero.idle(false);
    }
    hero.press_jump(false);
    assert!(hero.core.is_jump_impulsing());
    assert_eq!(hero.charges_used(), 1);
}

#[test]
fn jumping_off_the_ground_arms_coyote_time() {
    let mut hero = Hero::new(1);
    hero.idle(true);
    hero.press_jump(true);
    hero.frame(JUMP_HELD, false);
    assert!(hero.mediator.is_coyote_time_active());
    assert_eq!(hero.mediator.state().coyote_countdown, 0.25);

    // Still inside the coyote window, so the grounded jump starts over.
    hero.press_jump(false);
    assert_eq!(
        hero.core.state().jump_state,
        HeroJumpState::JumpImpulsion {
            charge_index: 0,
            timer: 0.0,
        }
    );
    assert_eq!(hero.charges_used(), 0);
    assert!(hero.mediator.is_coyote_time_active());
}

#[test]
fn jumps_can_be_set_to_violate_coyote_time() {
    let mut hero = Hero::with_config(
        1,
        HeroInputConfig {
            coyote_duration: 0.25,
            jumps_violate_coyote_time: true,
        },
    );
    hero.idle(true);
    hero.press_jump(true);
    hero.frame(JUMP_PRESS, false);
    assert!(!hero.mediator.is_coyote_time_active());
    assert_eq!(
        hero.core.state().jump_state,
        HeroJumpState::JumpImpulsion {
            charge_index: 0,
            timer: DT,
        }
    );
}

#[test]
fn coyote_jump_can_be_set_to_consume_coyote_time() {
    let mut hero = Hero::with_config(
        1,
        HeroInputConfig {
            coyote_duration: 0.25,
            jumps_violate_coyote_time: true,
        },
    );
    hero.idle(true);
    hero.idle(false);
    hero.press_jump(false);
    assert!(hero.core.is_jump_impulsing());
    assert!(!hero.mediator.is_coyote_time_active());
}

#[test]
fn multi_jump_is_limited_and_replenished_after_landing() {
    let mut hero = Hero::new(3);
    hero.idle(true);
    hero.press_jump(true);
    hero.frame(JUMP_HELD, false);

    // Wait out the coyote window, so the next presses are air jumps.
    for _ in 0..16 {
        hero.idle(false);
    }
    assert!(!hero.mediator.is_coyote_time_active());
    assert_eq!(hero.core.state().jump_state, HeroJumpState::Falling);

    hero.press_jump(false);
    assert_eq!(hero.charges_used(), 1);
    assert_eq!(
        hero.core.state().jump_state,
        HeroJumpState::JumpImpulsion {
            charge_index: 1,
            timer: 0.0,
        }
    );

    // Still impulsing - another air jump is not allowed yet.
    hero.press_jump(false);
    assert_eq!(hero.charges_used(), 1);

    for _ in 0..8 {
        hero.idle(false);
    }
    assert_eq!(hero.core.state().jump_state, HeroJumpState::Falling);

    hero.press_jump(false);
    assert_eq!(hero.charges_used(), 2);
    assert_eq!(
        hero.core.state().jump_state,
        HeroJumpState::JumpImpulsion {
            charge_index: 2,
            timer: 0.0,
        }
    );

    for _ in 0..8 {
        hero.idle(false);
    }
    hero.press_jump(false);
    assert_eq!(hero.charges_used(), 2);
    assert_eq!(hero.core.state().jump_state, HeroJumpState::Falling);

    // The landing frame itself does not replenish the charges.
    hero.idle(true);
    assert!(hero.core.is_touching_ground());
    assert_eq!(hero.charges_used(), 2);

    hero.idle(true);
    assert_eq!(hero.charges_used(), 0);
}

#[test]
fn releasing_jump_cuts_impulsion_after_min_duration() {
    let mut hero = Hero::new(1);
    hero.idle(true);
    hero.press_jump(true);

    // jump_min_duration = 0.0625s = 4 ticks
    for _ in 0..3 {
        hero.idle(false);
        assert!(hero.core.is_jump_impulsing());
    }
    hero.idle(false);
    assert_eq!(hero.core.state().jump_state, HeroJumpState::Falling);
}

#[test]
fn holding_jump_keeps_impulsion() {
    let mut hero = Hero::new(1);
    hero.idle(true);
    hero.press_jump(true);
    let held = HeroInputFrame {
        jump_held: true,
        ..Default::default()
    };
    for _ in 0..7 {
        hero.frame(held, false);
        assert!(hero.core.is_jump_impulsing());
    }
}

#[test]
fn dash_press_always_dashes() {
    let mut hero = Hero::new(1);
    hero.frame(
        HeroInputFrame {
            dash_pressed: true,
            ..Default::default()
        },
        false,
    );
    assert!(hero.core.is_dashing());
}

/// Records the commands instead of moving anything.
#[derive(Default)]
struct RecordingCore {
    touching_ground: bool,
    impulsing: bool,
    commands: Vec<String>,
}

impl HeroMovementCommands for RecordingCore {
    fn set_move_direction(&mut self, dir_x: Float) {
        self.commands.push(format!("move {dir_x}"));
    }

    fn start_jump(&mut self, charge_index: usize) {
        self.impulsing = true;
        self.commands.push(format!("jump {charge_index}"));
    }

    fn stop_jump_impulsion(&mut self) {
        self.impulsing = false;
        self.commands.push("stop".to_owned());
    }

    fn start_dash(&mut self) {
        self.commands.push("dash".to_owned());
    }

    fn is_touching_ground(&self) -> bool {
        self.touching_ground
    }

    fn is_jumping(&self) -> bool {
        self.impulsing
    }

    fn is_jump_impulsing(&self) -> bool {
        self.impulsing
    }

    fn is_jump_min_duration_reached(&self) -> bool {
        true
    }

    fn multi_jump_count_max(&self) -> usize {
        3
    }
}

#[test]
fn commands_go_through_the_trait() {
    let mut mediator = HeroInputMediator::default();
    let mut core = RecordingCore {
        touching_ground: true,
        ..Default::default()
    };

    mediator.update(
        &HeroInputFrame {
            right_held: true,
            jump_pressed: true,
            dash_pressed: true,
            ..Default::default()
        },
        DT,
        &mut core,
    );
    // The jump button is not held, and the minimal duration is reported as reached.
    assert_eq!(core.commands, ["move 1", "jump 0", "stop", "dash"]);
}
