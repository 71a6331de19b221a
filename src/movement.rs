use bevy::prelude::*;

use crate::math::{Float, Vector2};
use crate::tuning::{HeroFallTuning, HeroMovementTuning, HeroTuning, HeroTuningError};
use crate::{HeroGroundSensor, HeroMotor};

/// The direction the hero is facing. The hero is never facing nowhere.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HeroOrientation {
    Left,
    #[default]
    Right,
}

impl HeroOrientation {
    /// `-1.0` for [`Left`](Self::Left), `1.0` for [`Right`](Self::Right).
    pub fn sign(self) -> Float {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }

    /// `None` when `dir_x` is zero (or not a number).
    pub fn from_direction(dir_x: Float) -> Option<Self> {
        if dir_x < 0.0 {
            Some(Self::Left)
        } else if 0.0 < dir_x {
            Some(Self::Right)
        } else {
            None
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum HeroJumpState {
    #[default]
    NotJumping,
    /// The upward speed is held at the jump speed.
    JumpImpulsion {
        /// Which entry of [`HeroTuning::jumps`] drives this jump.
        charge_index: usize,
        /// Seconds since the impulsion began.
        timer: Float,
    },
    /// The impulsion is over and the jump-fall gravity applies until landing.
    Falling,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum HeroDashState {
    #[default]
    Idle,
    Dashing {
        /// Seconds left until the dash ends.
        timer: Float,
        /// Cached when the dash starts, so that a ground/air switch mid-dash does not change it.
        speed: Float,
    },
}

impl HeroDashState {
    pub fn is_dashing(&self) -> bool {
        matches!(self, Self::Dashing { .. })
    }
}

/// Everything [`HeroMovementCore`] mutates.
#[derive(Clone, Debug, Default)]
pub struct HeroState {
    /// Always non-negative. The sign lives in [`orient_x`](Self::orient_x).
    pub horizontal_speed: Float,
    pub orient_x: HeroOrientation,
    pub vertical_speed: Float,
    /// The last commanded direction, in `[-1, 1]`.
    pub move_dir_x: Float,
    /// Refreshed at the start of every tick.
    pub is_touching_ground: bool,
    pub jump_state: HeroJumpState,
    pub dash: HeroDashState,
}

/// A read-only copy of the hero's state, for debug displays.
#[derive(Clone, Debug)]
pub struct HeroDebugSnapshot {
    pub move_dir_x: Float,
    pub orient_x: HeroOrientation,
    pub jump_state: HeroJumpState,
    pub is_touching_ground: bool,
    pub is_dashing: bool,
    pub horizontal_speed: Float,
    pub vertical_speed: Float,
    pub output_velocity: Vector2,
}

/// The commands [`HeroInputMediator`](crate::HeroInputMediator) issues, and the state it needs
/// to decide on them.
pub trait HeroMovementCommands {
    /// Latch the horizontal intent. It takes effect on the next tick.
    fn set_move_direction(&mut self, dir_x: Float);

    /// Start (or restart) a jump impulsion. Eligibility is the caller's business.
    fn start_jump(&mut self, charge_index: usize);

    /// End the jump impulsion early. No-op if not impulsing.
    fn stop_jump_impulsion(&mut self);

    /// Start (or restart) a dash.
    fn start_dash(&mut self);

    fn is_touching_ground(&self) -> bool;

    fn is_jumping(&self) -> bool;

    fn is_jump_impulsing(&self) -> bool;

    /// `true` once the current impulsion is old enough to be cut short.
    fn is_jump_min_duration_reached(&self) -> bool;

    /// How many jumps can be chained before touching the ground again.
    fn multi_jump_count_max(&self) -> usize;
}

/// The hero's movement state machine.
///
/// Reconciles the commanded direction, jumps, dashes, ground contact and gravity into a single
/// velocity every fixed tick. [`tick`](Self::tick) must be called exactly once per fixed
/// simulation step. The resulting velocity is available from
/// [`output_velocity`](Self::output_velocity), and the
/// [`HeroControllerPlugin`](crate::HeroControllerPlugin) copies it to [`HeroMotor`].
#[derive(Component, Clone, Debug, Default)]
#[require(HeroGroundSensor, HeroMotor)]
pub struct HeroMovementCore {
    tuning: HeroTuning,
    state: HeroState,
    output_velocity: Vector2,
}

impl HeroMovementCore {
    pub fn new(tuning: HeroTuning) -> Result<Self, HeroTuningError> {
        tuning.validate()?;
        Ok(Self {
            tuning,
            state: Default::default(),
            output_velocity: Vector2::ZERO,
        })
    }

    pub fn tuning(&self) -> &HeroTuning {
        &self.tuning
    }

    pub fn state(&self) -> &HeroState {
        &self.state
    }

    /// The velocity the rigid body should have after the last tick.
    pub fn output_velocity(&self) -> Vector2 {
        self.output_velocity
    }

    pub fn orient_x(&self) -> HeroOrientation {
        self.state.orient_x
    }

    pub fn is_dashing(&self) -> bool {
        self.state.dash.is_dashing()
    }

    pub fn debug_snapshot(&self) -> HeroDebugSnapshot {
        HeroDebugSnapshot {
            move_dir_x: self.state.move_dir_x,
            orient_x: self.state.orient_x,
            jump_state: self.state.jump_state.clone(),
            is_touching_ground: self.state.is_touching_ground,
            is_dashing: self.state.dash.is_dashing(),
            horizontal_speed: self.state.horizontal_speed,
            vertical_speed: self.state.vertical_speed,
            output_velocity: self.output_velocity,
        }
    }

    /// Advance the state machine by one fixed step.
    pub fn tick(&mut self, dt: Float, ground_contact: bool) {
        // Ground contact is sampled once, and everything below uses that sample.
        self.state.is_touching_ground = ground_contact;

        let movement = self.tuning.movement(ground_contact);
        self.state.update_horizontal(movement, dt);

        match self.state.jump_state {
            HeroJumpState::JumpImpulsion { .. } => self.state.tick_jump_impulsion(&self.tuning, dt),
            HeroJumpState::Falling => self.state.tick_jump_falling(&self.tuning.jump_fall, dt),
            HeroJumpState::NotJumping => self.state.tick_not_jumping(&self.tuning.fall, dt),
        }
        if self.state.dash.is_dashing() {
            self.state.vertical_speed = 0.0;
        }

        self.state.tick_dash(dt);

        self.output_velocity = Vector2::new(
            self.state.horizontal_speed * self.state.orient_x.sign(),
            if self.state.dash.is_dashing() {
                0.0
            } else {
                self.state.vertical_speed
            },
        );
    }
}

impl HeroState {
    fn update_horizontal(&mut self, movement: &HeroMovementTuning, dt: Float) {
        if self.move_dir_x * self.orient_x.sign() < 0.0 {
            self.turn_back(movement, dt);
        } else {
            if self.move_dir_x != 0.0 {
                self.accelerate(movement, dt);
            } else {
                self.decelerate(movement, dt);
            }
            self.change_orient_from_move_dir();
        }

        if let HeroDashState::Dashing { speed, .. } = self.dash {
            self.horizontal_speed = speed;
        }
    }

    fn turn_back(&mut self, movement: &HeroMovementTuning, dt: Float) {
        self.horizontal_speed -= movement.turn_back_friction * dt;
        if self.horizontal_speed <= 0.0 {
            self.horizontal_speed = 0.0;
            // Turn on the very tick the speed runs out.
            self.change_orient_from_move_dir();
        }
    }

    fn accelerate(&mut self, movement: &HeroMovementTuning, dt: Float) {
        self.horizontal_speed += movement.acceleration * dt;
        if movement.max_speed < self.horizontal_speed && !self.dash.is_dashing() {
            self.horizontal_speed = movement.max_speed;
        }
    }

    fn decelerate(&mut self, movement: &HeroMovementTuning, dt: Float) {
        self.horizontal_speed -= movement.deceleration * dt;
        if self.horizontal_speed < 0.0 {
            self.horizontal_speed = 0.0;
        }
    }

    fn change_orient_from_move_dir(&mut self) {
        if let Some(orientation) = HeroOrientation::from_direction(self.move_dir_x) {
            self.orient_x = orientation;
        }
    }

    fn tick_jump_impulsion(&mut self, tuning: &HeroTuning, dt: Float) {
        let HeroJumpState::JumpImpulsion {
            charge_index,
            timer,
        } = &mut self.jump_state
        else {
            return;
        };
        *timer += dt;
        let jump = tuning.jump(*charge_index);
        if *timer < jump.jump_max_duration {
            self.vertical_speed = jump.jump_speed;
        } else {
            // The jump-fall gravity only kicks in on the next tick.
            debug!("Jump impulsion reached its max duration after {timer}s");
            self.jump_state = HeroJumpState::Falling;
        }
    }

    fn tick_jump_falling(&mut self, jump_fall: &HeroFallTuning, dt: Float) {
        if self.is_touching_ground {
            self.vertical_speed = 0.0;
            self.jump_state = HeroJumpState::NotJumping;
        } else {
            self.apply_fall_gravity(jump_fall, dt);
        }
    }

    fn tick_not_jumping(&mut self, fall: &HeroFallTuning, dt: Float) {
        if self.is_touching_ground {
            self.vertical_speed = 0.0;
        } else {
            self.apply_fall_gravity(fall, dt);
        }
    }

    fn apply_fall_gravity(&mut self, fall: &HeroFallTuning, dt: Float) {
        if self.dash.is_dashing() {
            return;
        }
        self.vertical_speed -= fall.fall_gravity * dt;
        if self.vertical_speed < -fall.max_fall_speed {
            self.vertical_speed = -fall.max_fall_speed;
        }
    }

    fn tick_dash(&mut self, dt: Float) {
        let HeroDashState::Dashing { timer, .. } = &mut self.dash else {
            return;
        };
        *timer -= dt;
        if *timer <= 0.0 {
            debug!("Dash ended");
            self.dash = HeroDashState::Idle;
            self.horizontal_speed = 0.0;
        }
    }
}

impl HeroMovementCommands for HeroMovementCore {
    fn set_move_direction(&mut self, dir_x: Float) {
        self.state.move_dir_x = if dir_x.is_finite() {
            dir_x.clamp(-1.0, 1.0)
        } else {
            0.0
        };
    }

    fn start_jump(&mut self, charge_index: usize) {
        debug!("Jump impulsion started with charge {charge_index}");
        self.state.jump_state = HeroJumpState::JumpImpulsion {
            charge_index,
            timer: 0.0,
        };
    }

    fn stop_jump_impulsion(&mut self) {
        if let HeroJumpState::JumpImpulsion { timer, .. } = self.state.jump_state {
            debug!("Jump impulsion stopped early after {timer}s");
            self.state.jump_state = HeroJumpState::Falling;
        }
    }

    fn start_dash(&mut self) {
        let dash = self.tuning.dash(self.state.is_touching_ground);
        debug!(
            "Dash started at {} for {}s",
            dash.dash_speed, dash.dash_duration
        );
        self.state.dash = HeroDashState::Dashing {
            timer: dash.dash_duration,
            speed: dash.dash_speed,
        };
        self.state.horizontal_speed = dash.dash_speed;
    }

    fn is_touching_ground(&self) -> bool {
        self.state.is_touching_ground
    }

    fn is_jumping(&self) -> bool {
        self.state.jump_state != HeroJumpState::NotJumping
    }

    fn is_jump_impulsing(&self) -> bool {
        matches!(self.state.jump_state, HeroJumpState::JumpImpulsion { .. })
    }

    fn is_jump_min_duration_reached(&self) -> bool {
        match self.state.jump_state {
            HeroJumpState::JumpImpulsion {
                charge_index,
                timer,
            } => self.tuning.jump(charge_index).jump_min_duration <= timer,
            HeroJumpState::NotJumping | HeroJumpState::Falling => false,
        }
    }

    fn multi_jump_count_max(&self) -> usize {
        self.tuning.multi_jump_count_max()
    }
}
