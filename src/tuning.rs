//! Immutable tuning records for the hero.
//!
//! None of these are mutated at runtime. The movement core picks the ground or air variant every
//! tick based on the ground sensor.

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

use crate::math::Float;

/// Horizontal movement parameters. There is one for the ground and one for the air.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct HeroMovementTuning {
    /// How fast the horizontal speed grows while a direction is held, in units per second squared.
    pub acceleration: Float,

    /// How fast the horizontal speed drops to zero once no direction is held.
    pub deceleration: Float,

    /// The top horizontal speed. A dash is allowed to exceed it.
    pub max_speed: Float,

    /// How fast the horizontal speed drops when the held direction opposes the hero's
    /// orientation. The hero turns around once the speed hits zero.
    pub turn_back_friction: Float,
}

impl Default for HeroMovementTuning {
    fn default() -> Self {
        Self {
            acceleration: 60.0,
            deceleration: 70.0,
            max_speed: 9.0,
            turn_back_friction: 120.0,
        }
    }
}

impl HeroMovementTuning {
    /// A looser variant for air control.
    pub fn air() -> Self {
        Self {
            acceleration: 30.0,
            deceleration: 15.0,
            max_speed: 9.0,
            turn_back_friction: 45.0,
        }
    }
}

/// Parameters of a single jump.
///
/// The jump is a sustained impulse: while it lasts, the vertical speed is pinned to
/// [`jump_speed`](Self::jump_speed) instead of being applied once and left to gravity.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct HeroJumpTuning {
    /// The upward speed held during the impulsion.
    pub jump_speed: Float,

    /// The impulsion cannot be cut short by releasing the button before this many seconds.
    pub jump_min_duration: Float,

    /// The impulsion ends by itself after this many seconds.
    pub jump_max_duration: Float,
}

impl Default for HeroJumpTuning {
    fn default() -> Self {
        Self {
            jump_speed: 14.0,
            jump_min_duration: 0.05,
            jump_max_duration: 0.22,
        }
    }
}

/// Gravity applied while airborne.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct HeroFallTuning {
    /// Subtracted from the vertical speed every second while airborne.
    pub fall_gravity: Float,

    /// The vertical speed is never allowed below `-max_fall_speed`.
    pub max_fall_speed: Float,
}

impl Default for HeroFallTuning {
    fn default() -> Self {
        Self {
            fall_gravity: 60.0,
            max_fall_speed: 22.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct HeroDashTuning {
    /// The horizontal speed the hero snaps to when the dash starts.
    pub dash_speed: Float,

    /// How long, in seconds, the dash lasts. The hero stops dead when it ends.
    pub dash_duration: Float,
}

impl Default for HeroDashTuning {
    fn default() -> Self {
        Self {
            dash_speed: 40.0,
            dash_duration: 0.1,
        }
    }
}

/// The complete tuning of a hero.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct HeroTuning {
    pub ground_movement: HeroMovementTuning,
    pub air_movement: HeroMovementTuning,

    /// One entry per jump charge.
    ///
    /// The first entry is the grounded jump, the rest are the air jumps. The number of entries is
    /// the maximum number of jumps that can be chained before touching the ground again. A charge
    /// index past the end uses the last entry.
    pub jumps: Vec<HeroJumpTuning>,

    /// Gravity when falling without having jumped (e.g. walking off a ledge).
    pub fall: HeroFallTuning,

    /// Gravity when falling after a jump impulsion ended.
    pub jump_fall: HeroFallTuning,

    pub ground_dash: HeroDashTuning,
    pub air_dash: HeroDashTuning,
}

impl Default for HeroTuning {
    fn default() -> Self {
        Self {
            ground_movement: HeroMovementTuning::default(),
            air_movement: HeroMovementTuning::air(),
            jumps: vec![
                HeroJumpTuning::default(),
                HeroJumpTuning {
                    jump_speed: 11.0,
                    jump_min_duration: 0.05,
                    jump_max_duration: 0.15,
                },
            ],
            fall: HeroFallTuning::default(),
            jump_fall: HeroFallTuning {
                fall_gravity: 45.0,
                max_fall_speed: 22.0,
            },
            ground_dash: HeroDashTuning::default(),
            air_dash: HeroDashTuning {
                dash_speed: 32.0,
                dash_duration: 0.12,
            },
        }
    }
}

/// A broken [`HeroTuning`].
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum HeroTuningError {
    #[error("`{field}` must be a finite non-negative number, got {value}")]
    Negative { field: &'static str, value: Float },
    #[error("`{field}` must be a finite positive number, got {value}")]
    NotPositive { field: &'static str, value: Float },
    #[error("jump #{index}: `jump_min_duration` ({min}) is longer than `jump_max_duration` ({max})")]
    MinJumpLongerThanMax { index: usize, min: Float, max: Float },
    #[error("at least one jump must be configured")]
    NoJumps,
}

fn non_negative(field: &'static str, value: Float) -> Result<(), HeroTuningError> {
    if value.is_finite() && 0.0 <= value {
        Ok(())
    } else {
        Err(HeroTuningError::Negative { field, value })
    }
}

fn positive(field: &'static str, value: Float) -> Result<(), HeroTuningError> {
    if value.is_finite() && 0.0 < value {
        Ok(())
    } else {
        Err(HeroTuningError::NotPositive { field, value })
    }
}

impl HeroMovementTuning {
    fn validate(&self) -> Result<(), HeroTuningError> {
        non_negative("acceleration", self.acceleration)?;
        non_negative("deceleration", self.deceleration)?;
        non_negative("max_speed", self.max_speed)?;
        non_negative("turn_back_friction", self.turn_back_friction)
    }
}

impl HeroFallTuning {
    fn validate(&self) -> Result<(), HeroTuningError> {
        non_negative("fall_gravity", self.fall_gravity)?;
        non_negative("max_fall_speed", self.max_fall_speed)
    }
}

impl HeroDashTuning {
    fn validate(&self) -> Result<(), HeroTuningError> {
        non_negative("dash_speed", self.dash_speed)?;
        positive("dash_duration", self.dash_duration)
    }
}

impl HeroTuning {
    /// Check the contract the movement core relies on.
    ///
    /// Durations that get divided by or counted down must be positive, everything else must be
    /// non-negative.
    pub fn validate(&self) -> Result<(), HeroTuningError> {
        self.ground_movement.validate()?;
        self.air_movement.validate()?;
        if self.jumps.is_empty() {
            return Err(HeroTuningError::NoJumps);
        }
        for (index, jump) in self.jumps.iter().enumerate() {
            non_negative("jump_speed", jump.jump_speed)?;
            non_negative("jump_min_duration", jump.jump_min_duration)?;
            positive("jump_max_duration", jump.jump_max_duration)?;
            if jump.jump_max_duration < jump.jump_min_duration {
                return Err(HeroTuningError::MinJumpLongerThanMax {
                    index,
                    min: jump.jump_min_duration,
                    max: jump.jump_max_duration,
                });
            }
        }
        self.fall.validate()?;
        self.jump_fall.validate()?;
        self.ground_dash.validate()?;
        self.air_dash.validate()
    }

    pub fn movement(&self, touching_ground: bool) -> &HeroMovementTuning {
        if touching_ground {
            &self.ground_movement
        } else {
            &self.air_movement
        }
    }

    pub fn dash(&self, touching_ground: bool) -> &HeroDashTuning {
        if touching_ground {
            &self.ground_dash
        } else {
            &self.air_dash
        }
    }

    /// The tuning of the jump started with the given charge index.
    ///
    /// # Panics
    ///
    /// If [`jumps`](Self::jumps) is empty, which [`validate`](Self::validate) rejects.
    pub fn jump(&self, charge_index: usize) -> &HeroJumpTuning {
        self.jumps
            .get(charge_index)
            .or_else(|| self.jumps.last())
            .expect("validated tuning has at least one jump")
    }

    /// How many jumps can be chained before touching the ground again.
    pub fn multi_jump_count_max(&self) -> usize {
        self.jumps.len()
    }
}
