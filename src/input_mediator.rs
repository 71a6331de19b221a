use bevy::prelude::*;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

use crate::math::{AdjustPrecision, Float};
use crate::movement::HeroMovementCommands;

/// The semantic input of a single frame.
///
/// Edges (`*_pressed`) must be `true` only on the frame the button went down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeroInputFrame {
    pub left_held: bool,
    pub right_held: bool,
    pub jump_pressed: bool,
    pub jump_held: bool,
    pub dash_pressed: bool,
}

impl HeroInputFrame {
    /// Holding both directions cancels out.
    pub fn move_axis(&self) -> Float {
        let mut axis = 0.0;
        if self.left_held {
            axis -= 1.0;
        }
        if self.right_held {
            axis += 1.0;
        }
        axis
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct HeroInputConfig {
    /// The time, in seconds, the hero can still make a grounded jump after leaving the ground.
    pub coyote_duration: Float,

    /// When set, jumps violate coyote time: leaving the ground by jumping does not arm it, and a
    /// grounded (or coyote) jump cancels whatever is left of it.
    ///
    /// Off by default, which means a jump press right after jumping off the ground restarts the
    /// grounded jump.
    #[cfg_attr(feature = "serialize", serde(default))]
    pub jumps_violate_coyote_time: bool,
}

impl Default for HeroInputConfig {
    fn default() -> Self {
        Self {
            coyote_duration: 0.2,
            jumps_violate_coyote_time: false,
        }
    }
}

/// Coyote time and multi-jump bookkeeping.
///
/// This mirrors the ground state of the movement core, but never replaces it: the core is still
/// the one that decides whether the hero is touching the ground.
#[derive(Clone, Debug, PartialEq)]
pub struct CoyoteAndChargeState {
    /// Seconds left during which a jump is still honored as a grounded jump.
    pub coyote_countdown: Float,
    /// Air jumps performed since the hero last stood on the ground.
    pub multi_jump_charges_used: usize,
    /// The core's ground contact as seen on the previous frame.
    pub was_touching_ground: bool,
}

impl Default for CoyoteAndChargeState {
    fn default() -> Self {
        Self {
            coyote_countdown: -1.0,
            multi_jump_charges_used: 0,
            was_touching_ground: false,
        }
    }
}

/// Translates a frame's [`HeroInputFrame`] into [`HeroMovementCommands`].
///
/// The mediator owns no reference to the movement core - the core is passed explicitly to every
/// [`update`](Self::update). When used through [`HeroInputPlugin`](crate::HeroInputPlugin) it is
/// the [`HeroMovementCore`](crate::HeroMovementCore) of the same entity.
#[derive(Component, Clone, Debug, Default)]
pub struct HeroInputMediator {
    pub config: HeroInputConfig,
    state: CoyoteAndChargeState,
}

impl HeroInputMediator {
    pub fn new(config: HeroInputConfig) -> Self {
        Self {
            config,
            state: Default::default(),
        }
    }

    pub fn state(&self) -> &CoyoteAndChargeState {
        &self.state
    }

    pub fn is_coyote_time_active(&self) -> bool {
        0.0 < self.state.coyote_countdown
    }

    pub fn debug_snapshot(&self) -> CoyoteAndChargeState {
        self.state.clone()
    }

    /// Run once per frame, with `dt` being the frame's duration.
    pub fn update(
        &mut self,
        input: &HeroInputFrame,
        dt: Float,
        core: &mut impl HeroMovementCommands,
    ) {
        core.set_move_direction(input.move_axis());

        let touching_ground = core.is_touching_ground();
        if !touching_ground && self.state.was_touching_ground {
            if self.config.jumps_violate_coyote_time && core.is_jumping() {
                self.state.coyote_countdown = -1.0;
            } else {
                self.state.coyote_countdown = self.config.coyote_duration;
            }
        } else if self.is_coyote_time_active() {
            self.state.coyote_countdown -= dt;
        }

        if input.jump_pressed {
            if touching_ground || self.is_coyote_time_active() {
                if self.config.jumps_violate_coyote_time {
                    self.state.coyote_countdown = -1.0;
                }
                core.start_jump(0);
            } else if !core.is_jump_impulsing()
                && self.state.multi_jump_charges_used + 1 < core.multi_jump_count_max()
            {
                self.state.multi_jump_charges_used += 1;
                core.start_jump(self.state.multi_jump_charges_used);
            } else {
                debug!(
                    "Jump rejected: {} air jumps already used",
                    self.state.multi_jump_charges_used
                );
            }
        }

        // Reset on the frame after landing, not on the landing frame itself.
        if self.state.was_touching_ground {
            self.state.multi_jump_charges_used = 0;
        }

        if core.is_jump_impulsing() && !input.jump_held && core.is_jump_min_duration_reached() {
            core.stop_jump_impulsion();
        }

        if input.dash_pressed {
            core.start_dash();
        }

        self.state.was_touching_ground = core.is_touching_ground();
    }
}

/// Which keys feed the [`HeroInputMediator`] of the same entity.
#[derive(Component, Clone, Debug)]
pub struct HeroKeyBindings {
    pub left: Vec<KeyCode>,
    pub right: Vec<KeyCode>,
    pub jump: Vec<KeyCode>,
    pub dash: Vec<KeyCode>,
}

impl Default for HeroKeyBindings {
    fn default() -> Self {
        Self {
            // Q is there for AZERTY layouts.
            left: vec![KeyCode::KeyA, KeyCode::KeyQ],
            right: vec![KeyCode::KeyD],
            jump: vec![KeyCode::Space],
            dash: vec![KeyCode::KeyF],
        }
    }
}

impl HeroKeyBindings {
    pub fn sample(&self, keyboard: &ButtonInput<KeyCode>) -> HeroInputFrame {
        HeroInputFrame {
            left_held: keyboard.any_pressed(self.left.iter().copied()),
            right_held: keyboard.any_pressed(self.right.iter().copied()),
            jump_pressed: keyboard.any_just_pressed(self.jump.iter().copied()),
            jump_held: keyboard.any_pressed(self.jump.iter().copied()),
            dash_pressed: keyboard.any_just_pressed(self.dash.iter().copied()),
        }
    }
}

/// The system set in which the keyboard is translated into hero commands.
#[derive(SystemSet, Clone, PartialEq, Eq, Debug, Hash)]
pub struct HeroUserControlsSystems;

/// Feeds every [`HeroInputMediator`] from the keyboard, once per frame in `Update`.
///
/// The mediator commands the [`HeroMovementCore`](crate::HeroMovementCore) of its own entity.
pub struct HeroInputPlugin;

impl Plugin for HeroInputPlugin {
    fn build(&self, app: &mut App) {
        app.register_required_components::<HeroInputMediator, HeroKeyBindings>();
        app.add_systems(
            Update,
            hero_input_system.in_set(HeroUserControlsSystems),
        );
    }
}

fn hero_input_system(
    time: Res<Time>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut query: Query<(
        &HeroKeyBindings,
        &mut HeroInputMediator,
        &mut crate::HeroMovementCore,
    )>,
) {
    let frame_duration = time.delta_secs().adjust_precision();
    for (bindings, mut mediator, mut core) in query.iter_mut() {
        let input = bindings.sample(&keyboard);
        mediator.update(&input, frame_duration, core.as_mut());
    }
}
