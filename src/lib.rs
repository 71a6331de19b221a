//! A side-view platformer hero controller for Bevy.
//!
//! The hero is driven by three pieces:
//!
//! * [`HeroMovementCore`] - the per-tick state machine that turns the commanded direction, jumps,
//!   dashes, ground contact and gravity into a single velocity.
//! * [`HeroInputMediator`] - turns a frame's input into commands, adding coyote time and air
//!   jumps on top of the core.
//! * [`CameraFollowCore`] - a profile based camera that follows the hero (or anything else
//!   [`Followable`]) with optional damping and timed transitions between profiles.
//!
//! All three can be used without an [`App`](bevy::prelude::App). The plugins
//! ([`HeroControllerPlugin`], [`HeroInputPlugin`] and [`CameraFollowPlugin`]) wire them into
//! Bevy schedules.
//!
//! The physics backend is responsible for updating [`HeroGroundSensor`] during
//! [`HeroPipelineStages::Sensors`] and for applying [`HeroMotor`] to the rigid body during
//! [`HeroPipelineStages::Motors`].
pub mod camera;
mod controller;
mod input_mediator;
mod movement;
pub mod tuning;

pub mod prelude;

pub use bevy_hero_controller_physics_integration_layer::data_for_backends::*;
pub use bevy_hero_controller_physics_integration_layer::*;

pub use camera::{CameraFollowCore, CameraFollowPlugin};
pub use controller::HeroControllerPlugin;
pub use input_mediator::*;
pub use movement::*;
pub use tuning::{HeroTuning, HeroTuningError};
