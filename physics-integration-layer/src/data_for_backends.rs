use crate::math::{AdjustPrecision, Float, Vector2};
use bevy::prelude::*;

/// Anything that can tell whether a ground surface is within tolerance below the body.
///
/// How this is decided (ray cast, shape cast, contact list) is the backend's business. The
/// movement core only asks once per fixed tick.
pub trait GroundDetector {
    fn detect_ground_nearby(&self) -> bool;
}

/// Anything a camera can follow.
///
/// The follow point is decoupled from the way the followed thing represents its own transform.
pub trait Followable {
    fn follow_position_x(&self) -> Float;
    fn follow_position_y(&self) -> Float;

    fn follow_position(&self) -> Vector2 {
        Vector2::new(self.follow_position_x(), self.follow_position_y())
    }
}

impl Followable for Vector2 {
    fn follow_position_x(&self) -> Float {
        self.x
    }

    fn follow_position_y(&self) -> Float {
        self.y
    }
}

impl Followable for GlobalTransform {
    fn follow_position_x(&self) -> Float {
        self.translation().x.adjust_precision()
    }

    fn follow_position_y(&self) -> Float {
        self.translation().y.adjust_precision()
    }
}

/// Result of the ground cast, written by the physics backend.
///
/// The physics backend is responsible for updating this component during
/// [`HeroPipelineStages::Sensors`](crate::HeroPipelineStages::Sensors).
#[derive(Component, Default, Debug, Clone, Copy)]
pub struct HeroGroundSensor {
    pub touching_ground: bool,
}

impl GroundDetector for HeroGroundSensor {
    fn detect_ground_nearby(&self) -> bool {
        self.touching_ground
    }
}

/// The velocity the rigid body should have after this tick.
///
/// The physics backend is responsible for reading this component during
/// [`HeroPipelineStages::Motors`](crate::HeroPipelineStages::Motors) and overwriting the rigid
/// body's linear velocity with it. This is a velocity, not a force - mass is ignored.
#[derive(Component, Default, Debug, Clone, Copy)]
pub struct HeroMotor {
    pub desired_velocity: Vector2,
}
