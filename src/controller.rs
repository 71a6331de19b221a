use bevy::ecs::schedule::{InternedScheduleLabel, ScheduleLabel};
use bevy::prelude::*;

use crate::math::AdjustPrecision;
use crate::{GroundDetector, HeroGroundSensor, HeroMotor, HeroMovementCore};
use crate::{HeroPipelineStages, HeroSystems};

/// Ticks every [`HeroMovementCore`] and writes its velocity to the [`HeroMotor`].
///
/// This must run in the same schedule as the physics backend, which is usually `FixedUpdate`.
pub struct HeroControllerPlugin {
    schedule: InternedScheduleLabel,
}

impl HeroControllerPlugin {
    pub fn new(schedule: impl ScheduleLabel) -> Self {
        Self {
            schedule: schedule.intern(),
        }
    }
}

impl Default for HeroControllerPlugin {
    fn default() -> Self {
        Self::new(FixedUpdate)
    }
}

impl Plugin for HeroControllerPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            self.schedule,
            (
                HeroPipelineStages::Sensors,
                HeroPipelineStages::Logic,
                HeroPipelineStages::Motors,
            )
                .chain()
                .in_set(HeroSystems),
        );
        app.add_systems(
            self.schedule,
            apply_hero_movement_system.in_set(HeroPipelineStages::Logic),
        );
    }
}

fn apply_hero_movement_system(
    time: Res<Time>,
    mut query: Query<(&mut HeroMovementCore, &HeroGroundSensor, &mut HeroMotor)>,
) {
    let frame_duration = time.delta_secs().adjust_precision();
    if frame_duration == 0.0 {
        return;
    }
    for (mut core, sensor, mut motor) in query.iter_mut() {
        core.tick(frame_duration, sensor.detect_ground_nearby());
        motor.desired_velocity = core.output_velocity();
    }
}
