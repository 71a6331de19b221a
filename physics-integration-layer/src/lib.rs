use bevy::prelude::*;

pub mod data_for_backends;
pub mod math;

/// Umbrella system set for [`HeroPipelineStages`].
///
/// The physics backends' plugins are responsible for preventing this entire system set from
/// running when the physics backend itself is paused.
#[derive(SystemSet, Clone, PartialEq, Eq, Debug, Hash)]
pub struct HeroSystems;

/// The various stages of the hero pipeline.
#[derive(SystemSet, Clone, PartialEq, Eq, Debug, Hash)]
pub enum HeroPipelineStages {
    /// Data is read from the physics backend.
    Sensors,
    /// The movement core decides how the hero should move.
    Logic,
    /// The resulting velocity is applied in the physics backend.
    Motors,
}
