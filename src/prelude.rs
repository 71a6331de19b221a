pub use crate::camera::{
    CameraDamping, CameraFollowCore, CameraFollowPlugin, CameraPose, CameraProfile,
    CameraProfileId, CameraProfileType, CameraTransition,
};
pub use crate::tuning::{
    HeroDashTuning, HeroFallTuning, HeroJumpTuning, HeroMovementTuning, HeroTuning,
};
pub use crate::{
    HeroControllerPlugin, HeroGroundSensor, HeroInputFrame, HeroInputMediator, HeroInputPlugin,
    HeroKeyBindings, HeroMotor, HeroMovementCommands, HeroMovementCore, HeroPipelineStages,
    HeroSystems, HeroUserControlsSystems,
};
