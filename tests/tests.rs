use bevy_hero_controller::prelude::*;

#[test]
fn tuning_built_from_parts_is_valid() {
    let tuning = HeroTuning {
        ground_movement: HeroMovementTuning {
            max_speed: 12.0,
            ..Default::default()
        },
        jumps: vec![HeroJumpTuning::default(); 3],
        ..Default::default()
    };
    let core = HeroMovementCore::new(tuning).expect("tuning should be valid");
    assert_eq!(core.multi_jump_count_max(), 3);
    assert_eq!(core.tuning().ground_movement.max_speed, 12.0);
}

#[cfg(feature = "serialize")]
#[test]
fn tuning_loads_from_ron() {
    let serialized = r#"(
        ground_movement: (acceleration: 60.0, deceleration: 70.0, max_speed: 9.0, turn_back_friction: 120.0),
        air_movement: (acceleration: 30.0, deceleration: 15.0, max_speed: 9.0, turn_back_friction: 45.0),
        jumps: [
            (jump_speed: 14.0, jump_min_duration: 0.05, jump_max_duration: 0.22),
            (jump_speed: 11.0, jump_min_duration: 0.05, jump_max_duration: 0.15),
        ],
        fall: (fall_gravity: 60.0, max_fall_speed: 22.0),
        jump_fall: (fall_gravity: 45.0, max_fall_speed: 22.0),
        ground_dash: (dash_speed: 40.0, dash_duration: 0.1),
        air_dash: (dash_speed: 32.0, dash_duration: 0.12),
    )"#;

    let tuning: HeroTuning = ron::from_str(serialized).expect("Unable to deserialize the tuning");
    assert_eq!(tuning, HeroTuning::default());
    assert!(tuning.validate().is_ok());
}

#[cfg(feature = "serialize")]
#[test]
fn camera_profile_skips_target() {
    use bevy::prelude::World;
    use bevy_hero_controller::math::Vector2;

    let profile = CameraProfile {
        id: CameraProfileId(4),
        profile_type: CameraProfileType::FollowTarget,
        position: Vector2::new(1.0, 2.0),
        camera_size: 8.0,
        target_to_follow: Some(World::new().spawn_empty().id()),
        damping: CameraDamping {
            horizontal: Some(3.0),
            vertical: None,
        },
    };

    let serialized = ron::to_string(&profile).expect("Unable to serialize the profile");
    let deserialized: CameraProfile =
        ron::from_str(&serialized).expect("Unable to deserialize the profile");

    assert_eq!(deserialized.target_to_follow, None);
    assert_eq!(
        deserialized,
        CameraProfile {
            target_to_follow: None,
            ..profile
        }
    );
}
