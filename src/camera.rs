use bevy::prelude::*;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

use crate::math::{AdjustPrecision, AsF32, Float, Vector2};
use crate::Followable;

/// Identifies a [`CameraProfile`], so that exiting a profile can check it is the current one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct CameraProfileId(pub u32);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum CameraProfileType {
    /// Stay at the profile's [`position`](CameraProfile::position).
    #[default]
    Fixed,
    /// Track the profile's [`target_to_follow`](CameraProfile::target_to_follow).
    FollowTarget,
}

/// Per-axis exponential smoothing.
///
/// Each factor is multiplied by the frame duration to get the interpolation weight toward the
/// target, so a factor of `5.0` closes roughly 5% of the gap per frame at 100 FPS. `None` means
/// that axis snaps to the target.
///
/// Damping smooths the target, not the camera: it lerps from the previous damped target, not from
/// wherever the camera is. The two only differ while a [`CameraTransition`] is playing, which then
/// blends from its start pose toward the damped target.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct CameraDamping {
    pub horizontal: Option<Float>,
    pub vertical: Option<Float>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct CameraProfile {
    pub id: CameraProfileId,
    pub profile_type: CameraProfileType,
    /// Where the camera stays when the profile is [`Fixed`](CameraProfileType::Fixed), or when
    /// there is no target to follow.
    pub position: Vector2,
    /// The orthographic size of the camera.
    pub camera_size: Float,
    #[cfg_attr(feature = "serialize", serde(skip))]
    pub target_to_follow: Option<Entity>,
    pub damping: CameraDamping,
}

impl Default for CameraProfile {
    fn default() -> Self {
        Self {
            id: CameraProfileId::default(),
            profile_type: CameraProfileType::Fixed,
            position: Vector2::ZERO,
            camera_size: 5.0,
            target_to_follow: None,
            damping: CameraDamping::default(),
        }
    }
}

/// A timed linear blend from wherever the camera is to the next profile.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct CameraTransition {
    /// In seconds.
    pub duration: Float,
}

/// Where the camera is and how much it shows.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CameraPose {
    pub position: Vector2,
    pub size: Float,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CameraTransitionProgress {
    pub start_position: Vector2,
    pub start_size: Float,
    pub elapsed: Float,
    pub duration: Float,
}

impl CameraTransitionProgress {
    pub fn is_playing(&self) -> bool {
        self.elapsed < self.duration
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CameraRuntimeState {
    pub current_profile: CameraProfile,
    pub transition: Option<CameraTransitionProgress>,
    pub damped_position: Vector2,
    /// Set when the profile changes, so that the next resolve seeds the damping from the new
    /// target instead of dragging the old one along.
    pub reseed_damping: bool,
    pub pose: CameraPose,
}

/// Profile based camera targeting.
///
/// Profiles are entered and exited (typically by trigger zones) and optionally blended into with
/// a [`CameraTransition`]. [`update`](Self::update) must be called once per frame, and returns
/// the pose the camera should have.
#[derive(Component, Clone, Debug)]
pub struct CameraFollowCore {
    default_profile: CameraProfile,
    state: CameraRuntimeState,
}

impl Default for CameraFollowCore {
    fn default() -> Self {
        Self::new(Default::default())
    }
}

impl CameraFollowCore {
    /// Start at the default profile, placing the camera at its fixed position.
    pub fn new(default_profile: CameraProfile) -> Self {
        let pose = CameraPose {
            position: default_profile.position,
            size: default_profile.camera_size,
        };
        Self {
            state: CameraRuntimeState {
                current_profile: default_profile.clone(),
                transition: None,
                damped_position: pose.position,
                reseed_damping: true,
                pose,
            },
            default_profile,
        }
    }

    pub fn default_profile(&self) -> &CameraProfile {
        &self.default_profile
    }

    pub fn current_profile(&self) -> &CameraProfile {
        &self.state.current_profile
    }

    pub fn pose(&self) -> CameraPose {
        self.state.pose
    }

    pub fn is_transitioning(&self) -> bool {
        self.state
            .transition
            .as_ref()
            .is_some_and(CameraTransitionProgress::is_playing)
    }

    pub fn debug_snapshot(&self) -> CameraRuntimeState {
        self.state.clone()
    }

    pub fn enter_profile(&mut self, profile: CameraProfile, transition: Option<&CameraTransition>) {
        debug!("Entering camera profile {:?}", profile.id);
        self.switch_to(profile, transition);
    }

    /// Go back to the default profile, but only if `profile` is the current one.
    pub fn exit_profile(&mut self, profile: CameraProfileId, transition: Option<&CameraTransition>) {
        if self.state.current_profile.id != profile {
            return;
        }
        debug!("Exiting camera profile {profile:?}");
        self.switch_to(self.default_profile.clone(), transition);
    }

    fn switch_to(&mut self, profile: CameraProfile, transition: Option<&CameraTransition>) {
        self.state.current_profile = profile;
        self.state.reseed_damping = true;
        if let Some(transition) = transition {
            self.play_transition(transition);
        }
    }

    fn play_transition(&mut self, transition: &CameraTransition) {
        if !(transition.duration.is_finite() && 0.0 < transition.duration) {
            warn!(
                "Ignoring camera transition with duration {}",
                transition.duration
            );
            self.state.transition = None;
            return;
        }
        self.state.transition = Some(CameraTransitionProgress {
            start_position: self.state.pose.position,
            start_size: self.state.pose.size,
            elapsed: 0.0,
            duration: transition.duration,
        });
    }

    /// Where the current profile wants the camera, before damping.
    ///
    /// `find_target` resolves the followed entity to its follow position. A profile that follows
    /// a target which is unbound or cannot be found falls back to its fixed position.
    pub fn raw_target(&self, find_target: impl Fn(Entity) -> Option<Vector2>) -> Vector2 {
        let profile = &self.state.current_profile;
        if profile.profile_type == CameraProfileType::FollowTarget {
            if let Some(position) = profile.target_to_follow.and_then(find_target) {
                return position;
            }
        }
        profile.position
    }

    /// Resolve the camera pose for this frame.
    pub fn update(
        &mut self,
        dt: Float,
        find_target: impl Fn(Entity) -> Option<Vector2>,
    ) -> CameraPose {
        let raw_target = self.raw_target(find_target);
        let state = &mut self.state;

        if state.reseed_damping {
            state.damped_position = raw_target;
            state.reseed_damping = false;
        }
        let damping = &state.current_profile.damping;
        state.damped_position = Vector2::new(
            damp_axis(state.damped_position.x, raw_target.x, damping.horizontal, dt),
            damp_axis(state.damped_position.y, raw_target.y, damping.vertical, dt),
        );

        let target_size = state.current_profile.camera_size;
        state.pose = match state.transition.as_mut() {
            Some(transition) if transition.is_playing() => {
                transition.elapsed += dt;
                let t = (transition.elapsed / transition.duration).min(1.0);
                CameraPose {
                    position: transition.start_position.lerp(state.damped_position, t),
                    size: transition.start_size + (target_size - transition.start_size) * t,
                }
            }
            _ => {
                state.transition = None;
                CameraPose {
                    position: state.damped_position,
                    size: target_size,
                }
            }
        };
        state.pose
    }
}

fn damp_axis(current: Float, target: Float, factor: Option<Float>, dt: Float) -> Float {
    match factor {
        Some(factor) => {
            let t = (factor * dt).clamp(0.0, 1.0);
            current + (target - current) * t
        }
        None => target,
    }
}

/// Resolves every [`CameraFollowCore`] once per frame in `Update` and moves its entity's
/// [`Transform`] on the X and Y axes.
///
/// Followed targets are looked up by their [`GlobalTransform`].
///
/// The resolved size is not applied to any projection. Read it from
/// [`CameraFollowCore::pose`] and apply it to the camera's projection.
pub struct CameraFollowPlugin;

impl Plugin for CameraFollowPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, camera_follow_system);
    }
}

fn camera_follow_system(
    time: Res<Time>,
    mut cameras: Query<(&mut CameraFollowCore, &mut Transform)>,
    targets: Query<&GlobalTransform>,
) {
    let frame_duration = time.delta_secs().adjust_precision();
    for (mut camera, mut transform) in cameras.iter_mut() {
        let pose = camera.update(frame_duration, |entity| {
            targets.get(entity).ok().map(Followable::follow_position)
        });
        transform.translation.x = pose.position.x.f32();
        transform.translation.y = pose.position.y.f32();
    }
}
