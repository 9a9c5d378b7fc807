//! Engine configuration.
//!
//! One controller with flags replaces the per-platform viewer variants the
//! engine grew out of: behavior differences (hit-testing on/off, rotation
//! gestures suppressed on hosts that cannot disambiguate scroll from rotate)
//! are selected here instead of being sniffed from device strings at runtime.

use cgmath::Deg;

use crate::host::SessionFeature;

#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Lower bound for the uniform scale, relative to the scale at load time.
    pub min_scale: f32,
    /// Upper bound for the uniform scale, relative to the scale at load time.
    pub max_scale: f32,
    /// Rotation applied per pixel of one-finger drag.
    pub rotation_sensitivity: Deg<f32>,
    /// Pitch is clamped to `[-pitch_limit, pitch_limit]` to keep gesture
    /// rotation away from the gimbal poles.
    pub pitch_limit: Deg<f32>,
    /// Poll the host for placement poses every frame while unlocked.
    pub enable_hit_test: bool,
    /// Allow one-finger drag to rotate the model.
    pub enable_gesture_rotation: bool,
    /// Allow two-finger pinch to scale the model.
    pub enable_gesture_scale: bool,
    /// Features passed to the host when requesting an immersive session.
    pub required_features: Vec<SessionFeature>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.1,
            max_scale: 10.0,
            rotation_sensitivity: Deg(0.1),
            pitch_limit: Deg(80.0),
            enable_hit_test: true,
            enable_gesture_rotation: true,
            enable_gesture_scale: true,
            required_features: vec![SessionFeature::LocalFloor, SessionFeature::LightEstimation],
        }
    }
}
