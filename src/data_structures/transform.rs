//! Model transform and world-space placement poses.

use cgmath::{Deg, Quaternion, Rotation3, Vector3};

/// Default viewer-relative position a freshly loaded model is placed at.
pub const DEFAULT_POSITION: [f32; 3] = [0.0, 0.0, -2.0];

/// The single transform of the active model.
///
/// Orientation is kept as yaw/pitch so gesture rotation can be clamped away
/// from the gimbal poles; the renderer reads a quaternion via [`Transform::rotation`].
/// Mutated only through the scene session, read once per render tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vector3<f32>,
    pub yaw: Deg<f32>,
    pub pitch: Deg<f32>,
    pub scale: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: DEFAULT_POSITION.into(),
            yaw: Deg(0.0),
            pitch: Deg(0.0),
            scale: 1.0,
        }
    }
}

impl Transform {
    /// Composed orientation for the renderer: yaw about the world up axis,
    /// then pitch about the local x axis.
    pub fn rotation(&self) -> Quaternion<f32> {
        Quaternion::from_angle_y(self.yaw) * Quaternion::from_angle_x(self.pitch)
    }
}

/// A world-space placement produced by the hit-test service for one frame.
///
/// Poses are ephemeral: recomputed every frame while placement is unlocked
/// and never cached. Orientation is reduced to a yaw about the vertical axis
/// so that surface placement never disturbs the user-controlled pitch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitPose {
    pub position: Vector3<f32>,
    pub yaw: Deg<f32>,
}
