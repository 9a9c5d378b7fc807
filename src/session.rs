//! Scene session: exclusive owner of the active scene node and its transform.
//!
//! Every mutation of the model (rotation, scale, placement, animation
//! playback) goes through this type. Mutations are synchronous and
//! last-write-wins: the render tick simply reads whatever [`Transform`]
//! currently holds, and because everything runs on the single scheduling
//! thread a mutation and a read never interleave within one tick.

use cgmath::Deg;
use instant::Duration;

use crate::{
    data_structures::{
        scene_graph::SceneNode,
        transform::{HitPose, Transform},
    },
    error::EngineError,
};

/// Scale and pitch bounds applied to every transform mutation.
#[derive(Clone, Copy, Debug)]
pub struct TransformBounds {
    pub min_scale: f32,
    pub max_scale: f32,
    pub pitch_limit: Deg<f32>,
}

pub struct SceneSession {
    node: Option<SceneNode>,
    transform: Transform,
    bounds: TransformBounds,
    placement_locked: bool,
    animation_playing: bool,
}

impl SceneSession {
    pub fn new(bounds: TransformBounds) -> Self {
        Self {
            node: None,
            transform: Transform::default(),
            bounds,
            placement_locked: false,
            animation_playing: false,
        }
    }

    /// Install a freshly loaded node, dropping the previous one first so at
    /// most one scene node is ever live. Resets the transform to the default
    /// pose and clears the placement lock.
    pub fn attach(&mut self, node: SceneNode) {
        if let Some(old) = self.node.take() {
            log::info!("replacing scene node {}", old.label);
        }
        self.node = Some(node);
        self.transform = Transform::default();
        self.placement_locked = false;
        self.animation_playing = false;
    }

    /// Drop the active node and reset placement state.
    pub fn detach(&mut self) {
        self.node = None;
        self.transform = Transform::default();
        self.placement_locked = false;
        self.animation_playing = false;
    }

    pub fn node(&self) -> Option<&SceneNode> {
        self.node.as_ref()
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn placement_locked(&self) -> bool {
        self.placement_locked
    }

    pub fn animation_playing(&self) -> bool {
        self.animation_playing
    }

    /// Toggle whether the prepared animation track advances on render ticks.
    /// No-op when the current node carries no track.
    pub fn set_animation_playing(&mut self, playing: bool) {
        if self.node.as_ref().is_some_and(SceneNode::has_animation) {
            self.animation_playing = playing;
        }
    }

    /// Add to the current orientation, clamped to the configured pitch bounds.
    pub fn apply_rotation(&mut self, delta_yaw: Deg<f32>, delta_pitch: Deg<f32>) {
        let yaw = self.transform.yaw + delta_yaw;
        let pitch = self.transform.pitch + delta_pitch;
        self.set_orientation(yaw, pitch);
    }

    /// Set the orientation directly (used to apply cumulative gesture deltas
    /// against the snapshot taken at gesture start).
    pub fn set_orientation(&mut self, yaw: Deg<f32>, pitch: Deg<f32>) {
        let limit = self.bounds.pitch_limit.0;
        self.transform.yaw = Deg(yaw.0 % 360.0);
        self.transform.pitch = Deg(pitch.0.clamp(-limit, limit));
    }

    /// Multiply the current scale by `factor`, clamped to the scale bounds.
    pub fn apply_scale(&mut self, factor: f32) {
        let scale = self.transform.scale * factor;
        self.set_scale(scale);
    }

    /// Set the scale directly, clamped to the scale bounds.
    pub fn set_scale(&mut self, scale: f32) {
        self.transform.scale = scale.clamp(self.bounds.min_scale, self.bounds.max_scale);
    }

    /// Adopt a hit-test pose as the model placement. Ignored once placement
    /// has been locked: the pose is simply dropped, not queued.
    pub fn apply_placement(&mut self, pose: HitPose) {
        if self.placement_locked {
            return;
        }
        self.transform.position = pose.position;
        self.transform.yaw = pose.yaw;
    }

    /// Fix the model in place. Hit-test poses stop moving the node; gestures
    /// may still adjust scale and orientation.
    pub fn lock_placement(&mut self) -> Result<(), EngineError> {
        if self.node.is_none() {
            return Err(EngineError::InvalidState {
                op: "lock_placement",
                state: "without a loaded model".to_string(),
            });
        }
        self.placement_locked = true;
        Ok(())
    }

    /// Per-frame update: advances the animation track while playback is on.
    pub fn advance(&mut self, dt: Duration) {
        if !self.animation_playing {
            return;
        }
        if let Some(track) = self.node.as_mut().and_then(|n| n.animation.as_mut()) {
            track.advance(dt);
        }
    }
}
