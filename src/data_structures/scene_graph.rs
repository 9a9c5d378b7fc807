//! Loaded scene representation.
//!
//! A [`SceneNode`] is the renderable result of a successful model load:
//! CPU-side mesh data plus an optional, prepared-but-paused animation track.
//! The scene session owns at most one node at a time; replacing it drops the
//! previous node and everything it holds.

use instant::Duration;

use crate::resources::animation::Keyframes;

/// An animation clip: a named animation with keyframes and timing.
#[derive(Clone, Debug)]
pub struct AnimationClip {
    pub name: String,
    pub keyframes: Keyframes,
    pub timestamps: Vec<f32>,
}

impl AnimationClip {
    pub fn duration(&self) -> f32 {
        self.timestamps.last().copied().unwrap_or(0.0)
    }
}

/// All animation clips of a model, advanced together on render ticks.
///
/// The track is prepared at load time but never starts on its own; the scene
/// session advances it only while playback is enabled. Pausing freezes the
/// clock in place rather than resetting it.
#[derive(Clone, Debug)]
pub struct AnimationTrack {
    clips: Vec<AnimationClip>,
    duration: f32,
    elapsed: f32,
}

impl AnimationTrack {
    pub fn new(clips: Vec<AnimationClip>) -> Self {
        let duration = clips
            .iter()
            .map(AnimationClip::duration)
            .fold(0.0, f32::max);
        Self {
            clips,
            duration,
            elapsed: 0.0,
        }
    }

    pub fn clips(&self) -> &[AnimationClip] {
        &self.clips
    }

    /// Current position on the shared clip timeline, wrapped at the longest
    /// clip's duration.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub(crate) fn advance(&mut self, dt: Duration) {
        if self.duration <= 0.0 {
            return;
        }
        self.elapsed = (self.elapsed + dt.as_secs_f32()) % self.duration;
    }
}

/// One mesh primitive extracted from the asset, ready for renderer upload.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub name: String,
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

/// The loaded, renderable representation of a model.
#[derive(Clone, Debug)]
pub struct SceneNode {
    pub label: String,
    pub meshes: Vec<MeshData>,
    pub animation: Option<AnimationTrack>,
}

impl SceneNode {
    pub fn has_animation(&self) -> bool {
        self.animation.is_some()
    }
}
